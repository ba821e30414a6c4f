use super::matrix::UserMovieMatrix;

/// A fitted row and its cosine distance from the query row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f64,
}

impl Neighbor {
    /// Cosine similarity, `1 - distance`
    pub fn similarity(&self) -> f64 {
        1.0 - self.distance
    }
}

/// Brute-force nearest-neighbor index over the rows of a [`UserMovieMatrix`]
///
/// Distance is cosine distance. A zero row has similarity 0 with every row,
/// i.e. distance 1.
pub struct NearestNeighbors<'a> {
    matrix: &'a UserMovieMatrix,
    norms: Vec<f64>,
}

impl<'a> NearestNeighbors<'a> {
    pub fn fit(matrix: &'a UserMovieMatrix) -> Self {
        let norms = (0..matrix.n_users())
            .map(|row| norm(matrix.row(row)))
            .collect();
        Self { matrix, norms }
    }

    /// Cosine distance between two fitted rows, clamped to `[0, 2]`
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        let denom = self.norms[a] * self.norms[b];
        if denom == 0.0 {
            return 1.0;
        }
        let dot: f64 = self
            .matrix
            .row(a)
            .iter()
            .zip(self.matrix.row(b))
            .map(|(x, y)| x * y)
            .sum();
        (1.0 - dot / denom).clamp(0.0, 2.0)
    }

    /// The `k` nearest fitted rows to `row`, nearest first
    ///
    /// `row` itself is always first, at distance 0. Other ties are ordered by
    /// row position. `k` is capped at the number of fitted rows.
    pub fn kneighbors(&self, row: usize, k: usize) -> Vec<Neighbor> {
        let mut neighbors: Vec<Neighbor> = (0..self.norms.len())
            .map(|other| Neighbor {
                row: other,
                distance: if other == row {
                    0.0
                } else {
                    self.distance(row, other)
                },
            })
            .collect();

        neighbors.sort_by(|a, b| {
            (a.row != row)
                .cmp(&(b.row != row))
                .then_with(|| a.distance.total_cmp(&b.distance))
                .then_with(|| a.row.cmp(&b.row))
        });
        neighbors.truncate(k);
        neighbors
    }
}

fn norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}
