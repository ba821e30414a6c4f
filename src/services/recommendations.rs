use std::collections::HashMap;

use crate::{
    error::LookupError,
    models::{MovieCatalog, MovieId, RecommendationPolicy, UserId},
    services::{
        matrix::UserMovieMatrix,
        neighbors::{NearestNeighbors, Neighbor},
    },
};

/// Default lowest neighbor rating considered by [`RecommendationPolicy::NeighborRatings`]
pub const DEFAULT_MIN_RATING: f64 = 3.0;

/// Nearest-neighbor recommender over a [`UserMovieMatrix`]
///
/// Finds the users closest to the target by cosine distance, drops the target's
/// own match, then turns the remaining neighbors into titles according to the
/// configured [`RecommendationPolicy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommender {
    policy: RecommendationPolicy,
    min_rating: f64,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(RecommendationPolicy::default())
    }
}

impl Recommender {
    pub fn new(policy: RecommendationPolicy) -> Self {
        Self {
            policy,
            min_rating: DEFAULT_MIN_RATING,
        }
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_policy(mut self, policy: RecommendationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RecommendationPolicy {
        self.policy
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    /// Up to `n` titles for `user_id`, best first
    ///
    /// Returns fewer than `n` titles when the matrix has fewer than `n + 1`
    /// users (or, for `NeighborRatings`, when the neighbors have fewer
    /// qualifying movies).
    pub fn recommend(
        &self,
        user_id: UserId,
        matrix: &UserMovieMatrix,
        movies: &MovieCatalog,
        n: usize,
    ) -> Result<Vec<String>, LookupError> {
        let index = NearestNeighbors::fit(matrix);

        let row = matrix
            .user_row(user_id)
            .ok_or(LookupError::UserNotFound(user_id))?;

        let neighbors: Vec<Neighbor> = index
            .kneighbors(row, n.saturating_add(1))
            .into_iter()
            .skip(1)
            .collect();

        tracing::debug!(
            user_id,
            row,
            neighbors = ?neighbors.iter().map(|n| n.row).collect::<Vec<_>>(),
            "Nearest users found"
        );

        let movie_ids = match self.policy {
            RecommendationPolicy::NeighborIndex => neighbor_columns(matrix, &neighbors)?,
            RecommendationPolicy::NeighborRatings => {
                rated_by_neighbors(matrix, row, &neighbors, self.min_rating, n)
            }
        };

        let titles = movie_ids
            .into_iter()
            .map(|movie_id| {
                movies
                    .title(movie_id)
                    .map(str::to_owned)
                    .ok_or(LookupError::MissingTitle(movie_id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            user_id,
            policy = %self.policy,
            requested = n,
            returned = titles.len(),
            "Recommendations computed"
        );

        Ok(titles)
    }
}

/// Reads each neighbor's row position as a column position
fn neighbor_columns(
    matrix: &UserMovieMatrix,
    neighbors: &[Neighbor],
) -> Result<Vec<MovieId>, LookupError> {
    neighbors
        .iter()
        .map(|neighbor| {
            matrix
                .movie_at(neighbor.row)
                .ok_or(LookupError::ColumnOutOfRange {
                    row: neighbor.row,
                    columns: matrix.n_movies(),
                })
        })
        .collect()
}

/// Movies the neighbors rated at least `min_rating` that the target row has not
/// rated, scored by the sum of similarity times rating over neighbors
///
/// Neighbors with no positive similarity share no rated movie with the target
/// and contribute nothing.
fn rated_by_neighbors(
    matrix: &UserMovieMatrix,
    target: usize,
    neighbors: &[Neighbor],
    min_rating: f64,
    n: usize,
) -> Vec<MovieId> {
    let seen = matrix.row(target);
    let mut scores: HashMap<usize, f64> = HashMap::new();

    for neighbor in neighbors {
        let weight = neighbor.similarity();
        if weight <= 0.0 {
            continue;
        }
        for (column, &rating) in matrix.row(neighbor.row).iter().enumerate() {
            if seen[column] != 0.0 || rating == 0.0 || rating < min_rating {
                continue;
            }
            *scores.entry(column).or_insert(0.0) += weight * rating;
        }
    }

    let mut ranked: Vec<(usize, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(n)
        .filter_map(|(column, _)| matrix.movie_at(column))
        .collect()
}
