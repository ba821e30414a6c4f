use std::collections::{BTreeSet, HashMap};

use crate::models::{MovieId, Rating, UserId};

/// Dense user-by-movie rating matrix
///
/// Rows are the distinct user ids of the ratings table and columns the distinct
/// movie ids, both ascending. Cells without a rating hold `0.0`, which reads the
/// same as an explicit rating of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct UserMovieMatrix {
    users: Vec<UserId>,
    movies: Vec<MovieId>,
    user_rows: HashMap<UserId, usize>,
    values: Vec<f64>,
}

impl UserMovieMatrix {
    /// Row ids, in row order
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Column ids, in column order
    pub fn movies(&self) -> &[MovieId] {
        &self.movies
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_movies(&self) -> usize {
        self.movies.len()
    }

    /// Row position of a user, if the user has any ratings
    pub fn user_row(&self, user_id: UserId) -> Option<usize> {
        self.user_rows.get(&user_id).copied()
    }

    /// Movie id at a column position
    pub fn movie_at(&self, column: usize) -> Option<MovieId> {
        self.movies.get(column).copied()
    }

    /// Ratings of the user at `row`, one per column
    pub fn row(&self, row: usize) -> &[f64] {
        let width = self.movies.len();
        &self.values[row * width..(row + 1) * width]
    }

    /// Rating of a user for a movie; `0.0` when absent
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> f64 {
        let Some(row) = self.user_row(user_id) else {
            return 0.0;
        };
        match self.movies.binary_search(&movie_id) {
            Ok(column) => self.row(row)[column],
            Err(_) => 0.0,
        }
    }
}

/// Pivots ratings into a [`UserMovieMatrix`]
///
/// A repeated (user, movie) pair overwrites the earlier value.
pub fn build_matrix(ratings: &[Rating]) -> UserMovieMatrix {
    let users: Vec<UserId> = ratings
        .iter()
        .map(|r| r.user_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let movies: Vec<MovieId> = ratings
        .iter()
        .map(|r| r.movie_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let user_rows: HashMap<UserId, usize> = users
        .iter()
        .enumerate()
        .map(|(row, user_id)| (*user_id, row))
        .collect();
    let movie_columns: HashMap<MovieId, usize> = movies
        .iter()
        .enumerate()
        .map(|(column, movie_id)| (*movie_id, column))
        .collect();

    let width = movies.len();
    let mut values = vec![0.0; users.len() * width];
    let mut filled = vec![false; values.len()];
    let mut overwritten = 0usize;

    for rating in ratings {
        let cell = user_rows[&rating.user_id] * width + movie_columns[&rating.movie_id];
        if filled[cell] {
            overwritten += 1;
        }
        filled[cell] = true;
        values[cell] = rating.rating;
    }

    if overwritten > 0 {
        tracing::debug!(overwritten, "Duplicate ratings replaced by later rows");
    }

    tracing::info!(
        users = users.len(),
        movies = movies.len(),
        ratings = ratings.len(),
        "User-movie matrix built"
    );

    UserMovieMatrix {
        users,
        movies,
        user_rows,
        values,
    }
}
