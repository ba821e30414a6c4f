pub mod movie;
pub mod rating;
pub mod recommendation;

pub use movie::{Movie, MovieCatalog, MovieFilter};
pub use rating::Rating;
pub use recommendation::{RecommendationPolicy, Recommendations};

/// Identifier of a user in the ratings table
pub type UserId = i64;

/// Identifier of a movie in the movies and ratings tables
pub type MovieId = i64;
