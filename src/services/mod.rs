pub mod matrix;
pub mod neighbors;
pub mod pipeline;
pub mod recommendations;

pub use matrix::{build_matrix, UserMovieMatrix};
pub use neighbors::{NearestNeighbors, Neighbor};
pub use pipeline::recommend_for_user;
pub use recommendations::Recommender;
