use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::UserId;

/// How nearest-neighbor users are turned into movie titles
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPolicy {
    /// The i-th nearest user's row position is read as a movie column position.
    /// Output depends on column ordering, not on what the neighbors rated.
    NeighborIndex,
    /// Movies the nearest users rated highly and the target user has not rated,
    /// weighted by neighbor similarity
    #[default]
    NeighborRatings,
}

impl Display for RecommendationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationPolicy::NeighborIndex => write!(f, "neighbor_index"),
            RecommendationPolicy::NeighborRatings => write!(f, "neighbor_ratings"),
        }
    }
}

/// Ordered titles recommended to one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub user_id: UserId,
    pub policy: RecommendationPolicy,
    pub recommendations: Vec<String>,
}

impl Display for Recommendations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Top movie recommendations for user {}: [{}]",
            self.user_id,
            self.recommendations.join(", ")
        )
    }
}
