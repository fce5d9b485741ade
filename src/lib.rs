//! Glicko-2 style rating update for a single match between two competitors.
//!
//! Given the rating and rating deviation of both competitors and the outcome
//! of a match, [`RatingSystem::update_ratings()`] computes their new ratings.
//! The magnitude of each adjustment is found by solving the Glicko-2
//! volatility equation with the Illinois method.
//!
//! ```
//! use glicko2_duel::{Rating, RatingSystem, Score};
//!
//! let rating_system = RatingSystem::new();
//! let favorite = Rating::new(1900.0, 50.0);
//! let underdog = Rating::new(1500.0, 50.0);
//!
//! let update = rating_system.update_ratings(&favorite, &underdog, Score::LOSS)?;
//! assert!(update.first.rating < favorite.rating);
//! assert!(update.second.rating > underdog.rating);
//! # Ok::<_, glicko2_duel::UpdateError>(())
//! ```

mod error;
mod expectation;
mod internal_rating;
mod rating;
mod rating_system;
mod score;
mod solver;

pub use error::{SolverStage, UpdateError};
pub use internal_rating::INTERNAL_RATING_SCALE;
pub use rating::{Rating, RatingDifference, RatingScalar};
pub use rating_system::{update, OpponentModel, RatingSystem, RatingSystemBuilder, RatingUpdate};
pub use score::Score;

/// Log likelihood deviance metric that can be used to evaluate the quality of
/// rating system predictions.
///
/// Lower is better.
///
/// See https://www.kaggle.com/c/ChessRatings2/overview/evaluation.
pub fn deviance(expected: Score, Score(actual): Score) -> f64 {
    let Score(expected) = expected.clamp(Score(0.01), Score(0.99));
    -(actual * expected.log10() + (1.0 - actual) * (1.0 - expected).log10())
}
