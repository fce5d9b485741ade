use tracing::debug;

use crate::{
    error::UpdateError,
    expectation::{expectation, g},
    internal_rating::{InternalRating, INTERNAL_RATING_SCALE},
    solver, Rating, RatingDifference, RatingScalar, Score,
};

/// Which values stand in for the opponent when a competitor's rating is
/// adjusted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum OpponentModel {
    /// Each competitor is adjusted against the true opponent's rating and
    /// deviation.
    #[default]
    Paired,
    /// Reproduces the legacy two-player computation: the first competitor is
    /// adjusted against the second competitor's rating, but discounted by its
    /// own deviation. The second competitor is adjusted against itself, so
    /// the first competitor never influences its new rating.
    Reference,
}

#[derive(Debug, Clone)]
pub struct RatingSystemBuilder {
    scale: f64,
    midpoint: f64,

    default_deviation: f64,

    tau: f64,
    epsilon: f64,
    max_iterations: u32,

    opponent_model: OpponentModel,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            scale: INTERNAL_RATING_SCALE,
            midpoint: 1500.0,

            default_deviation: 350.0,

            tau: 0.5,
            epsilon: 0.000_001,
            max_iterations: 100,

            opponent_model: OpponentModel::Paired,
        }
    }

    /// Factor between the external rating scale and the internal Glicko-2
    /// scale.
    pub fn scale(&mut self, scale: f64) -> &mut Self {
        assert!(scale > 0.0 && scale.is_finite());
        self.scale = scale;
        self
    }

    /// External rating that maps to `0.0` on the internal scale.
    pub fn midpoint(&mut self, midpoint: f64) -> &mut Self {
        assert!(midpoint.is_finite());
        self.midpoint = midpoint;
        self
    }

    pub fn default_deviation(&mut self, default_deviation: f64) -> &mut Self {
        assert!(default_deviation > 0.0 && default_deviation.is_finite());
        self.default_deviation = default_deviation;
        self
    }

    /// Volatility-smoothing constant.
    pub fn tau(&mut self, tau: f64) -> &mut Self {
        assert!(tau > 0.0 && tau.is_finite());
        self.tau = tau;
        self
    }

    /// Convergence tolerance of the root-finder.
    pub fn epsilon(&mut self, epsilon: f64) -> &mut Self {
        assert!(epsilon > 0.0);
        self.epsilon = epsilon;
        self
    }

    /// Maximum number of iterations of each solver loop.
    pub fn max_iterations(&mut self, max_iterations: u32) -> &mut Self {
        assert!(max_iterations > 0);
        self.max_iterations = max_iterations;
        self
    }

    pub fn opponent_model(&mut self, opponent_model: OpponentModel) -> &mut Self {
        self.opponent_model = opponent_model;
        self
    }

    pub fn build(&self) -> RatingSystem {
        RatingSystem {
            scale: self.scale,
            midpoint: self.midpoint,

            default_deviation: self.default_deviation,

            tau: self.tau,
            epsilon: self.epsilon,
            max_iterations: self.max_iterations,

            opponent_model: self.opponent_model,
        }
    }
}

/// Parameters of the rating system. Immutable once built.
///
/// # Example
///
/// ```
/// use glicko2_duel::{Rating, RatingSystem, Score};
///
/// let rating_system = RatingSystem::new();
///
/// let update = rating_system
///     .update_ratings(
///         &Rating::new(1500.0, 200.0),
///         &Rating::new(1500.0, 200.0),
///         Score::WIN,
///     )
///     .unwrap();
///
/// assert!(f64::from(update.first.rating) > 1500.0);
/// assert!(f64::from(update.second.rating) < 1500.0);
/// ```
#[derive(Debug, Clone)]
pub struct RatingSystem {
    scale: f64,
    midpoint: f64,

    default_deviation: f64,

    tau: f64,
    epsilon: f64,
    max_iterations: u32,

    opponent_model: OpponentModel,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

/// New ratings of both competitors after a match.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingUpdate {
    pub first: Rating,
    pub second: Rating,
}

impl RatingUpdate {
    /// Only the new ratings, discarding the refined deviations.
    pub fn ratings(&self) -> (RatingScalar, RatingScalar) {
        (self.first.rating, self.second.rating)
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn midpoint(&self) -> f64 {
        self.midpoint
    }

    pub fn default_deviation(&self) -> f64 {
        self.default_deviation
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn opponent_model(&self) -> OpponentModel {
        self.opponent_model
    }

    /// Rating of a competitor without any matches.
    pub fn default_rating(&self) -> Rating {
        Rating {
            rating: RatingScalar(self.midpoint),
            deviation: RatingDifference(self.default_deviation),
        }
    }

    /// Expected score of `first` in a match against `second`.
    pub fn expected_score(&self, first: &Rating, second: &Rating) -> Score {
        let first = InternalRating::from_external(first, self);
        let second = InternalRating::from_external(second, self);
        Score(expectation(first.mu, second.mu, g(second.phi)))
    }

    /// Computes the ratings of both competitors after a match in which
    /// `first` achieved `score` against `second`.
    ///
    /// Deviations must be positive and ratings finite. The score must be
    /// exactly [`Score::LOSS`], [`Score::DRAW`] or [`Score::WIN`].
    pub fn update_ratings(
        &self,
        first: &Rating,
        second: &Rating,
        score: Score,
    ) -> Result<RatingUpdate, UpdateError> {
        validate(first, "first")?;
        validate(second, "second")?;
        if !score.is_outcome() {
            return Err(UpdateError::invalid(format!(
                "score must be 0, 0.5 or 1, got {}",
                score.value()
            )));
        }

        let first_internal = InternalRating::from_external(first, self);
        let second_internal = InternalRating::from_external(second, self);

        let (first_opponent, second_opponent) = match self.opponent_model {
            OpponentModel::Paired => (second_internal, first_internal),
            OpponentModel::Reference => (
                InternalRating {
                    mu: second_internal.mu,
                    phi: first_internal.phi,
                },
                second_internal,
            ),
        };

        let update = RatingUpdate {
            first: self.adjust(first_internal, first_opponent, score)?,
            second: self.adjust(second_internal, second_opponent, score.opposite())?,
        };
        debug!(
            model = ?self.opponent_model,
            score = score.value(),
            first = f64::from(update.first.rating),
            second = f64::from(update.second.rating),
            "updated ratings"
        );
        Ok(update)
    }

    fn adjust(
        &self,
        subject: InternalRating,
        opponent: InternalRating,
        score: Score,
    ) -> Result<Rating, UpdateError> {
        let g = g(opponent.phi);
        let e = expectation(subject.mu, opponent.mu, g);
        Ok(solver::adjust(subject, g, e, score, self)?.to_external(self))
    }
}

fn validate(rating: &Rating, which: &str) -> Result<(), UpdateError> {
    if !rating.rating.is_finite() {
        return Err(UpdateError::invalid(format!(
            "{which} rating must be finite, got {}",
            f64::from(rating.rating)
        )));
    }
    let deviation = f64::from(rating.deviation);
    if !(deviation > 0.0 && deviation.is_finite()) {
        return Err(UpdateError::invalid(format!(
            "{which} deviation must be positive and finite, got {deviation}"
        )));
    }
    Ok(())
}

/// Rating-only two-player update with the legacy argument order, using
/// [`OpponentModel::Reference`] and default constants.
///
/// Returns `(new_rating_a, new_rating_b)`.
pub fn update(
    rating_a: f64,
    rating_b: f64,
    deviation_a: f64,
    deviation_b: f64,
    outcome_a: f64,
) -> Result<(f64, f64), UpdateError> {
    let (a, b) = RatingSystem::builder()
        .opponent_model(OpponentModel::Reference)
        .build()
        .update_ratings(
            &Rating::new(rating_a, deviation_a),
            &Rating::new(rating_b, deviation_b),
            Score(outcome_a),
        )?
        .ratings();
    Ok((a.into(), b.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(before: &Rating, after: &Rating) -> f64 {
        f64::from(after.rating - before.rating)
    }

    #[test]
    fn test_draw_between_equals() {
        let rating = Rating::new(1500.0, 120.0);
        for model in [OpponentModel::Paired, OpponentModel::Reference] {
            let update = RatingSystem::builder()
                .opponent_model(model)
                .build()
                .update_ratings(&rating, &rating, Score::DRAW)
                .unwrap();
            assert_eq!(update.first.rating, rating.rating);
            assert_eq!(update.second.rating, rating.rating);
        }
    }

    #[test]
    fn test_even_match_is_zero_sum_when_paired() {
        let rating = Rating::new(1500.0, 200.0);
        let update = RatingSystem::new()
            .update_ratings(&rating, &rating, Score::WIN)
            .unwrap();

        let gain = change(&rating, &update.first);
        let loss = change(&rating, &update.second);
        assert!(gain > 0.0);
        assert!(loss < 0.0);
        assert!((gain + loss).abs() < 1e-9);
        assert!(gain < 100.0);
    }

    #[test]
    fn test_upset_loss_of_favorite() {
        let rating_system = RatingSystem::new();
        let favorite = Rating::new(1900.0, 50.0);
        let underdog = Rating::new(1500.0, 50.0);
        let peer = Rating::new(1900.0, 50.0);

        let upset = rating_system
            .update_ratings(&favorite, &underdog, Score::LOSS)
            .unwrap();
        let even = rating_system
            .update_ratings(&favorite, &peer, Score::LOSS)
            .unwrap();

        let upset_drop = -change(&favorite, &upset.first);
        let even_drop = -change(&favorite, &even.first);
        assert!(even_drop > 0.0);
        assert!(upset_drop > 1.5 * even_drop);
        assert!(change(&underdog, &upset.second) > 0.0);
    }

    #[test]
    fn test_reference_model_ignores_first_for_second() {
        let rating_system = RatingSystem::builder()
            .opponent_model(OpponentModel::Reference)
            .build();
        let second = Rating::new(1500.0, 80.0);

        let against_weak = rating_system
            .update_ratings(&Rating::new(1200.0, 300.0), &second, Score::LOSS)
            .unwrap();
        let against_strong = rating_system
            .update_ratings(&Rating::new(2200.0, 40.0), &second, Score::LOSS)
            .unwrap();
        assert_eq!(against_weak.second, against_strong.second);
        assert!(change(&second, &against_weak.second) > 0.0);
    }

    #[test]
    fn test_reference_model_discounts_by_own_deviation() {
        let first = Rating::new(1600.0, 90.0);
        let reference = RatingSystem::builder()
            .opponent_model(OpponentModel::Reference)
            .build();

        // The first competitor's update only depends on the second
        // competitor's rating, not on its deviation.
        let a = reference
            .update_ratings(&first, &Rating::new(1550.0, 60.0), Score::WIN)
            .unwrap();
        let b = reference
            .update_ratings(&first, &Rating::new(1550.0, 340.0), Score::WIN)
            .unwrap();
        assert_eq!(a.first, b.first);

        // With equal deviations both models agree for the first competitor.
        let paired = RatingSystem::new()
            .update_ratings(&first, &Rating::new(1550.0, 90.0), Score::WIN)
            .unwrap();
        assert_eq!(paired.first, a.first);
    }

    #[test]
    fn test_legacy_entry_point() {
        let (a, b) = update(1500.0, 1500.0, 200.0, 200.0, 1.0).unwrap();
        assert!(a > 1500.0);
        assert!(b < 1500.0);

        let reference = RatingSystem::builder()
            .opponent_model(OpponentModel::Reference)
            .build()
            .update_ratings(
                &Rating::new(1500.0, 200.0),
                &Rating::new(1500.0, 200.0),
                Score::WIN,
            )
            .unwrap();
        assert_eq!(
            (RatingScalar(a), RatingScalar(b)),
            reference.ratings()
        );
    }

    #[test]
    fn test_refined_deviation_is_returned() {
        let rating = Rating::new(1500.0, 200.0);
        let update = RatingSystem::new()
            .update_ratings(&rating, &rating, Score::WIN)
            .unwrap();
        let deviation = f64::from(update.first.deviation);
        assert!(deviation > 0.0);
        assert!((deviation - 200.0).abs() < 10.0);
    }

    #[test]
    fn test_invalid_arguments() {
        let rating_system = RatingSystem::new();
        let ok = Rating::new(1500.0, 100.0);

        for (first, second, score) in [
            (Rating::new(1500.0, 0.0), ok.clone(), Score::WIN),
            (ok.clone(), Rating::new(1500.0, -10.0), Score::WIN),
            (ok.clone(), Rating::new(1500.0, f64::INFINITY), Score::WIN),
            (Rating::new(f64::NAN, 100.0), ok.clone(), Score::LOSS),
            (ok.clone(), Rating::new(f64::NEG_INFINITY, 100.0), Score::DRAW),
            (ok.clone(), ok.clone(), Score(0.7)),
            (ok.clone(), ok.clone(), Score(f64::NAN)),
        ] {
            assert!(matches!(
                rating_system.update_ratings(&first, &second, score),
                Err(UpdateError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_solver_hits_exact_root() {
        // Illinois refinement lands exactly on a root for this pairing.
        let update = RatingSystem::new()
            .update_ratings(
                &Rating::new(1500.0, 200.0),
                &Rating::new(1000.0, 200.0),
                Score::WIN,
            )
            .unwrap();
        assert!(f64::from(update.first.rating) > 1500.0);
        assert!(f64::from(update.second.rating) < 1000.0);
    }

    #[test]
    fn test_iteration_cap() {
        let rating_system = RatingSystem::builder().max_iterations(1).build();
        assert_eq!(
            rating_system.update_ratings(
                &Rating::new(1500.0, 200.0),
                &Rating::new(1700.0, 200.0),
                Score::WIN,
            ),
            Err(UpdateError::ConvergenceFailure {
                stage: crate::SolverStage::Refinement,
                iterations: 1,
            })
        );
    }

    #[test]
    fn test_numeric_instability() {
        assert!(matches!(
            RatingSystem::new().update_ratings(
                &Rating::new(1e9, 50.0),
                &Rating::new(0.0, 50.0),
                Score::WIN,
            ),
            Err(UpdateError::NumericInstability { .. })
        ));
    }

    #[test]
    fn test_vanishing_deviation() {
        assert_eq!(
            RatingSystem::new().update_ratings(
                &Rating::new(1500.0, 1e-300),
                &Rating::new(1500.0, 100.0),
                Score::WIN,
            ),
            Err(UpdateError::NumericInstability {
                quantity: "log deviation"
            })
        );
    }

    #[test]
    fn test_expected_score() {
        let rating_system = RatingSystem::new();
        let strong = Rating::new(1800.0, 60.0);
        let weak = Rating::new(1500.0, 60.0);

        let Score(expected) = rating_system.expected_score(&strong, &weak);
        assert!(expected > 0.8 && expected < 0.9);
        assert!(
            (rating_system.expected_score(&weak, &strong).value() + expected - 1.0).abs() < 1e-12
        );
        assert_eq!(rating_system.expected_score(&weak, &weak), Score::DRAW);
    }

    #[test]
    fn test_default_rating() {
        assert_eq!(RatingSystem::new().default_rating(), Rating::new(1500.0, 350.0));
        assert_eq!(
            RatingSystem::builder()
                .midpoint(1200.0)
                .default_deviation(250.0)
                .build()
                .default_rating(),
            Rating::new(1200.0, 250.0)
        );
    }
}
