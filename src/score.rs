/// A match outcome or expectation value in the range `0.0..=1.0`, where `0.0`
/// is a loss, `0.5` is a draw and `1.0` is a win.
///
/// Outcomes passed to [`RatingSystem::update_ratings()`](crate::RatingSystem::update_ratings)
/// must be exactly one of [`Score::LOSS`], [`Score::DRAW`] or [`Score::WIN`].
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Score(pub f64);

impl From<Score> for f64 {
    fn from(Score(score): Score) -> f64 {
        score
    }
}

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const DRAW: Score = Score(0.5);
    pub const WIN: Score = Score(1.0);

    /// The outcome from the opponent's point of view.
    ///
    /// Exactly `WIN` for `LOSS`, exactly `LOSS` for `WIN`, and `DRAW` for
    /// everything else.
    pub fn opposite(self) -> Score {
        if self.0 == 0.0 {
            Score::WIN
        } else if self.0 == 1.0 {
            Score::LOSS
        } else {
            Score::DRAW
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_outcome(self) -> bool {
        self == Score::LOSS || self == Score::DRAW || self == Score::WIN
    }

    pub fn clamp(self, Score(min): Score, Score(max): Score) -> Score {
        Score(f64::from(self).clamp(min, max))
    }
}
