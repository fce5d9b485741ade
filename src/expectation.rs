use std::f64::consts::PI;

/// Down-weighting factor for an opponent with internal deviation `phi`.
/// Approaches `0.0` as the opponent's rating becomes less certain.
#[inline]
pub(crate) fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Probability that the subject outscores the opponent, given their internal
/// ratings and the opponent's down-weighting factor.
#[inline]
pub(crate) fn expectation(mu_subject: f64, mu_opponent: f64, g: f64) -> f64 {
    1.0 / (1.0 + (-g * (mu_subject - mu_opponent)).exp())
}
