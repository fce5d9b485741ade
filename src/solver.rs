use tracing::{debug, trace};

use crate::{
    error::{finite, SolverStage, UpdateError},
    internal_rating::InternalRating,
    RatingSystem, Score,
};

/// Residual of the volatility equation, as a function of
/// `x = ln(volatility^2)`.
#[derive(Debug, Clone, Copy)]
struct Objective {
    delta_sq: f64,
    phi_sq: f64,
    v: f64,
    a: f64,
    tau_sq: f64,
}

impl Objective {
    fn eval(&self, x: f64) -> f64 {
        let ex = x.exp();
        let denom = self.phi_sq + self.v + ex;
        ex * (self.delta_sq - self.phi_sq - self.v - ex) / (2.0 * denom * denom)
            - (x - self.a) / self.tau_sq
    }
}

/// Adjusts the internal rating of `subject` after a match with outcome
/// `score`, against an opponent with down-weighting factor `g` and expected
/// score `e`.
///
/// The returned deviation is the refined deviation `exp(A / 2)` at the root
/// `A` of the volatility equation, which also scales the rating change.
pub(crate) fn adjust(
    subject: InternalRating,
    g: f64,
    e: f64,
    Score(score): Score,
    rating_system: &RatingSystem,
) -> Result<InternalRating, UpdateError> {
    let v = finite("estimated variance", 1.0 / (g * g * e * (1.0 - e)))?;
    let delta = finite("estimated improvement", v * g * (score - e))?;

    let phi_sq = subject.phi_sq();
    let tau = rating_system.tau();
    let objective = Objective {
        delta_sq: delta * delta,
        phi_sq,
        v,
        a: finite("log deviation", phi_sq.ln())?,
        tau_sq: tau * tau,
    };
    let f = |x| objective.eval(x);

    let a = objective.a;
    let b = if objective.delta_sq > phi_sq + v {
        finite("bracket", (objective.delta_sq - phi_sq - v).ln())?
    } else {
        bracket_below(a, tau, rating_system.max_iterations(), f)?
    };
    debug!(v, delta, a, b, "bracketed volatility equation");

    let root = illinois(
        f,
        a,
        b,
        rating_system.epsilon(),
        rating_system.max_iterations(),
    )?;

    let phi = (root / 2.0).exp();
    let mu = finite("rating", subject.mu + phi * phi * g * (score - e))?;
    Ok(InternalRating { mu, phi })
}

/// Finds `a - k * tau` for the smallest `k >= 1` such that `f` is no longer
/// negative there.
fn bracket_below<F>(a: f64, tau: f64, max_iterations: u32, f: F) -> Result<f64, UpdateError>
where
    F: Fn(f64) -> f64,
{
    for k in 1..=max_iterations {
        let b = a - f64::from(k) * tau;
        let fb = finite("objective", f(b))?;
        trace!(k, b, fb, "bracket search");
        if fb >= 0.0 {
            return Ok(b);
        }
    }
    Err(UpdateError::ConvergenceFailure {
        stage: SolverStage::Bracketing,
        iterations: max_iterations,
    })
}

/// Illinois variant of regula falsi. Returns the endpoint `a` once the
/// bracket `[a, b]` has shrunk to at most `epsilon`, or an exact root if one
/// is hit on the way.
fn illinois<F>(
    f: F,
    mut a: f64,
    mut b: f64,
    epsilon: f64,
    max_iterations: u32,
) -> Result<f64, UpdateError>
where
    F: Fn(f64) -> f64,
{
    let mut fa = finite("objective", f(a))?;
    let mut fb = finite("objective", f(b))?;

    let mut iterations = 0;
    while (b - a).abs() > epsilon {
        if iterations == max_iterations {
            return Err(UpdateError::ConvergenceFailure {
                stage: SolverStage::Refinement,
                iterations,
            });
        }
        iterations += 1;

        let c = finite("secant step", a + (a - b) * fa / (fb - fa))?;
        let fc = finite("objective", f(c))?;
        if fc == 0.0 {
            // Exact root. Halving fa would no longer move the bracket.
            return Ok(c);
        }
        if fc * fb < 0.0 {
            a = b;
            fa = fb;
        } else {
            fa /= 2.0;
        }
        b = c;
        fb = fc;

        trace!(iterations, a, b, fa, fb, "illinois step");
    }

    Ok(a)
}
