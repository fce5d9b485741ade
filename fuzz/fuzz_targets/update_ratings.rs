#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use glicko2_duel::{OpponentModel, Rating, RatingSystem, Score, UpdateError};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ArbitraryRating {
    rating: f64,
    deviation: f64,
}

impl ArbitraryRating {
    fn into_rating(self) -> Rating {
        Rating::new(self.rating, self.deviation)
    }

    fn is_valid(&self) -> bool {
        self.rating.is_finite() && self.deviation > 0.0 && self.deviation.is_finite()
    }
}

#[derive(Arbitrary, Debug)]
struct Encounter {
    first: ArbitraryRating,
    second: ArbitraryRating,
    score: u8,
    reference: bool,
    tau: f64,
}

fn assert_rating(rating: &Rating) {
    assert!(rating.rating.is_finite());
    assert!(f64::from(rating.deviation) > 0.0);
    assert!(f64::from(rating.deviation).is_finite());
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(encounter) = Encounter::arbitrary(&mut u) else {
        return;
    };

    let valid = encounter.first.is_valid() && encounter.second.is_valid();
    let score = match encounter.score % 3 {
        0 => Score::LOSS,
        1 => Score::DRAW,
        _ => Score::WIN,
    };

    let rating_system = RatingSystem::builder()
        .tau(if encounter.tau.is_finite() {
            encounter.tau.abs().clamp(0.01, 10.0)
        } else {
            0.5
        })
        .opponent_model(if encounter.reference {
            OpponentModel::Reference
        } else {
            OpponentModel::Paired
        })
        .build();

    // Must terminate for all inputs, and only report invalid arguments for
    // invalid inputs.
    match rating_system.update_ratings(
        &encounter.first.into_rating(),
        &encounter.second.into_rating(),
        score,
    ) {
        Ok(update) => {
            assert!(valid);
            assert_rating(&update.first);
            assert_rating(&update.second);
        }
        Err(UpdateError::InvalidArgument { .. }) => assert!(!valid),
        Err(UpdateError::ConvergenceFailure { .. } | UpdateError::NumericInstability { .. }) => {
            assert!(valid)
        }
    }
});
