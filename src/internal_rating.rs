use crate::{
    rating::{Rating, RatingDifference, RatingScalar},
    RatingSystem,
};

pub const INTERNAL_RATING_SCALE: f64 = 173.7178;

/// A rating on the zero-centered, unit-scaled Glicko-2 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct InternalRating {
    pub mu: f64,
    pub phi: f64,
}

impl InternalRating {
    #[inline]
    pub fn from_external(rating: &Rating, rating_system: &RatingSystem) -> InternalRating {
        let scale = rating_system.scale();
        InternalRating {
            mu: (f64::from(rating.rating) - rating_system.midpoint()) / scale,
            phi: f64::from(rating.deviation) / scale,
        }
    }

    #[inline]
    pub fn to_external(self, rating_system: &RatingSystem) -> Rating {
        let scale = rating_system.scale();
        Rating {
            rating: RatingScalar(self.mu * scale + rating_system.midpoint()),
            deviation: RatingDifference(self.phi * scale),
        }
    }

    #[inline]
    pub fn phi_sq(self) -> f64 {
        self.phi * self.phi
    }
}
