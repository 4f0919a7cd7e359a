use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fraction of a beam's intensity carried by its polarized part.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dop {
    degree: f64,
}

impl Dop {
    /// Returns an error if `degree` is not between 0.0 and 1.0.
    pub fn new(degree: f64) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&degree) {
            return Err(Error::OutOfUnitRange {
                name: "degree of polarization",
                value: degree,
            });
        }

        Ok(Self { degree })
    }

    /// Natural light.
    pub fn zero() -> Self {
        Self { degree: 0.0 }
    }

    pub fn full() -> Self {
        Self { degree: 1.0 }
    }

    /// DoP of the Stokes components `[S0, S1, S2, S3]`.
    ///
    /// ```text
    /// p = sqrt(S1² + S2² + S3²) / S0
    /// ```
    ///
    /// A beam with no intensity counts as unpolarized.
    pub fn from_stokes([s0, s1, s2, s3]: [f64; 4]) -> Self {
        if s0 <= 0.0 {
            return Self::zero();
        }

        Self::saturating((s1 * s1 + s2 * s2 + s3 * s3).sqrt() / s0)
    }

    /// Clamps `degree` onto [0, 1]. Only for values that can overshoot by
    /// rounding.
    pub(crate) fn saturating(degree: f64) -> Self {
        Self {
            degree: degree.clamp(0.0, 1.0),
        }
    }

    /// Intensity in the polarized part of a beam of total intensity `s0`.
    pub fn polarized(&self, s0: f64) -> f64 {
        self.degree * s0
    }

    /// Intensity in the unpolarized part of a beam of total intensity `s0`.
    pub fn unpolarized(&self, s0: f64) -> f64 {
        (1.0 - self.degree) * s0
    }

    pub fn into_inner(self) -> f64 {
        self.degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case(-0.1)]
    #[case(1.01)]
    #[case(f64::NAN)]
    fn outside_unit_range(#[case] degree: f64) {
        assert!(matches!(
            Dop::new(degree),
            Err(Error::OutOfUnitRange { .. })
        ));
    }

    #[rstest]
    #[case([1.0, 1.0, 0.0, 0.0], 1.0)]
    #[case([2.0, 0.0, 0.0, 0.0], 0.0)]
    #[case([0.0, 0.0, 0.0, 0.0], 0.0)]
    #[case([2.0, 0.6, 0.0, 0.8], 0.5)]
    #[case([1.0, 1.0, 1e-9, 0.0], 1.0)]
    fn from_components(#[case] stokes: [f64; 4], #[case] degree: f64) {
        assert_abs_diff_eq!(Dop::from_stokes(stokes).into_inner(), degree, epsilon = 1e-12);
    }

    #[test]
    fn parts_add_up() {
        let dop = Dop::new(0.25).unwrap();
        assert_eq!(dop.polarized(8.0), 2.0);
        assert_eq!(dop.unpolarized(8.0), 6.0);
    }
}
