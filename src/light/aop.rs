use crate::light::{
    angle::{PolarizerAngle, effective_angle},
    intensity::Intensity,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

/// Orientation of the polarized part of a beam, measured from horizontal.
///
/// Kept in (-90, 90] degrees, so the two ends of the vertical axis compare
/// equal.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aop {
    degrees: f64,
}

impl Aop {
    /// Returns `None` unless `angle` is between -90 and 90 degrees.
    pub fn from_angle(angle: Angle) -> Option<Self> {
        let quarter = Angle::HALF_TURN / 2.0;
        if angle < -quarter || angle > quarter {
            return None;
        }

        Some(Self::from_angle_wrapped(angle))
    }

    /// Returns `None` unless `degrees` is between -90 and 90.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        match (-90.0..=90.0).contains(&degrees) {
            true => Some(Self::wrapped(degrees)),
            false => None,
        }
    }

    /// Wraps any real angle onto the AoP range.
    pub fn from_angle_wrapped(angle: Angle) -> Self {
        Self::wrapped(angle.get::<degree>())
    }

    /// AoP of a beam with linear Stokes components `s1` and `s2`.
    pub fn from_stokes(s1: f64, s2: f64) -> Self {
        Self::from_angle_wrapped(Angle::new::<radian>(0.5 * s2.atan2(s1)))
    }

    fn wrapped(degrees: f64) -> Self {
        let folded = ((degrees % 180.0) + 180.0) % 180.0;
        Self {
            degrees: match folded > 90.0 {
                true => folded - 180.0,
                false => folded,
            },
        }
    }

    /// The polarizer axis that passes this beam without loss.
    pub fn axis(&self) -> PolarizerAngle {
        PolarizerAngle::from_degrees(self.degrees)
    }

    /// Fraction of the polarized part that an analyzer along `analyzer` passes.
    pub fn through(&self, analyzer: PolarizerAngle) -> Intensity {
        effective_angle(self.axis(), analyzer).into()
    }

    /// Returns true if `other` lies within `tolerance` of `self`, counting
    /// across the ±90 degree seam.
    pub fn within(&self, other: &Aop, tolerance: Angle) -> bool {
        (*self - *other).degrees.abs() <= tolerance.get::<degree>()
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn into_inner(self) -> Angle {
        Angle::new::<degree>(self.degrees)
    }
}

impl std::ops::Sub for Aop {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::wrapped(self.degrees - other.degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use quickcheck::quickcheck;
    use rstest::rstest;

    fn a(angle: f64) -> Angle {
        Angle::new::<degree>(angle)
    }

    quickcheck! {
        fn wrapped_stays_in_range(angle: i32) -> bool {
            let degrees = Aop::from_angle_wrapped(a(angle as f64 / 8.0)).degrees();
            -90.0 < degrees && degrees <= 90.0
        }
    }

    #[rstest]
    #[case(180.0)]
    #[case(90.5)]
    #[case(-91.0)]
    fn out_of_range(#[case] angle: f64) {
        assert_eq!(Aop::from_angle(a(angle)), None);
        assert_eq!(Aop::from_degrees(angle), None);
    }

    #[test]
    fn vertical_ends_are_equal() {
        let up = Aop::from_degrees(90.0).unwrap();
        assert_eq!(up, Aop::from_degrees(-90.0).unwrap());
        assert_eq!(up.degrees(), 90.0);
    }

    #[rstest]
    #[case(90.0, 89.0, 1.0)]
    #[case(-89.0, 89.0, 2.0)]
    #[case(89.0, -89.0, -2.0)]
    #[case(-90.0, 90.0, 0.0)]
    fn difference_wraps(#[case] lhs: f64, #[case] rhs: f64, #[case] diff: f64) {
        let result = Aop::from_angle_wrapped(a(lhs)) - Aop::from_angle_wrapped(a(rhs));
        assert_abs_diff_eq!(result.degrees(), diff, epsilon = 1e-9);
    }

    #[rstest]
    #[case(90.0, 89.9, true)]
    #[case(90.0, -89.9, true)]
    #[case(90.0, 89.8, false)]
    #[case(0.0, 45.0, false)]
    fn tolerance_across_seam(#[case] center: f64, #[case] other: f64, #[case] within: bool) {
        let center = Aop::from_angle_wrapped(a(center));
        let other = Aop::from_angle_wrapped(a(other));
        assert_eq!(center.within(&other, a(0.15)), within);
    }

    #[rstest]
    #[case(1.0, 0.0, 0.0)]
    #[case(0.0, 1.0, 45.0)]
    #[case(-1.0, 0.0, 90.0)]
    #[case(0.0, -1.0, -45.0)]
    fn from_linear_components(#[case] s1: f64, #[case] s2: f64, #[case] degrees: f64) {
        let expected = Aop::from_degrees(degrees).unwrap();
        assert!(Aop::from_stokes(s1, s2).within(&expected, a(1e-9)));
    }

    #[test]
    fn analyzer_follows_malus() {
        let aop = Aop::from_angle_wrapped(a(-60.0));
        assert_abs_diff_eq!(aop.through(aop.axis()).into_inner(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            aop.through(PolarizerAngle::from_degrees(30.0)).into_inner(),
            0.0,
            epsilon = 1e-12
        );
    }
}
