use super::{aop::Aop, dop::Dop};
use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

/// Relative tolerance on the squared polarized power when checking realizability.
const REALIZABLE_TOLERANCE: f64 = 1.001;

/// Describes the full polarization state of a beam.
///
/// ```text
/// S_0 = total intensity
/// S_1 = I_H  - I_V
/// S_2 = I_45 - I_-45
/// S_3 = I_R  - I_L
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StokesVec {
    inner: [f64; 4],
}

impl StokesVec {
    /// Creates a new `StokesVec`.
    ///
    /// Returns an error unless `S0 >= 0` and `S1² + S2² + S3² <= S0²`.
    pub fn new(s0: f64, s1: f64, s2: f64, s3: f64) -> Result<Self, Error> {
        let polarized = s1 * s1 + s2 * s2 + s3 * s3;
        let total = s0 * s0;
        if s0 < 0.0 || polarized > total * REALIZABLE_TOLERANCE {
            return Err(Error::InvalidStokes { polarized, total });
        }

        Ok(Self::from_array([s0, s1, s2, s3]))
    }

    /// Wraps components that are realizable by construction.
    pub(crate) fn from_array(inner: [f64; 4]) -> Self {
        Self { inner }
    }

    pub fn horizontal(intensity: f64) -> Self {
        Self::from_array([intensity, intensity, 0.0, 0.0])
    }

    pub fn vertical(intensity: f64) -> Self {
        Self::from_array([intensity, -intensity, 0.0, 0.0])
    }

    pub fn diagonal(intensity: f64) -> Self {
        Self::from_array([intensity, 0.0, intensity, 0.0])
    }

    pub fn anti_diagonal(intensity: f64) -> Self {
        Self::from_array([intensity, 0.0, -intensity, 0.0])
    }

    pub fn right_circular(intensity: f64) -> Self {
        Self::from_array([intensity, 0.0, 0.0, intensity])
    }

    pub fn left_circular(intensity: f64) -> Self {
        Self::from_array([intensity, 0.0, 0.0, -intensity])
    }

    pub fn unpolarized(intensity: f64) -> Self {
        Self::from_array([intensity, 0.0, 0.0, 0.0])
    }

    /// Fully linearly polarized light with its e-vector along `angle`.
    pub fn linear(intensity: f64, angle: Angle) -> Self {
        let double = (angle * 2.0).get::<radian>();
        Self::from_array([
            intensity,
            intensity * double.cos(),
            intensity * double.sin(),
            0.0,
        ])
    }

    /// Builds a `StokesVec` from six analyzer measurements.
    ///
    /// `S_0` is taken as the mean of the three pair sums, which agree for
    /// ideal measurements.
    pub fn from_intensities(
        i_h: f64,
        i_v: f64,
        i_45: f64,
        i_m45: f64,
        i_r: f64,
        i_l: f64,
    ) -> Result<Self, Error> {
        Self::new(
            (i_h + i_v + i_45 + i_m45 + i_r + i_l) / 3.0,
            i_h - i_v,
            i_45 - i_m45,
            i_r - i_l,
        )
    }

    pub fn s0(&self) -> f64 {
        self.inner[0]
    }

    pub fn components(&self) -> [f64; 4] {
        self.inner
    }

    /// Compute the DoP of the beam.
    ///
    /// Returns zero for a beam with no intensity.
    pub fn dop(&self) -> Dop {
        Dop::from_stokes(self.inner)
    }

    /// Compute the AoP of the beam.
    pub fn aop(&self) -> Aop {
        Aop::from_stokes(self.inner[1], self.inner[2])
    }

    /// Normalized coordinates on the Poincaré sphere.
    ///
    /// The distance from the origin equals the DoP.
    pub fn to_poincare(&self) -> [f64; 3] {
        let s0 = self.inner[0];
        if s0 == 0.0 {
            return [0.0; 3];
        }

        [self.inner[1] / s0, self.inner[2] / s0, self.inner[3] / s0]
    }

    /// Extracts the polarization ellipse traced by the e-vector.
    pub fn ellipse(&self) -> Ellipse {
        let s0 = self.inner[0];
        if s0 == 0.0 {
            return Ellipse {
                semi_major: 0.0,
                semi_minor: 0.0,
                orientation: Angle::new::<radian>(0.0),
                ellipticity: Angle::new::<radian>(0.0),
                handedness: Handedness::Undefined,
            };
        }

        let [s1, s2, s3] = self.to_poincare();
        let orientation = match s1.abs() < 1e-10 && s2.abs() < 1e-10 {
            true => 0.0,
            false => 0.5 * s2.atan2(s1),
        };
        let ellipticity = Angle::new::<radian>(0.5 * s3.clamp(-1.0, 1.0).asin());
        let dop = (s1 * s1 + s2 * s2 + s3 * s3).sqrt().min(1.0);

        let handedness = match ellipticity.get::<degree>() {
            chi if chi.abs() < 0.1 => Handedness::Linear,
            chi if chi > 0.0 => Handedness::Right,
            _ => Handedness::Left,
        };

        Ellipse {
            semi_major: (s0 * (1.0 + dop)).sqrt(),
            semi_minor: (s0 * (1.0 - dop)).sqrt(),
            orientation: Angle::new::<radian>(orientation),
            ellipticity,
            handedness,
        }
    }

    /// Splits the beam into its fully polarized and unpolarized parts.
    pub fn decompose(&self) -> (StokesVec, StokesVec) {
        let s0 = self.inner[0];
        if s0 == 0.0 {
            return (Self::unpolarized(0.0), Self::unpolarized(0.0));
        }

        let dop = self.dop();
        let [_, s1, s2, s3] = self.inner;

        (
            Self::from_array([dop.polarized(s0), s1, s2, s3]),
            Self::unpolarized(dop.unpolarized(s0)),
        )
    }
}

/// Sense of rotation of the e-vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Handedness {
    Linear,
    Right,
    Left,
    Undefined,
}

/// The ellipse traced by the e-vector of a beam.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ellipse {
    pub semi_major: f64,
    pub semi_minor: f64,
    /// Angle of the major axis from horizontal.
    pub orientation: Angle,
    /// Ellipticity angle, `atan(b / a)` signed by handedness.
    pub ellipticity: Angle,
    pub handedness: Handedness,
}

/// Incoherent superposition of two beams.
impl std::ops::Add for StokesVec {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        let mut inner = self.inner;
        inner
            .iter_mut()
            .zip(other.inner)
            .for_each(|(lhs, rhs)| *lhs += rhs);
        Self { inner }
    }
}

impl std::ops::Mul<f64> for StokesVec {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self {
            inner: self.inner.map(|s| s * scalar),
        }
    }
}
