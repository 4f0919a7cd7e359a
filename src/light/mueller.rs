use super::stokes::StokesVec;
use crate::error::Error;
use nalgebra::{Matrix4, Vector4};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{angle::radian, f64::Angle};

/// A 4×4 real matrix that maps an input `StokesVec` onto an output one.
///
/// Unlike Jones calculus, Mueller matrices also describe depolarizing elements.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MuellerMatrix {
    inner: Matrix4<f64>,
}

impl MuellerMatrix {
    pub fn new(inner: Matrix4<f64>) -> Self {
        Self { inner }
    }

    /// An element that leaves every beam unchanged.
    pub fn identity() -> Self {
        Self::new(Matrix4::identity())
    }

    /// Rotates the reference frame by `angle`, which turns S1 and S2 by twice `angle`.
    pub fn rotation(angle: Angle) -> Self {
        let (sin2, cos2) = (2.0 * angle.get::<radian>()).sin_cos();
        Self::new(Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, cos2, sin2, 0.0, //
            0.0, -sin2, cos2, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ))
    }

    /// Returns this element turned about the beam axis by `angle`.
    ///
    /// ```text
    /// M'(θ) = R(-θ) M R(θ)
    /// ```
    pub fn rotate(&self, angle: Angle) -> Self {
        Self::new(Self::rotation(-angle).inner * self.inner * Self::rotation(angle).inner)
    }

    /// An ideal linear polarizer with its transmission axis along `angle`.
    ///
    /// Passes half of an unpolarized beam.
    pub fn linear_polarizer(angle: Angle) -> Self {
        let (sin2, cos2) = (2.0 * angle.get::<radian>()).sin_cos();
        Self::new(
            Matrix4::new(
                1.0, cos2, sin2, 0.0, //
                cos2, cos2 * cos2, sin2 * cos2, 0.0, //
                sin2, sin2 * cos2, sin2 * sin2, 0.0, //
                0.0, 0.0, 0.0, 0.0,
            ) * 0.5,
        )
    }

    /// A linear retarder delaying the slow axis by `retardance`, fast axis along `angle`.
    pub fn retarder(retardance: Angle, angle: Angle) -> Self {
        let (sin_d, cos_d) = retardance.get::<radian>().sin_cos();
        Self::new(Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, cos_d, sin_d, //
            0.0, 0.0, -sin_d, cos_d,
        ))
        .rotate(angle)
    }

    /// Converts linear light at 45 degrees to its fast axis into circular light.
    pub fn quarter_wave_plate(angle: Angle) -> Self {
        Self::retarder(Angle::HALF_TURN / 2.0, angle)
    }

    /// Mirrors linear polarization about its fast axis, turning it by twice
    /// the angle between the two.
    pub fn half_wave_plate(angle: Angle) -> Self {
        Self::retarder(Angle::HALF_TURN, angle)
    }

    /// An optically active element that turns the polarization plane by `angle`.
    pub fn rotator(angle: Angle) -> Self {
        Self::rotation(-angle)
    }

    /// A polarizer that passes its axis fully and blocks only `blocking` of the
    /// orthogonal component.
    ///
    /// Returns an error if `blocking` is not between 0.0 and 1.0.
    pub fn partial_polarizer(blocking: f64, angle: Angle) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&blocking) {
            return Err(Error::OutOfUnitRange {
                name: "blocking",
                value: blocking,
            });
        }

        let t_para: f64 = 1.0;
        let t_perp = 1.0 - blocking;
        let mean = (t_para + t_perp) / 2.0;
        let diff = (t_para - t_perp) / 2.0;
        let geo = (t_para * t_perp).sqrt();

        Ok(Self::new(Matrix4::new(
            mean, diff, 0.0, 0.0, //
            diff, mean, 0.0, 0.0, //
            0.0, 0.0, geo, 0.0, //
            0.0, 0.0, 0.0, geo,
        ))
        .rotate(angle))
    }

    /// An ideal depolarizer scaling the polarized part of a beam by `1 - depolarization`.
    ///
    /// Returns an error if `depolarization` is not between 0.0 and 1.0.
    pub fn depolarizer(depolarization: f64) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&depolarization) {
            return Err(Error::OutOfUnitRange {
                name: "depolarization",
                value: depolarization,
            });
        }

        let keep = 1.0 - depolarization;
        Ok(Self::new(Matrix4::from_diagonal(&Vector4::new(
            1.0, keep, keep, keep,
        ))))
    }

    pub fn as_matrix(&self) -> &Matrix4<f64> {
        &self.inner
    }

    /// Passes `stokes` through this element.
    pub fn apply(&self, stokes: &StokesVec) -> StokesVec {
        let output = self.inner * Vector4::from(stokes.components());
        StokesVec::from_array([output[0], output[1], output[2], output[3]])
    }

    /// Returns the element equivalent to passing through `self` then `next`.
    pub fn then(&self, next: &MuellerMatrix) -> Self {
        *next * *self
    }

    /// Diattenuation `D`, the dependence of transmission on input polarization.
    ///
    /// ```text
    /// D = sqrt(M01² + M02² + M03²) / M00
    /// ```
    pub fn diattenuation(&self) -> f64 {
        let m = &self.inner;
        if m[(0, 0)] == 0.0 {
            return 0.0;
        }

        ((m[(0, 1)].powi(2) + m[(0, 2)].powi(2) + m[(0, 3)].powi(2)).sqrt() / m[(0, 0)]).min(1.0)
    }

    /// Polarizance `P`, the DoP produced from unpolarized input.
    ///
    /// ```text
    /// P = sqrt(M10² + M20² + M30²) / M00
    /// ```
    pub fn polarizance(&self) -> f64 {
        let m = &self.inner;
        if m[(0, 0)] == 0.0 {
            return 0.0;
        }

        ((m[(1, 0)].powi(2) + m[(2, 0)].powi(2) + m[(3, 0)].powi(2)).sqrt() / m[(0, 0)]).min(1.0)
    }

    /// Depolarization index, zero for a non-depolarizing element and one for
    /// an ideal depolarizer.
    ///
    /// ```text
    /// Δ = 1 - sqrt(tr(MᵀM) - M00²) / (sqrt(3) M00)
    /// ```
    pub fn depolarization_index(&self) -> f64 {
        let m00 = self.inner[(0, 0)];
        if m00 == 0.0 {
            return 1.0;
        }

        let trace = (self.inner.transpose() * self.inner).trace();
        let numerator = (trace - m00 * m00).max(0.0).sqrt();
        (1.0 - numerator / (3f64.sqrt() * m00)).clamp(0.0, 1.0)
    }
}

impl Default for MuellerMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Cascades two elements. Light passes through `rhs` first.
impl std::ops::Mul for MuellerMatrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.inner * rhs.inner)
    }
}
