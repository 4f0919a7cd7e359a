//! Reflection and refraction at a flat boundary between two dielectrics.

use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

/// Refractive index of a lossless, isotropic medium.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefractiveIndex(f64);

impl RefractiveIndex {
    pub const AIR: Self = Self(1.0);
    pub const WATER: Self = Self(1.333);
    pub const GLASS: Self = Self(1.5);
    pub const DIAMOND: Self = Self(2.417);

    /// Returns an error unless `n` is positive and finite.
    pub fn new(n: f64) -> Result<Self, Error> {
        if !n.is_finite() || n <= 0.0 {
            return Err(Error::InvalidRefractiveIndex(n));
        }

        Ok(Self(n))
    }

    pub fn into_inner(self) -> f64 {
        self.0
    }
}

/// Fresnel amplitude and intensity coefficients for one angle of incidence.
///
/// `s` is polarized perpendicular to the plane of incidence, `p` parallel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fresnel {
    pub rs: f64,
    pub rp: f64,
    pub ts: f64,
    pub tp: f64,
    pub reflectance_s: f64,
    pub reflectance_p: f64,
    pub transmittance_s: f64,
    pub transmittance_p: f64,
    /// Angle of the refracted ray from the normal. 90 degrees under total internal reflection.
    pub refracted: Angle,
    pub total_internal_reflection: bool,
}

impl Fresnel {
    /// Reflectance for unpolarized light.
    pub fn reflectance(&self) -> f64 {
        (self.reflectance_s + self.reflectance_p) / 2.0
    }

    /// Transmittance for unpolarized light.
    pub fn transmittance(&self) -> f64 {
        (self.transmittance_s + self.transmittance_p) / 2.0
    }

    /// Degree of polarization of the reflected beam for unpolarized input.
    pub fn reflected_dop(&self) -> f64 {
        let total = self.reflectance_s + self.reflectance_p;
        if total == 0.0 {
            return 0.0;
        }

        (self.reflectance_s - self.reflectance_p).abs() / total
    }
}

/// Applies Snell's law, `n1 sin θ1 = n2 sin θ2`.
///
/// Returns `None` when `incidence` is beyond the critical angle.
pub fn snell(incidence: Angle, n1: RefractiveIndex, n2: RefractiveIndex) -> Option<Angle> {
    let sin_refracted = n1.0 / n2.0 * incidence.get::<radian>().sin();
    if sin_refracted > 1.0 {
        return None;
    }

    Some(Angle::new::<radian>(sin_refracted.asin()))
}

/// Computes the Fresnel coefficients for light incident at `incidence` from
/// a medium of index `n1` onto one of index `n2`.
pub fn fresnel(incidence: Angle, n1: RefractiveIndex, n2: RefractiveIndex) -> Fresnel {
    let Some(refracted) = snell(incidence, n1, n2) else {
        return Fresnel {
            rs: 1.0,
            rp: 1.0,
            ts: 0.0,
            tp: 0.0,
            reflectance_s: 1.0,
            reflectance_p: 1.0,
            transmittance_s: 0.0,
            transmittance_p: 0.0,
            refracted: Angle::new::<degree>(90.0),
            total_internal_reflection: true,
        };
    };

    let (n1, n2) = (n1.0, n2.0);
    let cos_i = incidence.get::<radian>().cos();
    let cos_t = refracted.get::<radian>().cos();

    let rs = (n1 * cos_i - n2 * cos_t) / (n1 * cos_i + n2 * cos_t);
    let ts = (2.0 * n1 * cos_i) / (n1 * cos_i + n2 * cos_t);
    let rp = (n2 * cos_i - n1 * cos_t) / (n2 * cos_i + n1 * cos_t);
    let tp = (2.0 * n1 * cos_i) / (n2 * cos_i + n1 * cos_t);

    // Transmitted power also scales with the beam's cross-section and speed.
    let factor = (n2 * cos_t) / (n1 * cos_i);

    Fresnel {
        rs,
        rp,
        ts,
        tp,
        reflectance_s: rs * rs,
        reflectance_p: rp * rp,
        transmittance_s: factor * ts * ts,
        transmittance_p: factor * tp * tp,
        refracted,
        total_internal_reflection: false,
    }
}

/// Angle of incidence at which p-polarized light is not reflected, `atan(n2 / n1)`.
pub fn brewster_angle(n1: RefractiveIndex, n2: RefractiveIndex) -> Angle {
    Angle::new::<radian>((n2.0 / n1.0).atan())
}

/// Smallest angle of incidence giving total internal reflection.
///
/// Returns `None` unless light travels into a less dense medium.
pub fn critical_angle(n1: RefractiveIndex, n2: RefractiveIndex) -> Option<Angle> {
    if n1.0 <= n2.0 {
        return None;
    }

    Some(Angle::new::<radian>((n2.0 / n1.0).asin()))
}
