//! Rayleigh scattering by particles much smaller than the wavelength.

use crate::light::dop::Dop;
use uom::si::{
    f64::{Angle, Length},
    length::nanometer,
    ratio::ratio,
};

/// Wavelength that `rayleigh_intensity` is normalized to.
pub const REFERENCE_WAVELENGTH_NM: f64 = 450.0;

/// Relative scattered intensity at `wavelength` and scattering angle `theta`.
///
/// ```text
/// I ∝ (450 nm / λ)⁴ (1 + cos²θ)
/// ```
pub fn rayleigh_intensity(wavelength: Length, theta: Angle) -> f64 {
    let lambda_factor = (REFERENCE_WAVELENGTH_NM / wavelength.get::<nanometer>()).powi(4);
    let cos = theta.cos().get::<ratio>();
    lambda_factor * (1.0 + cos * cos)
}

/// Degree of polarization of light scattered through `theta`.
///
/// Fully polarized at right angles to the source, unpolarized forward and back.
pub fn rayleigh_dop(theta: Angle) -> Dop {
    let sin = theta.sin().get::<ratio>();
    let cos = theta.cos().get::<ratio>();
    Dop::saturating(sin * sin / (1.0 + cos * cos))
}
