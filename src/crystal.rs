use crate::light::intensity::Intensity;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    ratio::ratio,
};

/// A uniaxial birefringent crystal.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Crystal {
    /// Refractive index seen by the ordinary ray.
    pub n_o: f64,
    /// Refractive index seen by the extraordinary ray.
    pub n_e: f64,
}

impl Crystal {
    pub const CALCITE: Self = Self {
        n_o: 1.658,
        n_e: 1.486,
    };

    pub const QUARTZ: Self = Self {
        n_o: 1.544,
        n_e: 1.553,
    };

    pub fn birefringence(&self) -> f64 {
        self.n_o - self.n_e
    }

    /// Splits a beam polarized at `theta` to the principal section into its
    /// ordinary and extraordinary intensities.
    ///
    /// ```text
    /// I_o = I_0 cos²θ
    /// I_e = I_0 sin²θ
    /// ```
    pub fn split(&self, theta: Angle, i0: f64) -> (f64, f64) {
        let ordinary = Intensity::from_malus(theta).transmitted(i0);
        (ordinary, i0 - ordinary)
    }

    /// Phase lag between the two rays after `thickness` of crystal, folded
    /// onto [0, 360) degrees.
    ///
    /// ```text
    /// Δφ = (2π / λ) Δn d
    /// ```
    pub fn phase_retardation(&self, thickness: Length, wavelength: Length) -> Angle {
        let waves = self.birefringence() * (thickness / wavelength).get::<ratio>();
        // rem_euclid rounds tiny negative lags up to exactly 360.
        Angle::new::<degree>(((360.0 * waves) % 360.0 + 360.0) % 360.0)
    }

    /// Thinnest plate that acts as a quarter-wave plate at `wavelength`.
    pub fn quarter_wave_thickness(&self, wavelength: Length) -> Length {
        wavelength / (4.0 * self.birefringence().abs())
    }
}
