use crate::error::Error;
use crate::light::angle::{EffectiveAngle, PolarizerAngle, effective_angle};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{f64::Angle, ratio::ratio};

/// Fraction of the incident intensity that a polarizer transmits.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Intensity {
    fraction: f64,
}

impl Intensity {
    /// Creates a new `Intensity` from `fraction`.
    ///
    /// Returns an error if `fraction` is not between 0.0 and 1.0.
    pub fn new(fraction: f64) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::OutOfUnitRange {
                name: "intensity",
                value: fraction,
            });
        }

        Ok(Self { fraction })
    }

    /// All of the incident light.
    pub fn full() -> Self {
        Self { fraction: 1.0 }
    }

    /// What an ideal polarizer passes of natural light.
    pub fn half() -> Self {
        Self { fraction: 0.5 }
    }

    /// None of the incident light.
    pub fn dark() -> Self {
        Self { fraction: 0.0 }
    }

    /// Applies Malus's law, `I = cos²θ`.
    ///
    /// Total over every real angle. Cosine re-wraps angles outside [0, 90]
    /// degrees on its own, so folding first is only needed for display.
    pub fn from_malus(theta: Angle) -> Self {
        let cos = theta.cos().get::<ratio>();
        Self { fraction: cos * cos }
    }

    /// Scales the fraction by a source intensity `i0`.
    pub fn transmitted(&self, i0: f64) -> f64 {
        i0 * self.fraction
    }

    /// Transmission efficiency as a percentage.
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }

    pub fn into_inner(self) -> f64 {
        self.fraction
    }
}

impl From<EffectiveAngle> for Intensity {
    fn from(theta: EffectiveAngle) -> Self {
        Self::from_malus(theta.into_inner())
    }
}

impl std::ops::Mul for Intensity {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Self {
            fraction: self.fraction * other.fraction,
        }
    }
}

/// Fraction of polarized light passed by an analyzer at `p2` when the light
/// was polarized by a polarizer at `p1`.
pub fn transmission(p1: PolarizerAngle, p2: PolarizerAngle) -> Intensity {
    effective_angle(p1, p2).into()
}
