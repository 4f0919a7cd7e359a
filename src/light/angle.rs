#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{angle::degree, f64::Angle};

/// Orientation of a polarizer's transmission axis.
///
/// The axis is a line rather than a vector, so the orientation is only
/// meaningful modulo 180 degrees. Any real angle is accepted.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarizerAngle {
    angle: Angle,
}

impl PolarizerAngle {
    pub fn new(angle: Angle) -> Self {
        Self { angle }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(Angle::new::<degree>(degrees))
    }

    /// Returns the orientation folded onto [0, 180) degrees.
    pub fn folded(&self) -> Angle {
        fold_half_turn(self.angle)
    }

    /// Returns a new `PolarizerAngle` turned by `delta`.
    pub fn rotated(self, delta: Angle) -> Self {
        Self::new(self.angle + delta)
    }

    pub fn degrees(&self) -> f64 {
        self.angle.get::<degree>()
    }

    pub fn into_inner(self) -> Angle {
        self.angle
    }
}

impl From<Angle> for PolarizerAngle {
    fn from(angle: Angle) -> Self {
        Self::new(angle)
    }
}

/// Separation between two polarizer axes.
///
/// Always between 0 and 90 degrees inclusive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectiveAngle {
    // Kept in degrees so the range holds exactly, without a radian round trip.
    degrees: f64,
}

impl EffectiveAngle {
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn into_inner(self) -> Angle {
        Angle::new::<degree>(self.degrees)
    }
}

/// Folds `angle` onto [0, 180) degrees, handling negative input.
pub fn fold_half_turn(angle: Angle) -> Angle {
    Angle::new::<degree>(fold_degrees(angle.get::<degree>()))
}

fn fold_degrees(degrees: f64) -> f64 {
    // rem_euclid can return exactly 180.0 for tiny negative input; this form cannot.
    ((degrees % 180.0) + 180.0) % 180.0
}

/// Computes the physically meaningful separation between two polarizer axes.
///
/// Both axes are folded onto [0, 180) and differences above 90 degrees are
/// reflected, since cos² is symmetric about a right angle.
pub fn effective_angle(p1: PolarizerAngle, p2: PolarizerAngle) -> EffectiveAngle {
    let a1 = fold_degrees(p1.degrees());
    let a2 = fold_degrees(p2.degrees());
    let diff = (a1 - a2).abs();
    let degrees = match diff > 90.0 {
        true => 180.0 - diff,
        false => diff,
    };

    EffectiveAngle { degrees }
}
