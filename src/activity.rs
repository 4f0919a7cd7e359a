//! Optical activity of chiral solutions.

use crate::{
    error::Error,
    light::{angle::fold_half_turn, mueller::MuellerMatrix},
};
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::decimeter,
};

/// A dissolved substance that turns the plane of polarization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Substance {
    pub name: &'static str,
    /// Specific rotation in degrees per (g/mL · dm). Negative is levorotatory.
    pub specific_rotation: f64,
}

pub const SUBSTANCES: [Substance; 4] = [
    Substance {
        name: "sucrose",
        specific_rotation: 66.5,
    },
    Substance {
        name: "fructose",
        specific_rotation: -92.4,
    },
    Substance {
        name: "glucose",
        specific_rotation: 52.7,
    },
    Substance {
        name: "lactose",
        specific_rotation: 52.3,
    },
];

impl Substance {
    /// Finds a substance by name, ignoring case.
    pub fn lookup(name: &str) -> Result<Substance, Error> {
        SUBSTANCES
            .iter()
            .find(|substance| substance.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| Error::UnknownSubstance(name.to_owned()))
    }
}

/// A tube of solution on a polarimeter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solution {
    pub substance: Substance,
    /// Concentration in g/mL.
    pub concentration: f64,
    pub path_length: Length,
}

impl Solution {
    pub fn new(substance: Substance, concentration: f64, path_length: Length) -> Self {
        Self {
            substance,
            concentration,
            path_length,
        }
    }

    /// Rotation of the polarization plane, `[α] l c`.
    pub fn rotation(&self) -> Angle {
        Angle::new::<degree>(
            self.substance.specific_rotation
                * self.path_length.get::<decimeter>()
                * self.concentration,
        )
    }

    /// Polarization axis leaving the tube for light entering along `input`,
    /// folded onto [0, 180) degrees.
    pub fn output_angle(&self, input: Angle) -> Angle {
        fold_half_turn(input + self.rotation())
    }

    pub fn as_mueller(&self) -> MuellerMatrix {
        MuellerMatrix::rotator(self.rotation())
    }
}
