use crate::light::{
    angle::PolarizerAngle,
    intensity::{Intensity, transmission},
};

/// Describes the light entering a [`PolarizerChain`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    /// Natural light. An ideal polarizer passes half of it.
    Unpolarized,

    /// Linearly polarized light along the given axis.
    Polarized(PolarizerAngle),
}

/// A sequence of ideal linear polarizers on an optical bench.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolarizerChain {
    polarizers: Vec<PolarizerAngle>,
}

impl PolarizerChain {
    pub fn new(polarizers: Vec<PolarizerAngle>) -> Self {
        Self { polarizers }
    }

    pub fn push(&mut self, polarizer: PolarizerAngle) {
        self.polarizers.push(polarizer);
    }

    pub fn polarizers(&self) -> &[PolarizerAngle] {
        &self.polarizers
    }

    /// Returns the fraction of `input` that leaves the last polarizer.
    pub fn transmit(&self, input: Input) -> Intensity {
        let Some((first, rest)) = self.polarizers.split_first() else {
            return Intensity::full();
        };

        let entry = match input {
            Input::Unpolarized => Intensity::half(),
            Input::Polarized(axis) => transmission(axis, *first),
        };

        rest.iter()
            .scan(*first, |previous, next| {
                let step = transmission(*previous, *next);
                *previous = *next;
                Some(step)
            })
            .fold(entry, |acc, step| acc * step)
    }
}
