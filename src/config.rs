use crate::{
    crystal::Crystal, demo::Bench, error::Error, light::angle::PolarizerAngle,
    puzzle::PolarizerLock,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use uom::si::{f64::Length, length::nanometer};

/// Bench settings shared by the demos and the command line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Source intensity before the first element.
    pub i0: f64,
    pub wavelength_nm: f64,
    pub crystal: Crystal,
    pub lock: LockParams,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockParams {
    pub first_deg: f64,
    pub second_deg: f64,
    pub threshold: f64,
    pub password: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            i0: 100.0,
            wavelength_nm: 550.0,
            crystal: Crystal::CALCITE,
            lock: LockParams::default(),
        }
    }
}

impl Default for LockParams {
    fn default() -> Self {
        Self {
            first_deg: 45.0,
            second_deg: 135.0,
            threshold: PolarizerLock::DEFAULT_THRESHOLD,
            password: "malus".to_owned(),
        }
    }
}

impl LabConfig {
    /// Reads a config from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn wavelength(&self) -> Length {
        Length::new::<nanometer>(self.wavelength_nm)
    }

    /// Demo settings taken from this config.
    pub fn bench(&self) -> Bench {
        Bench {
            i0: self.i0,
            crystal: self.crystal,
            wavelength: self.wavelength(),
        }
    }
}

impl From<LockParams> for PolarizerLock {
    fn from(params: LockParams) -> Self {
        PolarizerLock::new(
            PolarizerAngle::from_degrees(params.first_deg),
            PolarizerAngle::from_degrees(params.second_deg),
            params.password,
        )
        .with_threshold(params.threshold)
    }
}
