// #![warn(missing_docs)]

//! Polarization Optics for PolarCraft

#[allow(missing_docs)]
pub mod error;

pub mod activity;
#[cfg(feature = "serde")]
pub mod config;
pub mod crystal;
pub mod demo;
pub mod discovery;
pub mod interface;
pub mod light;
pub mod puzzle;
pub mod scattering;

/// Types most callers need, re-exported in one place.
pub mod prelude {
    pub use crate::{
        demo::{Bench, Demo, DemoTable, curve},
        discovery::{ConceptRegistry, DiscoveryLog, WorldMap},
        error::Error,
        light::{
            angle::{EffectiveAngle, PolarizerAngle, effective_angle},
            chain::{Input, PolarizerChain},
            intensity::{Intensity, transmission},
            mueller::MuellerMatrix,
            stokes::StokesVec,
        },
        puzzle::{MemoryStore, PolarizerLock, UNLOCK_KEY, UnlockStore},
    };
}
