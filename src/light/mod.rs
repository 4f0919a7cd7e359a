//! Polarization state of light and the elements that act on it.

pub mod angle;
pub mod aop;
pub mod chain;
pub mod dop;
pub mod intensity;
pub mod mueller;
pub mod stokes;
