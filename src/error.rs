use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("stokes vector is not realizable: S1²+S2²+S3² = {polarized} > S0² = {total}")]
    InvalidStokes { polarized: f64, total: f64 },
    #[error("expected {name} in range [0, 1] but got: {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },
    #[error("refractive index must be positive and finite but got: {0}")]
    InvalidRefractiveIndex(f64),
    #[error("no region registered as `{0}`")]
    UnknownRegion(String),
    #[error("no concept registered as `{0}`")]
    UnknownConcept(String),
    #[error("no demo registered as `{0}`")]
    UnknownDemo(String),
    #[error("no optically active substance named `{0}`")]
    UnknownSubstance(String),
    #[error("password does not match")]
    WrongPassword,
    #[error("lock cannot open while the polarizers block the light")]
    LockDark,
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
