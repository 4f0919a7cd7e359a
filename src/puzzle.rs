//! Password lock that only opens while light reaches the sensor behind two
//! polarizers.

use crate::{
    error::Error,
    light::{
        angle::{PolarizerAngle, effective_angle},
        intensity::{Intensity, transmission},
    },
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};
use uom::si::f64::Angle;

/// Key the unlock flag is persisted under.
pub const UNLOCK_KEY: &str = "polarcraft.lock.unlocked";

/// Persistent boolean flags addressed by string keys.
pub trait UnlockStore {
    /// Returns the flag stored at `key`, or `false` if it was never set.
    fn get(&self, key: &str) -> Result<bool, Error>;

    fn set(&mut self, key: &str, value: bool) -> Result<(), Error>;
}

/// Flags held in memory for the lifetime of the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    flags: HashMap<String, bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnlockStore for MemoryStore {
    fn get(&self, key: &str) -> Result<bool, Error> {
        Ok(self.flags.get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), Error> {
        self.flags.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(feature = "serde")]
pub use file::JsonFileStore;

#[cfg(feature = "serde")]
mod file {
    use super::UnlockStore;
    use crate::error::Error;
    use std::{
        collections::BTreeMap,
        fs,
        io::ErrorKind,
        path::{Path, PathBuf},
    };

    /// Flags kept as a JSON object in a file on disk.
    ///
    /// A missing file reads as an empty store. Every `set` rewrites the file.
    #[derive(Clone, Debug)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read(&self) -> Result<BTreeMap<String, bool>, Error> {
            match fs::read_to_string(&self.path) {
                Ok(text) => Ok(serde_json::from_str(&text)?),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(err) => Err(err.into()),
            }
        }
    }

    impl UnlockStore for JsonFileStore {
        fn get(&self, key: &str) -> Result<bool, Error> {
            Ok(self.read()?.get(key).copied().unwrap_or(false))
        }

        fn set(&mut self, key: &str, value: bool) -> Result<(), Error> {
            let mut flags = self.read()?;
            flags.insert(key.to_owned(), value);
            fs::write(&self.path, serde_json::to_string_pretty(&flags)?)?;
            Ok(())
        }
    }
}

/// Two polarizers in front of a light sensor, guarding a password.
///
/// The second polarizer is the one the player turns. The lock accepts its
/// password only while the transmitted intensity reaches `threshold`.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarizerLock {
    pub first: PolarizerAngle,
    pub second: PolarizerAngle,
    /// Minimum transmitted fraction for the sensor to count as lit.
    pub threshold: f64,
    password: String,
    unlocked_at: Option<DateTime<Utc>>,
}

impl PolarizerLock {
    pub const DEFAULT_THRESHOLD: f64 = 0.95;

    pub fn new(first: PolarizerAngle, second: PolarizerAngle, password: impl Into<String>) -> Self {
        Self {
            first,
            second,
            threshold: Self::DEFAULT_THRESHOLD,
            password: password.into(),
            unlocked_at: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn set_second(&mut self, angle: PolarizerAngle) {
        self.second = angle;
    }

    pub fn rotate_second(&mut self, delta: Angle) {
        self.second = self.second.rotated(delta);
    }

    /// Separation between the two axes, in degrees.
    pub fn separation(&self) -> f64 {
        effective_angle(self.first, self.second).degrees()
    }

    pub fn intensity(&self) -> Intensity {
        transmission(self.first, self.second)
    }

    pub fn is_lit(&self) -> bool {
        self.intensity().into_inner() >= self.threshold
    }

    /// When this lock was last opened, if ever.
    pub fn unlocked_at(&self) -> Option<DateTime<Utc>> {
        self.unlocked_at
    }

    /// Whether `store` remembers the lock as opened.
    pub fn is_unlocked(store: &impl UnlockStore) -> Result<bool, Error> {
        store.get(UNLOCK_KEY)
    }

    /// Checks `attempt` against the password and, on success, persists the
    /// unlock flag in `store`.
    ///
    /// The password is compared first, so a wrong guess is reported as such
    /// even while the sensor is dark.
    pub fn try_password(
        &mut self,
        attempt: &str,
        store: &mut impl UnlockStore,
    ) -> Result<DateTime<Utc>, Error> {
        if attempt != self.password {
            debug!("rejected password attempt");
            return Err(Error::WrongPassword);
        }

        if !self.is_lit() {
            debug!(
                intensity = self.intensity().into_inner(),
                threshold = self.threshold,
                "password accepted but sensor is dark"
            );
            return Err(Error::LockDark);
        }

        store.set(UNLOCK_KEY, true)?;
        let now = Utc::now();
        self.unlocked_at = Some(now);
        info!(unlocked_at = %now, "polarizer lock opened");

        Ok(now)
    }
}

impl Default for PolarizerLock {
    /// Crossed polarizers at 45 and 135 degrees, so the sensor starts dark.
    fn default() -> Self {
        Self::new(
            PolarizerAngle::from_degrees(45.0),
            PolarizerAngle::from_degrees(135.0),
            "malus",
        )
    }
}
