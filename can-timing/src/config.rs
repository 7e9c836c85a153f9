use std::{collections::HashMap, fs::read_to_string, path::Path};
use serde::Deserialize;
use crate::constant::{PROFILES_CFG_FILENAME, TIMING_ENV, TIMING_VAR};
use crate::device::{DeviceCapability, TimingRequest};
use crate::error::TimingError;
use crate::solver::Solution;

/// The deserialize object mapped to the capability profile file.
///
/// ```yaml
/// sja1000:
///   clock: 16000000
///   min_ps: 1
///   max_ps: 64
///   ...
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CapabilityProfiles(HashMap<String, DeviceCapability>);

impl CapabilityProfiles {
    /// Load the profile file, its directory is taken from `CAN_TIMING_PROFILES` in `can-timing.env`.
    pub fn load() -> Result<Self, TimingError> {
        let path = match dotenvy::from_filename(TIMING_ENV) {
            Ok(_) => match std::env::var(TIMING_VAR) {
                Ok(v) => format!("{}/{}", v, PROFILES_CFG_FILENAME),
                Err(_) => PROFILES_CFG_FILENAME.into(),
            },
            Err(e) => {
                log::warn!("CAN-TIMING - {} not loaded: {}, using {}", TIMING_ENV, e, PROFILES_CFG_FILENAME);
                PROFILES_CFG_FILENAME.into()
            },
        };

        Self::from_file(path)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TimingError> {
        let path = path.as_ref();
        let data = read_to_string(path)
            .map_err(|e| TimingError::ConfigReadFailed(format!("{}: {}", path.display(), e)))?;

        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> Result<Self, TimingError> {
        serde_yaml::from_str(data)
            .map_err(|e| TimingError::ConfigParseFailed(e.to_string()))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&DeviceCapability> {
        self.0.get(name)
    }

    /// Profile names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, capability: DeviceCapability) -> &mut Self {
        self.0.insert(name.into(), capability);
        self
    }

    /// Solve `request` for the named profile.
    pub fn solve(&self, name: &str, request: &TimingRequest) -> Result<Solution, TimingError> {
        let capability = self.get(name)
            .ok_or(TimingError::ProfileNotFound(name.into()))?;

        request.solve(capability)
    }
}
