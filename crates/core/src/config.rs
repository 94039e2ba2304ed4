//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! services that need it. Request handlers never read environment variables;
//! they only see the paths captured here.

use crate::constants::{DEFAULT_DATA_PATH, DEFAULT_DENUNCIAS_PATH};
use crate::{DenunciaError, DenunciaResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_path: PathBuf,
    denuncias_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `data_path` points at the offense reference dataset, `denuncias_path`
    /// at the denuncia log (which may not exist yet).
    pub fn new(data_path: PathBuf, denuncias_path: PathBuf) -> DenunciaResult<Self> {
        if data_path.as_os_str().is_empty() {
            return Err(DenunciaError::InvalidInput(
                "data_path cannot be empty".into(),
            ));
        }
        if denuncias_path.as_os_str().is_empty() {
            return Err(DenunciaError::InvalidInput(
                "denuncias_path cannot be empty".into(),
            ));
        }

        Ok(Self {
            data_path,
            denuncias_path,
        })
    }

    /// Resolve a config from optional environment-style overrides, falling
    /// back to the crate defaults.
    pub fn from_env_values(
        data_path: Option<String>,
        denuncias_path: Option<String>,
    ) -> DenunciaResult<Self> {
        let data_path = non_empty(data_path).unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let denuncias_path =
            non_empty(denuncias_path).unwrap_or_else(|| DEFAULT_DENUNCIAS_PATH.to_string());
        Self::new(PathBuf::from(data_path), PathBuf::from(denuncias_path))
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn denuncias_path(&self) -> &Path {
        &self.denuncias_path
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
