use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use super::types::{ConfigError, ServerConfig};

/// Holds a [`ServerConfig`] that is loaded at most once.
///
/// The first caller that finds the cell empty loads the file while holding
/// the init lock; concurrent callers wait on the lock and then see the cached
/// value. A failed load leaves the cell empty and returns the error.
pub struct ConfigCell {
    config: OnceLock<ServerConfig>,
    init: Mutex<()>,
}

impl ConfigCell {
    pub const fn new() -> Self {
        Self {
            config: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    pub fn get(&self) -> Option<&ServerConfig> {
        self.config.get()
    }

    /// Return the cached config, loading it from `path` on first use.
    /// `path` is ignored once a config has been loaded.
    pub fn get_or_load(&self, path: Option<&Path>) -> Result<&ServerConfig, ConfigError> {
        self.get_or_try_init(|| super::load_config(path))
    }

    fn get_or_try_init(
        &self,
        load: impl FnOnce() -> Result<ServerConfig, ConfigError>,
    ) -> Result<&ServerConfig, ConfigError> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }

        // The guarded section holds no data, so a poisoned lock is still usable.
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = self.config.get() {
            return Ok(config);
        }

        let config = load()?;
        Ok(self.config.get_or_init(|| config))
    }
}

impl Default for ConfigCell {
    fn default() -> Self {
        Self::new()
    }
}
