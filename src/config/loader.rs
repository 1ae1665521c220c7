//! Configuration Loader
//!
//! Layered configuration loading built on the `config` crate: built-in defaults,
//! then an optional file (TOML, YAML or JSON, chosen by extension), then `CYRK_*`
//! environment variables. Nested keys use `__`, e.g. `CYRK_LOGGING__LEVEL=debug`.

use config::{Config, Environment, File};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use super::error::{ConfigResult, ConfigurationError};
use super::SystemConfig;
use crate::constants::env_vars;

/// Loaded, validated configuration plus where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: SystemConfig,
    environment: String,
    source_file: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the file named by `CYRK_CONFIG_PATH` (if any) and the process environment
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        let source_file = env::var(env_vars::CONFIG_PATH).ok().map(PathBuf::from);
        Self::load_from_file(source_file)
    }

    /// Load configuration from a specific file and the process environment
    pub fn load_from_file(source_file: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_env(source_file, None)
    }

    /// Load configuration with an explicit set of `CYRK_*` variables instead of the process environment
    ///
    /// Useful for tests, since the process environment is shared by concurrently running tests.
    pub fn load_with_env(
        source_file: Option<PathBuf>,
        env_overrides: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        let mut builder = Config::builder();

        if let Some(path) = &source_file {
            if !path.is_file() {
                return Err(ConfigurationError::source_error(
                    path.display().to_string(),
                    "not a readable file",
                ));
            }
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        let mut env_source = Environment::with_prefix(env_vars::PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        if let Some(vars) = env_overrides {
            env_source = env_source.source(Some(vars.into_iter().collect()));
        }
        builder = builder.add_source(env_source);

        let source_name = source_file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "environment".to_string());

        let config: SystemConfig = builder
            .build()
            .map_err(|e| ConfigurationError::source_error(source_name.clone(), e))?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            "Configuration loaded: {}",
            serde_json::to_string(&config).unwrap_or_else(|_| "[serialization error]".to_string())
        );

        crate::log_config!(info, "Configuration loaded successfully",
            environment: environment,
            source: source_name,
            workers: config.workers,
            client_timeout_ms: config.client_timeout_ms
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment,
            source_file,
        }))
    }

    /// Wrap an already-built configuration, validating it first
    pub fn from_config(config: SystemConfig) -> ConfigResult<Arc<ConfigManager>> {
        config.validate()?;
        Ok(Arc::new(ConfigManager {
            config,
            environment: Self::detect_environment(),
            source_file: None,
        }))
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn source_file(&self) -> Option<&PathBuf> {
        self.source_file.as_ref()
    }

    /// Current environment name from `CYRK_ENV`, defaulting to `development`
    pub fn detect_environment() -> String {
        env::var(env_vars::ENVIRONMENT).unwrap_or_else(|_| "development".to_string())
    }
}
