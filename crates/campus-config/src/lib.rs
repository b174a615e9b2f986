//! # campus-config
//!
//! Layered configuration loading for Campus using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CAMPUS_*` prefix, `__` as separator)
//! 2. Project-level `.campus/config.toml`
//! 3. User-level `~/.config/campus/config.toml`
//! 4. Built-in defaults
//!
//! `CAMPUS_API__BASE_URL` maps to `api.base_url`,
//! `CAMPUS_FORMS__DUPLICATE_REGISTRATION` to `forms.duplicate_registration`.
//!
//! ```no_run
//! use campus_config::CampusConfig;
//!
//! let config = CampusConfig::load_with_dotenv().expect("config");
//! if config.api.is_configured() {
//!     println!("API: {}", config.api.base_url);
//! }
//! ```

mod api;
mod error;
mod forms;
mod general;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use forms::FormsConfig;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "CAMPUS_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CampusConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub forms: FormsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CampusConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; use [`CampusConfig::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` into the process environment, then [`CampusConfig::load`].
    ///
    /// # Errors
    ///
    /// See [`CampusConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the provider chain. Public so tests can layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".campus/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("campus").join("config.toml"))
    }

    /// Load `.env` from the current directory or its ancestors. Silently
    /// does nothing if there is none.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
