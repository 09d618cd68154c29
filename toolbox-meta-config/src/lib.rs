//! Configuration management for toolbox-meta using Figment
//!
//! Settings that shape generated metadata (date formats, contact details,
//! custom schemas and attribute overrides) are layered from several sources:
//!
//! - Built-in defaults
//! - Global: `~/.toolbox-meta/tbmeta.{toml,yaml,yml,json}`
//! - Project: `./.toolbox-meta/tbmeta.{toml,yaml,yml,json}`
//! - An explicit file, usually from `--config`
//! - `TBMETA_*` environment variables, with `__` between nested keys
//!
//! Later sources override earlier ones.
//!
//! # Quick Start
//!
//! ```no_run
//! use toolbox_meta_config::load_config;
//!
//! let config = load_config()?;
//! let options = config.generator_options();
//! println!("dates formatted as {}", options.date_format);
//! # Ok::<(), toolbox_meta_config::ConfigError>(())
//! ```
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! overwrite = true
//! help_path = "https://example.org/help/gp"
//!
//! [contact]
//! name = "Hydrology Team"
//! organization = "Regional Survey"
//! email = "gis@example.org"
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! export TBMETA_OVERWRITE=true
//! export TBMETA_CONTACT__EMAIL=gis@example.org
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::ConfigError;
pub use provider::{ConfigProvider, ENV_PREFIX, ENV_SEPARATOR};
pub use types::MetaConfig;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load configuration from the standard locations and the environment
pub fn load_config() -> ConfigResult<MetaConfig> {
    ConfigProvider::new().load()
}
