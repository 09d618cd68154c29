//! Configuration provider using Figment

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, info, trace};

use crate::{
    discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery},
    error::ConfigError,
    types::MetaConfig,
    ConfigResult,
};

/// Prefix of environment variables read as configuration
pub const ENV_PREFIX: &str = "TBMETA_";

/// Separator between nested keys in environment variable names,
/// e.g. `TBMETA_CONTACT__EMAIL`
pub const ENV_SEPARATOR: &str = "__";

/// Loads [`MetaConfig`] from layered sources.
///
/// Sources in precedence order (later sources override earlier ones):
/// 1. Built-in defaults
/// 2. `~/.toolbox-meta/tbmeta.*`
/// 3. `./.toolbox-meta/tbmeta.*`
/// 4. A file named explicitly with [`with_file`](Self::with_file)
/// 5. `TBMETA_*` environment variables
///
/// Nothing is cached; every [`load`](Self::load) reads the files again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    explicit: Option<PathBuf>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom discovery, typically to point at test directories
    pub fn with_discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Merge `path` above every discovered file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<MetaConfig> {
        debug!("Loading configuration from all sources");

        let config: MetaConfig = self.build_figment()?.extract()?;
        config.validate()?;

        info!(
            overwrite = config.overwrite,
            date_format = %config.date_format,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    pub fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(MetaConfig::default()));

        for config_file in self.discovery.discover_all() {
            figment = figment.merge(Self::load_config_file(&config_file));
        }

        if let Some(path) = &self.explicit {
            figment = figment.merge(Self::load_config_file(&Self::explicit_file(path)?));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR)))
    }

    fn explicit_file(path: &Path) -> ConfigResult<ConfigFile> {
        if !path.is_file() {
            return Err(ConfigError::invalid_value(
                "config",
                format!("file not found: {}", path.display()),
            ));
        }
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            ConfigError::invalid_value(
                "config",
                format!("unsupported file type: {}", path.display()),
            )
        })?;
        Ok(ConfigFile::new(path.to_path_buf(), format, ConfigScope::Explicit))
    }

    fn load_config_file(config_file: &ConfigFile) -> Figment {
        trace!(
            "Loading config file: {} ({:?})",
            config_file.path.display(),
            config_file.format
        );
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn isolated(temp_dir: &TempDir) -> ConfigProvider {
        let discovery = FileDiscovery::with_directories(
            Some(temp_dir.path().join("project")),
            Some(temp_dir.path().join("global")),
        );
        ConfigProvider::new().with_discovery(discovery)
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = isolated(&temp_dir).load().unwrap();
        assert_eq!(config, MetaConfig::default());
    }

    #[test]
    #[serial]
    fn test_explicit_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = isolated(&temp_dir)
            .with_file(temp_dir.path().join("nope.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    #[serial]
    fn test_explicit_file_unsupported_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.ini");
        fs::write(&path, "overwrite=true").unwrap();
        let err = isolated(&temp_dir).with_file(path).load().unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tbmeta.toml");
        fs::write(&path, "overwrite = [").unwrap();
        let err = isolated(&temp_dir).with_file(path).load().unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    #[serial]
    fn test_invalid_value_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tbmeta.yaml");
        fs::write(&path, "date_format: \"%Y%\"\n").unwrap();
        let err = isolated(&temp_dir).with_file(path).load().unwrap_err();
        assert!(err.to_string().contains("date_format"));
    }
}
