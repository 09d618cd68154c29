//! Configuration file discovery
//!
//! Configuration files live in a `.toolbox-meta/` directory, either in the
//! user's home directory (global) or in the current directory (project).
//! Project files take precedence over global ones.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Name of the configuration directory in the home and project directories
pub const CONFIG_DIR_NAME: &str = ".toolbox-meta";

/// File names recognised inside a configuration directory, in merge order
pub const CONFIG_FILE_NAMES: [&str; 4] = ["tbmeta.toml", "tbmeta.yaml", "tbmeta.yml", "tbmeta.json"];

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
    pub scope: ConfigScope,
    /// Higher values take precedence
    pub priority: u8,
}

impl ConfigFile {
    pub fn new(path: PathBuf, format: ConfigFormat, scope: ConfigScope) -> Self {
        let priority = scope.priority();
        Self {
            path,
            format,
            scope,
            priority,
        }
    }
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }
}

/// Where a configuration file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `~/.toolbox-meta/`
    Global,
    /// `./.toolbox-meta/`
    Project,
    /// A file named explicitly, e.g. on the command line
    Explicit,
}

impl ConfigScope {
    /// Get priority value for this scope (higher values override lower ones)
    pub fn priority(self) -> u8 {
        match self {
            Self::Global => 10,
            Self::Project => 20,
            Self::Explicit => 30,
        }
    }
}

/// Finds configuration files in the global and project directories
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discovery rooted at the current directory and the home directory.
    ///
    /// Directories are resolved when [`discover_all`](Self::discover_all)
    /// runs, so a later change of working directory is honoured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovery over explicit directories instead of `./.toolbox-meta` and
    /// `~/.toolbox-meta`
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
        }
    }

    /// Discover all configuration files, lowest priority first
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let mut files = Vec::new();

        let project_dir = self.project_dir.clone().or_else(Self::resolve_project_dir);
        let global_dir = self.global_dir.clone().or_else(Self::resolve_global_dir);

        if let Some(ref global_dir) = global_dir {
            files.extend(self.search_directory(global_dir, ConfigScope::Global));
        }
        if let Some(ref project_dir) = project_dir {
            files.extend(self.search_directory(project_dir, ConfigScope::Project));
        }

        // stable: keeps file-name order within a scope
        files.sort_by_key(|f| f.priority);

        debug!("Discovered {} configuration files", files.len());
        for file in &files {
            trace!("Found config: {} ({:?})", file.path.display(), file.format);
        }
        files
    }

    fn search_directory(&self, dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        if !dir.exists() {
            debug!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }
        if !dir.is_dir() {
            warn!("Path exists but is not a directory: {}", dir.display());
            return Vec::new();
        }

        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .filter(|candidate| candidate.is_file())
            .filter_map(|candidate| {
                let format = ConfigFormat::from_path(&candidate)?;
                Some(ConfigFile::new(candidate, format, scope))
            })
            .collect()
    }

    fn resolve_project_dir() -> Option<PathBuf> {
        let dir = std::env::current_dir().ok()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }

    fn resolve_global_dir() -> Option<PathBuf> {
        let dir = dirs::home_dir()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("YML"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_config_scope_priority() {
        assert!(ConfigScope::Project.priority() > ConfigScope::Global.priority());
        assert!(ConfigScope::Explicit.priority() > ConfigScope::Project.priority());
    }

    #[test]
    fn test_search_directory_ignores_other_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("tbmeta.toml"), "overwrite = true").unwrap();
        fs::write(temp_dir.path().join("tbmeta.yaml"), "overwrite: true").unwrap();
        fs::write(temp_dir.path().join("config.toml"), "overwrite = true").unwrap();

        let files = FileDiscovery::new().search_directory(temp_dir.path(), ConfigScope::Project);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].format, ConfigFormat::Toml);
        assert_eq!(files[1].format, ConfigFormat::Yaml);
        assert!(files.iter().all(|f| f.scope == ConfigScope::Project));
    }

    #[test]
    fn test_search_directory_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let files = FileDiscovery::new()
            .search_directory(&temp_dir.path().join("missing"), ConfigScope::Global);
        assert!(files.is_empty());
    }

    #[test]
    fn test_file_priority_ordering() {
        let temp_dir = TempDir::new().unwrap();
        let global_dir = temp_dir.path().join("global");
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&global_dir).unwrap();
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(project_dir.join("tbmeta.json"), "{}").unwrap();
        fs::write(global_dir.join("tbmeta.toml"), "").unwrap();

        let discovery = FileDiscovery::with_directories(Some(project_dir), Some(global_dir));
        let files = discovery.discover_all();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].scope, ConfigScope::Global);
        assert_eq!(files[1].scope, ConfigScope::Project);
    }
}
