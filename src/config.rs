//! YAML configuration.
//!
//! ```yaml
//! max_depth: 128
//! include_non_public: false
//! excluded_paths:
//!   - "**/generated/**"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::analysis::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use crate::error::{Error, Result};

/// File names looked up in the working directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["flatjava.yaml", ".flatjava.yaml"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum statement/expression nesting accepted by parsing and traversal.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Glob patterns for paths to skip when expanding directories.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Also report methods of non-public classes.
    #[serde(default)]
    pub include_non_public: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            excluded_paths: Vec::new(),
            include_non_public: false,
        }
    }
}

impl Config {
    /// Parse and validate a configuration file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse_str(path, &content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn parse_str(path: &Path, content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Load `explicit` if given, otherwise the first discovered file,
    /// otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::parse_file(path);
        }
        let cwd = std::env::current_dir()?;
        match discover(&cwd) {
            Some(path) => Self::parse_file(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(Error::Config {
                path: path.to_path_buf(),
                message: format!("max_depth must be between 1 and {}", MAX_DEPTH_LIMIT),
            });
        }
        self.exclusions().map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(())
    }

    /// Compile `excluded_paths` into a single matcher.
    pub fn exclusions(&self) -> std::result::Result<GlobSet, String> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern)
                .map_err(|e| format!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
            builder.add(glob);
        }
        builder.build().map_err(|e| e.to_string())
    }

    /// Check a path against `excluded_paths`. Invalid patterns never match.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }
        self.exclusions()
            .map(|set| set.is_match(path))
            .unwrap_or(false)
    }
}

/// First configuration file in `dir`, falling back to the per-user config
/// directory (`~/.config/flatjava/flatjava.yaml` on Linux).
pub fn discover(dir: &Path) -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = dir.join(name);
        if path.is_file() {
            return Some(path);
        }
    }
    let user = ProjectDirs::from("", "", "flatjava")?
        .config_dir()
        .join(DEFAULT_CONFIG_NAMES[0]);
    user.is_file().then_some(user)
}
