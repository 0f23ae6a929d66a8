//! Optional TOML configuration for a memory root.
//!
//! # Responsibility
//! - Load `daynote.toml` (or an explicit file) into typed settings.
//! - Resolve settings into a [`MemoryLayout`].
//!
//! # Invariants
//! - Every setting is optional; an absent default file means defaults.
//! - Relative paths resolve against the memory root, not the process cwd.

use crate::layout::MemoryLayout;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Config file looked up in the root when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "daynote.toml";
/// Default log directory, relative to the root.
pub const DEFAULT_LOG_DIR: &str = ".daynote/logs";

/// Configuration loading error.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// User-facing settings, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding day files.
    pub memory_dir: Option<PathBuf>,
    /// Markdown document carrying the template region.
    pub template_path: Option<PathBuf>,
    /// Directory for rotating log files.
    pub log_dir: Option<PathBuf>,
    /// `trace|debug|info|warn|error`.
    pub log_level: Option<String>,
    /// Default hit cap for search.
    pub search_limit: Option<usize>,
}

impl Config {
    /// Parses config text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads config for `root`.
    ///
    /// With `explicit` set the file must exist. Otherwise `root/daynote.toml`
    /// is read when present and defaults are returned when it is not.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (root.join(CONFIG_FILE_NAME), false),
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Builds the filesystem layout for `root` with overrides applied.
    pub fn layout(&self, root: impl Into<PathBuf>) -> MemoryLayout {
        let mut layout = MemoryLayout::new(root);
        if let Some(dir) = &self.memory_dir {
            layout.memory_dir = layout.resolve(dir);
        }
        if let Some(path) = &self.template_path {
            layout.template_path = layout.resolve(path);
        }
        layout
    }

    /// Returns the log directory resolved against `layout.root`.
    pub fn log_dir(&self, layout: &MemoryLayout) -> PathBuf {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        layout.resolve(&dir)
    }
}
