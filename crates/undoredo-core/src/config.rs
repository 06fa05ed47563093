use crate::UndoRedoResult;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tunables for a history manager.
///
/// Every field defaults, so an empty or partial TOML file is valid.
///
/// ```
/// use undoredo_core::HistoryConfig;
///
/// let config = HistoryConfig::from_toml_str("max_depth = 50").unwrap();
/// assert_eq!(config.max_depth, Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of commands kept on the undo stack. The oldest applied
    /// command is discarded once the cap is exceeded. `None` keeps everything;
    /// `Some(0)` disables history, so commands still execute but are never
    /// recorded and never clear redo history.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl HistoryConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/undoredo/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("undoredo/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("undoredo\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .map(Self::load_or_default)
            .unwrap_or_default()
    }

    /// Load from `path`, falling back to defaults when the file is missing or
    /// malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(path).unwrap_or_default()
    }

    pub fn load_from(path: impl AsRef<Path>) -> UndoRedoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> UndoRedoResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
