//! Configuration loading and parsing.
//!
//! Reads `corvid.toml` (or an override path provided by the binary). Every
//! section and field is optional; unknown fields are ignored so older files
//! keep loading. A file that fails to parse is reported and replaced by the
//! defaults rather than aborting startup.
//!
//! ```toml
//! [editor]
//! tab_size = 4
//! tab_expand = false
//! auto_indent = true
//!
//! [syntax]
//! language = "rust"
//!
//! [search]
//! history_limit = 100
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, io, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_size")]
    pub tab_size: usize,
    #[serde(default)]
    pub tab_expand: bool,
    #[serde(default = "EditorConfig::default_auto_indent")]
    pub auto_indent: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: Self::default_tab_size(),
            tab_expand: false,
            auto_indent: Self::default_auto_indent(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_size() -> usize {
        4
    }
    const fn default_auto_indent() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SyntaxConfig {
    /// Overrides detection from the document name when set.
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_history_limit")]
    pub history_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            history_limit: Self::default_history_limit(),
        }
    }
}

impl SearchConfig {
    const fn default_history_limit() -> usize {
        100
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub syntax: SyntaxConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
}

impl Config {
    /// Tab size used by the engine; a configured zero behaves as one.
    pub fn effective_tab_size(&self) -> usize {
        self.file.editor.tab_size.max(1)
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("corvid.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("corvid").join("corvid.toml");
    }
    PathBuf::from("corvid.toml")
}

/// Parse configuration text. Errors carry the TOML diagnostic.
pub fn parse(content: &str) -> Result<ConfigFile> {
    let file: ConfigFile = toml::from_str(content).context("parsing corvid.toml")?;
    if file.editor.tab_size == 0 {
        info!(target: "config", raw = 0, clamped = 1, "tab_size_clamped");
    }
    Ok(file)
}

/// Load from `path` (or the discovered location). A missing file yields the
/// defaults; an unreadable or malformed file is logged and also yields the
/// defaults.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_unreadable");
            return Ok(Config::default());
        }
    };
    match parse(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                path: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %format!("{e:#}"), "config_parse_failed");
            Ok(Config::default())
        }
    }
}
