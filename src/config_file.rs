//! Config-file discovery and parsing (SPEC_FULL.md §6.2). XDG search order,
//! TOML-backed with typed per-module overlay tables instead of a flat INI
//! key/value map.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::config::{RhpOverrides, TtoOverrides};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub rhp: RhpOverrides,
    pub tto: TtoOverrides,
}

impl ConfigFile {
    /// Search order: `$XDG_CONFIG_HOME/textkit/config.toml` (or
    /// `~/.config/textkit/config.toml`), then `~/.textkitrc`.
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if cfg!(windows) {
            if let Ok(appdata) = env::var("APPDATA") {
                paths.push(PathBuf::from(appdata).join("textkit").join("config.toml"));
            }
            if let Ok(userprofile) = env::var("USERPROFILE") {
                paths.push(PathBuf::from(userprofile).join(".textkitrc"));
            }
        } else {
            let xdg_config = env::var("XDG_CONFIG_HOME").map(PathBuf::from).unwrap_or_else(|_| {
                env::var("HOME")
                    .map(|h| PathBuf::from(h).join(".config"))
                    .unwrap_or_else(|_| PathBuf::from(".config"))
            });
            paths.push(xdg_config.join("textkit").join("config.toml"));
            if let Ok(home) = env::var("HOME") {
                paths.push(PathBuf::from(home).join(".textkitrc"));
            }
        }

        paths
    }

    /// Resolves the effective path: `--config`/`TEXTKIT_CONFIG` wins over
    /// the discovered search order (§6.2 "highest priority").
    pub fn resolve_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(PathBuf::from(p));
        }
        if let Ok(p) = env::var("TEXTKIT_CONFIG") {
            return Some(PathBuf::from(p));
        }
        Self::get_config_paths().into_iter().find(|p| p.exists())
    }

    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_rhp_and_tto_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rhp]").unwrap();
        writeln!(file, "max_depth = 100").unwrap();
        writeln!(file, "preset = \"strict\"").unwrap();
        writeln!(file, "[tto]").unwrap();
        writeln!(file, "density = 0.5").unwrap();
        file.flush().unwrap();

        let config = ConfigFile::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.rhp.max_depth, Some(100));
        assert_eq!(config.rhp.preset.as_deref(), Some("strict"));
        assert_eq!(config.tto.density, Some(0.5));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = ConfigFile::load(Some("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.rhp.max_depth, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rhp]").unwrap();
        writeln!(file, "max_depth = 50").unwrap();
        writeln!(file, "not_a_real_key = true").unwrap();
        file.flush().unwrap();

        let config = ConfigFile::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.rhp.max_depth, Some(50));
    }
}
