// src/config.rs

//! Configuration for font discovery, matching and synthetic styles.
//!
//! The structs deserialize from JSON with every field optional; missing fields
//! fall back to the `Default` impls below. The process-wide [`CONFIG`] is read
//! once, from the file named by `SYSFONT_CONFIG` when that variable is set.
//! Extra font directories can be appended with `SYSFONT_DIRS` (a path list in
//! the platform's `PATH` format).

use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "SYSFONT_CONFIG";
/// Environment variable with additional font directories.
pub const EXTRA_DIRS_ENV: &str = "SYSFONT_DIRS";

/// Global configuration, loaded lazily on first use.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load);

/// Root of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Where and how to look for installed fonts.
    pub catalog: CatalogConfig,
    /// Parameters of the synthetic bold/italic/underline effects.
    pub synthesis: SynthesisConfig,
}

/// Font discovery and matching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directories scanned recursively for font files. Empty means the
    /// platform defaults from [`default_font_dirs`].
    pub search_dirs: Vec<PathBuf>,
    /// File extensions (lowercase, without the dot) considered font files.
    pub extensions: Vec<String>,
    /// Allow substring matching when no candidate matches exactly.
    pub fuzzy_matching: bool,
    /// Alias groups appended to the built-in ones.
    pub extra_alias_groups: Vec<Vec<String>>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            search_dirs: Vec::new(),
            extensions: ["ttf", "otf", "ttc", "otc"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fuzzy_matching: true,
            extra_alias_groups: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// Directories to scan: configured ones (or platform defaults), followed
    /// by anything listed in `SYSFONT_DIRS`.
    pub fn effective_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = if self.search_dirs.is_empty() {
            default_font_dirs()
        } else {
            self.search_dirs.clone()
        };
        if let Some(extra) = env::var_os(EXTRA_DIRS_ENV) {
            dirs.extend(env::split_paths(&extra));
        }
        dirs
    }

    pub fn is_font_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.extensions.iter().any(|x| *x == e)
            })
            .unwrap_or(false)
    }
}

/// Synthetic style parameters, in pixels relative to the pixel size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Bold stroke widening as a fraction of the pixel size (ppem / 10).
    pub bold_factor: f32,
    /// Horizontal shear per pixel of height above the baseline.
    pub italic_shear: f32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            bold_factor: 0.1,
            italic_shear: 0.207,
        }
    }
}

impl SynthesisConfig {
    /// Bold overhang in whole pixels; never below one.
    pub fn bold_overhang(&self, px: f32) -> i32 {
        ((px * self.bold_factor).round() as i32).max(1)
    }
}

impl Config {
    fn load() -> Config {
        let Some(path) = env::var_os(CONFIG_PATH_ENV) else {
            return Config::default();
        };
        let path = PathBuf::from(path);
        match Self::from_file(&path) {
            Ok(config) => {
                info!("config: loaded {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "config: ignoring {} ({:#}), using defaults",
                    path.display(),
                    e
                );
                Config::default()
            }
        }
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> anyhow::Result<Config> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Well-known font directories for the current platform.
pub fn default_font_dirs() -> Vec<PathBuf> {
    let home = env::var_os("HOME").map(PathBuf::from);
    let mut dirs = Vec::new();

    if cfg!(target_os = "windows") {
        let windir = env::var_os("WINDIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("C:\\Windows"));
        dirs.push(windir.join("Fonts"));
        if let Some(local) = env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join("Microsoft\\Windows\\Fonts"));
        }
    } else if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = &home {
            dirs.push(home.join("Library/Fonts"));
        }
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(data) = env::var_os("XDG_DATA_HOME") {
            dirs.push(PathBuf::from(data).join("fonts"));
        } else if let Some(home) = &home {
            dirs.push(home.join(".local/share/fonts"));
        }
        if let Some(home) = &home {
            dirs.push(home.join(".fonts"));
        }
    }
    dirs
}
