//! Configuration loading.
//!
//! Settings come from a `.nestmap.toml` found in the working directory
//! or one of its ancestors. Command-line flags override file values;
//! a file that fails to parse warns and falls back to defaults rather
//! than aborting the run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".nestmap.toml";

/// How many ancestor directories are searched for a config file.
const MAX_TRAVERSAL_DEPTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestmapConfig {
    /// Minimum complexity an `if` must reach to be reported.
    pub min_complexity: u32,
    /// Number of issues shown in text output.
    pub top: usize,
    /// Leave `is_none()`-style guard conditions out of scoring.
    pub skip_none_guards: bool,
    /// Glob patterns for paths that are never checked.
    pub exclude: Vec<String>,
}

impl Default for NestmapConfig {
    fn default() -> Self {
        Self {
            min_complexity: 1,
            top: 10,
            skip_none_guards: false,
            exclude: vec![],
        }
    }
}

pub fn parse_config(contents: &str) -> Result<NestmapConfig> {
    toml::from_str(contents)
        .map_err(|e| Error::Config(format!("failed to parse {CONFIG_FILE_NAME}: {e}")))
}

/// Walk `start` and its ancestors for the nearest config file.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the nearest config, defaulting when none exists or the file
/// does not parse.
pub fn load_config(start: &Path) -> NestmapConfig {
    let Some(path) = find_config_file(start) else {
        log::debug!("no {CONFIG_FILE_NAME} found, using defaults");
        return NestmapConfig::default();
    };

    match read_config(&path) {
        Ok(config) => {
            log::debug!("loaded config from {}", path.display());
            config
        }
        Err(err) => {
            log::warn!("{err}; using defaults");
            NestmapConfig::default()
        }
    }
}

fn read_config(path: &Path) -> Result<NestmapConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}
