//! Grapher configuration and loader.
//!
//! Settings come from an optional TOML file. Every field has a default, so a
//! partial file only overrides what it names.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "ES_GRAPHER_CONFIG";

/// Config file picked up from the working directory when no override is set.
pub const DEFAULT_CONFIG_FILE: &str = "es_grapher.toml";

/// Options that change what gets graphed and how it looks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrapherConfig {
    /// Replace each event's label with a dump of its body.
    pub show_event_code: bool,
    /// Graph `++`/`--` and assignment effects.
    pub effect_variables: bool,
    /// Node and edge colors.
    pub colors: Palette,
}

impl Default for GrapherConfig {
    fn default() -> Self {
        Self {
            show_event_code: false,
            effect_variables: true,
            colors: Palette::default(),
        }
    }
}

/// Fill and line colors, as Graphviz color strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Fill of event nodes and external event placeholders.
    pub event: String,
    /// Fill of story missions and external mission placeholders.
    pub mission: String,
    /// Fill of missions carrying a `job` child.
    pub job: String,
    /// Fill of `or` group nodes.
    pub or: String,
    /// Fill of `and` group nodes.
    pub and: String,
    /// Line color of `has` edges.
    pub line_has: String,
    /// Line color of `not` edges.
    pub line_not: String,
    /// Outline of assignment nodes built from effects.
    pub exec_expression: String,
    /// Outline of comparison nodes built from conditions.
    pub eval_expression: String,
    /// Fill of external variable placeholders.
    pub variable: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            event: "#88FF88".to_string(),
            mission: "#EECC77".to_string(),
            job: "#9197f2".to_string(),
            or: "#efc9ed".to_string(),
            and: "#f2a991".to_string(),
            line_has: "#000000".to_string(),
            line_not: "#EE3333".to_string(),
            exec_expression: "#b5b5b5".to_string(),
            eval_expression: "#b5b5b5".to_string(),
            variable: "#bada55".to_string(),
        }
    }
}

/// Where the config should come from: `$ES_GRAPHER_CONFIG`, then `./es_grapher.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Load the config from its usual location, falling back to defaults.
///
/// # Logging
/// - `info!` naming the file that was loaded
/// - `warn!` if the file cannot be read or parsed (defaults are used instead)
pub fn load_config() -> GrapherConfig {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            info!("no config file found; using built-in defaults");
            GrapherConfig::default()
        },
    }
}

/// Load the config at `path`. This never fails; problems are logged and defaults returned.
pub fn load_config_from(path: &Path) -> GrapherConfig {
    match try_load_config(path) {
        Ok(config) => {
            info!("grapher config loaded from '{}'", path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load grapher config from '{}': {:#}. Using built-in defaults.",
                path.display(),
                e
            );
            GrapherConfig::default()
        },
    }
}

fn try_load_config(path: &Path) -> Result<GrapherConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading config from '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config from '{}'", path.display()))
}
