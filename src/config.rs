//! Configuration file support
//!
//! Settings for the drawing tool and the blueprint loaded at startup, read
//! from TOML. Missing keys fall back to the built-in defaults below.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default configuration
const DEFAULT_CONFIG: &str = r#"
[drawing]
# Inkscape-compatible executable, looked up on PATH
command = "inkscape"
# Where figure assets are created, relative to the working directory
figures_dir = "figures"
# Export pdf + pdf_tex after the editor exits
export_latex = true
# Blank canvas size in points
canvas_width = 240.0
canvas_height = 120.0

[blueprint]
# path = "blueprint.json"
"#;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub drawing: DrawingConfig,
    #[serde(default)]
    pub blueprint: BlueprintSource,
}

/// Drawing-tool settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub command: String,
    pub figures_dir: PathBuf,
    pub export_latex: bool,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

/// Which blueprint to load at startup; the built-in one when unset
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlueprintSource {
    pub path: Option<PathBuf>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            command: "inkscape".to_string(),
            figures_dir: PathBuf::from("figures"),
            export_latex: true,
            canvas_width: 240.0,
            canvas_height: 120.0,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` if given, else use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_str(DEFAULT_CONFIG).expect("Default config should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.drawing, DrawingConfig::default());
        assert_eq!(config.blueprint.path, None);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_str(
            r#"
[drawing]
command = "/opt/inkscape/bin/inkscape"
export_latex = false
"#,
        )
        .expect("Should parse");
        assert_eq!(config.drawing.command, "/opt/inkscape/bin/inkscape");
        assert!(!config.drawing.export_latex);
        assert_eq!(config.drawing.figures_dir, PathBuf::from("figures"));
    }

    #[test]
    fn test_blueprint_path() {
        let config = Config::from_str(
            r#"
[blueprint]
path = "thesis.json"
"#,
        )
        .expect("Should parse");
        assert_eq!(config.blueprint.path, Some(PathBuf::from("thesis.json")));
        assert_eq!(config.drawing, DrawingConfig::default());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").expect("Should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Config::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
