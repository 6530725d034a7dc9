//! Loading render configuration from TOML
//!
//! Top-level keys set the render parameters; an optional `[svg]` table sets
//! output options. Missing keys keep their defaults.
//!
//! ```toml
//! size = 256
//! margin = 8
//! error_correction = "H"
//! foreground = "#112233"
//!
//! [svg]
//! standalone = true
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::RenderParams;
use crate::renderer::SvgConfig;
use crate::RenderConfig;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// TOML structure for deserializing a render configuration
#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlConfig {
    #[serde(flatten)]
    params: RenderParams,
    svg: SvgConfig,
}

impl RenderConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        Ok(RenderConfig {
            params: parsed.params,
            svg: parsed.svg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::EcLevel;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = RenderConfig::from_toml_str("").expect("Should parse");
        assert_eq!(config.params, RenderParams::default());
        assert_eq!(config.svg, SvgConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r##"
size = 256
margin = 8.5
error_correction = "H"
foreground = "#112233"
background = "transparent"

[svg]
standalone = true
pretty_print = false
"##;
        let config = RenderConfig::from_toml_str(toml_str).expect("Should parse");
        assert_eq!(
            config.params,
            RenderParams::new()
                .with_size(256.0)
                .with_margin(8.5)
                .with_error_correction(EcLevel::H)
                .with_foreground("#112233")
                .with_background("transparent")
        );
        assert!(config.svg.standalone);
        assert!(!config.svg.pretty_print);
    }

    #[test]
    fn test_level_aliases() {
        let config = RenderConfig::from_toml_str(r#"error_correction = "quartile""#)
            .expect("Should parse");
        assert_eq!(config.params.error_correction, EcLevel::Q);
    }

    #[test]
    fn test_unknown_level_is_error() {
        let result = RenderConfig::from_toml_str(r#"error_correction = "Z""#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = RenderConfig::from_toml_str("this is not valid toml {{{{");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_error() {
        let result = RenderConfig::from_file(Path::new("/nonexistent/qr.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
