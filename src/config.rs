use serde::{Deserialize, Serialize};

use crate::error::{EmbedError, EmbedResult};
use crate::formats::formula::Formula;
use crate::formats::image::{Image, IMAGE_PROTOCOLS};
use crate::formats::video::{Video, VIDEO_PROTOCOLS};
use crate::sanitize::{is_safe_placeholder, PLACEHOLDER};
use crate::typeset::DEFAULT_ERROR_COLOR;

/// Embed layer configuration, usually loaded from YAML.
///
/// ```yaml
/// placeholder: "//:0"
/// image:
///   protocols: [http, https, data]
/// video:
///   protocols: [http, https]
/// formula:
///   enabled: true
///   errorColor: "#f00"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedConfig {
    /// Reference substituted for URLs with a disallowed scheme
    pub placeholder: String,
    pub image: UrlEmbedConfig,
    pub video: UrlEmbedConfig,
    pub formula: FormulaConfig,
}

/// Settings for URL-valued embeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlEmbedConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub protocols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormulaConfig {
    pub enabled: bool,
    pub error_color: String,
}

fn default_enabled() -> bool {
    true
}

fn protocols(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER.to_string(),
            image: UrlEmbedConfig {
                enabled: true,
                protocols: protocols(IMAGE_PROTOCOLS),
            },
            video: UrlEmbedConfig {
                enabled: true,
                protocols: protocols(VIDEO_PROTOCOLS),
            },
            formula: FormulaConfig::default(),
        }
    }
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            error_color: DEFAULT_ERROR_COLOR.to_string(),
        }
    }
}

impl EmbedConfig {
    /// Parse and validate a YAML configuration
    pub fn from_yaml(yaml: &str) -> EmbedResult<Self> {
        let config: EmbedConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EmbedResult<()> {
        if !is_safe_placeholder(&self.placeholder) {
            return Err(EmbedError::InvalidConfig(format!(
                "placeholder '{}' must be relative or use http/https",
                self.placeholder
            )));
        }

        validate_protocols("image", &self.image)?;
        validate_protocols("video", &self.video)?;

        if self.formula.error_color.trim().is_empty() {
            return Err(EmbedError::InvalidConfig(
                "formula.errorColor must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn image_format(&self) -> Image {
        Image::new(self.image.protocols.clone(), &self.placeholder)
    }

    pub fn video_format(&self) -> Video {
        Video::new(self.video.protocols.clone(), &self.placeholder)
    }

    /// Apply formula settings to an engine-backed formula format
    pub fn formula_format(&self, formula: Formula) -> Formula {
        formula.with_error_color(&self.formula.error_color)
    }
}

fn validate_protocols(name: &str, config: &UrlEmbedConfig) -> EmbedResult<()> {
    if !config.enabled {
        return Ok(());
    }
    if config.protocols.is_empty() {
        return Err(EmbedError::InvalidConfig(format!(
            "{}.protocols must list at least one scheme",
            name
        )));
    }
    for protocol in &config.protocols {
        let valid = protocol
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_lowercase())
            && protocol
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
        if !valid {
            return Err(EmbedError::InvalidConfig(format!(
                "{}.protocols: '{}' is not a lowercase URL scheme",
                name, protocol
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbedConfig::default();
        assert_eq!(config.placeholder, "//:0");
        assert_eq!(config.image.protocols, vec!["http", "https", "data"]);
        assert_eq!(config.video.protocols, vec!["http", "https"]);
        assert!(!config.formula.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r##"
video:
  protocols: [https]
formula:
  enabled: true
"##;
        let config = EmbedConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.video.protocols, vec!["https"]);
        assert!(config.video.enabled);
        assert_eq!(config.image.protocols, vec!["http", "https", "data"]);
        assert!(config.formula.enabled);
        assert_eq!(config.formula.error_color, "#f00");
    }

    #[test]
    fn test_invalid_protocol_rejected() {
        let yaml = "image:\n  protocols: [HTTP]\n";
        assert!(matches!(
            EmbedConfig::from_yaml(yaml),
            Err(EmbedError::InvalidConfig(_))
        ));

        let yaml = "image:\n  protocols: []\n";
        assert!(matches!(
            EmbedConfig::from_yaml(yaml),
            Err(EmbedError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unsafe_placeholder_rejected() {
        let yaml = "placeholder: \"javascript:alert(1)\"\n";
        assert!(matches!(
            EmbedConfig::from_yaml(yaml),
            Err(EmbedError::InvalidConfig(_))
        ));

        let yaml = "placeholder: /blank.gif\n";
        assert_eq!(EmbedConfig::from_yaml(yaml).unwrap().placeholder, "/blank.gif");
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            EmbedConfig::from_yaml("image: [unclosed"),
            Err(EmbedError::YamlError(_))
        ));
    }
}
