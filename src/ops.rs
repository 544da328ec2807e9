use serde::{Deserialize, Serialize};

use crate::config::EmbedConfig;
use crate::error::EmbedResult;

/// A single editing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    InsertText {
        index: usize,
        text: String,
    },
    InsertEmbed {
        index: usize,
        name: String,
        value: String,
    },
    /// Set (or with no value, remove) a format on the embed at `index`
    FormatEmbed {
        index: usize,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

/// Range of the document to serialize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HtmlRange {
    pub index: usize,
    pub length: usize,
}

/// A YAML editing script: optional configuration, operations, and output range.
///
/// ```yaml
/// ops:
///   - op: insertText
///     index: 0
///     text: "See "
///   - op: insertEmbed
///     index: 4
///     name: image
///     value: https://example.com/cat.png
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EmbedConfig>,
    pub ops: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<HtmlRange>,
}

pub fn parse_script(yaml: &str) -> EmbedResult<Script> {
    let script: Script = serde_yaml::from_str(yaml)?;
    if let Some(config) = &script.config {
        config.validate()?;
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmbedError;

    #[test]
    fn test_parse_script() {
        let yaml = r#"
ops:
  - op: insertText
    index: 0
    text: "a"
  - op: insertEmbed
    index: 1
    name: video
    value: ""
  - op: formatEmbed
    index: 1
    name: width
range:
  index: 0
  length: 3
"#;
        let script = parse_script(yaml).unwrap();
        assert_eq!(script.ops.len(), 3);
        assert_eq!(
            script.ops[2],
            Operation::FormatEmbed {
                index: 1,
                name: "width".to_string(),
                value: None,
            }
        );
        assert_eq!(script.range, Some(HtmlRange { index: 0, length: 3 }));
        assert!(script.config.is_none());
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let yaml = "ops:\n  - op: deleteText\n    index: 0\n";
        assert!(matches!(parse_script(yaml), Err(EmbedError::YamlError(_))));
    }

    #[test]
    fn test_script_config_is_validated() {
        let yaml = "config:\n  video:\n    protocols: []\nops: []\n";
        assert!(matches!(parse_script(yaml), Err(EmbedError::InvalidConfig(_))));
    }
}
