use regex::Regex;
use std::sync::OnceLock;

use crate::blot::Embed;
use crate::error::EmbedResult;
use crate::escape::escape_text;
use crate::node::Node;
use crate::sanitize::{safe_placeholder, sanitize_or, PLACEHOLDER};

const ATTRIBUTES: &[&str] = &["alt", "height", "width"];

pub const IMAGE_PROTOCOLS: &[&str] = &["http", "https", "data"];

static IMAGE_EXTENSION_REGEX: OnceLock<Regex> = OnceLock::new();
static IMAGE_DATA_URI_REGEX: OnceLock<Regex> = OnceLock::new();

/// Inline image embed rendered as `<img>`
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    protocols: Vec<String>,
    placeholder: String,
}

impl Default for Image {
    fn default() -> Self {
        Self::new(IMAGE_PROTOCOLS.iter().map(|p| p.to_string()).collect(), PLACEHOLDER)
    }
}

impl Image {
    /// An unsafe `placeholder` falls back to [`PLACEHOLDER`]
    pub fn new(protocols: Vec<String>, placeholder: &str) -> Self {
        Self {
            protocols,
            placeholder: safe_placeholder(placeholder).to_string(),
        }
    }

    pub fn sanitize<'a>(&'a self, url: &'a str) -> &'a str {
        sanitize_or(url, &self.protocols, &self.placeholder)
    }
}

impl Embed for Image {
    fn blot_name(&self) -> &'static str {
        "image"
    }

    fn tag_name(&self) -> &'static str {
        "IMG"
    }

    fn attributes(&self) -> &'static [&'static str] {
        ATTRIBUTES
    }

    fn create(&self, value: &str) -> EmbedResult<Node> {
        let mut node = self.create_node();
        node.set_attribute("src", self.sanitize(value));
        Ok(node)
    }

    fn value(&self, node: &Node) -> Option<String> {
        node.get_attribute("src").map(str::to_string)
    }

    fn html(&self, node: &Node) -> String {
        let value = node.get_attribute("src").unwrap_or("");
        let src = escape_text(self.sanitize(value));
        let attributes: String = ATTRIBUTES
            .iter()
            .filter_map(|attr| node.get_attribute(attr).map(|v| (attr, v)))
            .map(|(attr, v)| format!(" {}=\"{}\"", attr, escape_text(v)))
            .collect();
        format!("<img src=\"{}\"{}>", src, attributes)
    }

    fn matches(&self, url: &str) -> bool {
        let extension = IMAGE_EXTENSION_REGEX
            .get_or_init(|| Regex::new(r"(?i)\.(jpe?g|gif|png)$").unwrap());
        let data_uri = IMAGE_DATA_URI_REGEX
            .get_or_init(|| Regex::new(r"^data:image/.+;base64").unwrap());
        extension.is_match(url) || data_uri.is_match(url)
    }
}
