use crate::blot::{Embed, Scope};
use crate::error::EmbedResult;
use crate::escape::escape_text;
use crate::node::Node;
use crate::sanitize::{safe_placeholder, sanitize_or, PLACEHOLDER};

const ATTRIBUTES: &[&str] = &["height", "width"];

pub const VIDEO_PROTOCOLS: &[&str] = &["http", "https"];

/// Block-level video embed rendered as an `<iframe>` in the editor and
/// serialized as a link to the video.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    protocols: Vec<String>,
    placeholder: String,
}

impl Default for Video {
    fn default() -> Self {
        Self::new(VIDEO_PROTOCOLS.iter().map(|p| p.to_string()).collect(), PLACEHOLDER)
    }
}

impl Video {
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

impl Embed for Video {
    fn blot_name(&self) -> &'static str {
        "video"
    }

    fn tag_name(&self) -> &'static str {
        "IFRAME"
    }

    fn class_name(&self) -> Option<&'static str> {
        Some("ql-video")
    }

    fn scope(&self) -> Scope {
        Scope::Block
    }

    fn attributes(&self) -> &'static [&'static str] {
        ATTRIBUTES
    }

    fn create(&self, value: &str) -> EmbedResult<Node> {
        let mut node = self.create_node();
        node.set_attribute("frameborder", "0");
        node.set_attribute("allowfullscreen", "true");
        node.set_attribute("src", self.sanitize(value));
        Ok(node)
    }

    fn value(&self, node: &Node) -> Option<String> {
        node.get_attribute("src").map(str::to_string)
    }

    fn html(&self, node: &Node) -> String {
        let video = self.sanitize(node.get_attribute("src").unwrap_or(""));
        format!("<a href=\"{}\">{}</a>", escape_text(video), escape_text(video))
    }
}
