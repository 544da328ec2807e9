use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EmbedResult;
use crate::formats::EmbedFormat;
use crate::node::Node;

/// Derived view of a blot's format attributes (name → value)
pub type Formats = BTreeMap<String, String>;

/// Where an embed lives in the document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Inside a paragraph, next to text runs
    Inline,
    /// A sibling of paragraphs
    Block,
}

/// Contract shared by every embeddable variant.
///
/// A variant builds its node in [`Embed::create`], reads the payload back with
/// [`Embed::value`] and serializes it with [`Embed::html`]. `html` is the only
/// place a variant may turn stored strings into markup, and it must escape and
/// sanitize everything it emits.
pub trait Embed {
    fn blot_name(&self) -> &'static str;

    fn tag_name(&self) -> &'static str;

    fn class_name(&self) -> Option<&'static str> {
        None
    }

    fn scope(&self) -> Scope {
        Scope::Inline
    }

    /// Attribute names `format` may set on the node
    fn attributes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Empty node carrying this variant's tag and class
    fn create_node(&self) -> Node {
        Node::new(self.tag_name()).with_class(self.class_name())
    }

    fn create(&self, value: &str) -> EmbedResult<Node>;

    fn value(&self, node: &Node) -> Option<String>;

    /// Set an allowlisted attribute, or remove it when `value` is missing or empty.
    /// Other names are handed to [`format_generic`].
    fn format(&self, node: &mut Node, name: &str, value: Option<&str>) {
        if is_allowed(self.attributes(), name) {
            match value.filter(|v| !v.is_empty()) {
                Some(v) => node.set_attribute(name, v),
                None => node.remove_attribute(name),
            }
        } else {
            format_generic(self.blot_name(), name, value);
        }
    }

    fn formats(&self, node: &Node) -> Formats {
        self.attributes()
            .iter()
            .filter_map(|attr| {
                node.get_attribute(attr)
                    .map(|v| (attr.to_string(), v.to_string()))
            })
            .collect()
    }

    fn html(&self, node: &Node) -> String;

    /// Whether a pasted or dropped URL should become this embed
    fn matches(&self, _url: &str) -> bool {
        false
    }
}

fn is_allowed(allowlist: &[&str], name: &str) -> bool {
    allowlist.iter().any(|attr| *attr == name)
}

/// Generic content-node formatting path for names outside an embed's allowlist.
///
/// Embeds register no attributors of their own, so the node is left unchanged.
pub fn format_generic(blot_name: &str, name: &str, value: Option<&str>) {
    tracing::trace!(blot = blot_name, format = name, ?value, "format not handled by embed");
}

/// An embed in the document: its variant plus the node it owns.
#[derive(Debug, Clone)]
pub struct EmbedBlot {
    format: EmbedFormat,
    node: Node,
}

impl EmbedBlot {
    /// Build a blot from a value. On error nothing is constructed.
    pub fn create(format: &EmbedFormat, value: &str) -> EmbedResult<Self> {
        let node = format.create(value)?;
        Ok(Self {
            format: format.clone(),
            node,
        })
    }

    pub fn blot_name(&self) -> &'static str {
        self.format.blot_name()
    }

    pub fn scope(&self) -> Scope {
        self.format.scope()
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn value(&self) -> Option<String> {
        self.format.value(&self.node)
    }

    pub fn format(&mut self, name: &str, value: Option<&str>) {
        self.format.format(&mut self.node, name, value);
    }

    pub fn formats(&self) -> Formats {
        self.format.formats(&self.node)
    }

    pub fn html(&self) -> String {
        self.format.html(&self.node)
    }
}
