use serde::{Deserialize, Serialize};

/// Markup node owned by a single blot.
///
/// Only attribute access and text content are exposed; there is no way to reach
/// a parent or sibling, so a blot's node can only be changed through its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
    attributes: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Node {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_uppercase(),
            class_name: None,
            attributes: Vec::new(),
            text: None,
        }
    }

    pub fn with_class(mut self, class_name: Option<&str>) -> Self {
        self.class_name = class_name.map(str::to_string);
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Set an attribute, keeping its original position when it already exists.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| key != name);
    }

    /// Attribute names in insertion order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(key, _)| key.as_str())
    }

    /// Rendered text content (e.g. a typeset formula glyph)
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_is_uppercased() {
        assert_eq!(Node::new("img").tag_name(), "IMG");
    }

    #[test]
    fn test_set_get_remove_attribute() {
        let mut node = Node::new("IMG");
        node.set_attribute("src", "a.png");
        node.set_attribute("alt", "first");
        node.set_attribute("alt", "second");
        assert_eq!(node.get_attribute("alt"), Some("second"));
        assert_eq!(node.attribute_names().collect::<Vec<_>>(), vec!["src", "alt"]);

        node.remove_attribute("alt");
        assert!(!node.has_attribute("alt"));
        assert!(node.has_attribute("src"));
    }

    #[test]
    fn test_class_and_text() {
        let mut node = Node::new("span").with_class(Some("ql-formula"));
        node.set_text("x^2");
        assert_eq!(node.class_name(), Some("ql-formula"));
        assert_eq!(node.text(), Some("x^2"));
    }
}
