use crate::blot::{EmbedBlot, Formats};
use crate::error::{EmbedError, EmbedResult};
use crate::ops::Operation;
use crate::registry::Registry;
use crate::scroll::Scroll;

/// Editing facade over a [`Scroll`] and the embeds registered for it
#[derive(Debug, Clone)]
pub struct Editor {
    registry: Registry,
    scroll: Scroll,
}

impl Editor {
    pub fn new(registry: Registry) -> Self {
        Self::with_scroll(registry, Scroll::new())
    }

    pub fn with_scroll(registry: Registry, scroll: Scroll) -> Self {
        Self { registry, scroll }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn scroll(&self) -> &Scroll {
        &self.scroll
    }

    pub fn get_length(&self) -> usize {
        self.scroll.length()
    }

    /// Create the embed named `name` from `value` and insert it at `index`.
    ///
    /// A creation error aborts this insertion only; the document is unchanged.
    pub fn insert_embed(&mut self, index: usize, name: &str, value: &str) -> EmbedResult<()> {
        let format = self
            .registry
            .query(name)
            .ok_or_else(|| EmbedError::UnknownFormat {
                name: name.to_string(),
            })?;
        let blot = EmbedBlot::create(format, value).map_err(|err| {
            tracing::debug!(name, error = %err, "embed creation failed");
            err
        })?;
        self.scroll.insert_embed(index, blot)
    }

    pub fn insert_text(&mut self, index: usize, text: &str) -> EmbedResult<()> {
        self.scroll.insert_text(index, text)
    }

    pub fn format_embed(&mut self, index: usize, name: &str, value: Option<&str>) -> EmbedResult<()> {
        let blot = self
            .scroll
            .embed_at_mut(index)
            .ok_or(EmbedError::NoEmbedAt { index })?;
        blot.format(name, value);
        Ok(())
    }

    pub fn embed_value(&self, index: usize) -> Option<String> {
        self.scroll.embed_at(index).and_then(EmbedBlot::value)
    }

    pub fn embed_formats(&self, index: usize) -> Option<Formats> {
        self.scroll.embed_at(index).map(EmbedBlot::formats)
    }

    /// Sanitized HTML for `length` positions starting at `index`
    pub fn get_html(&self, index: usize, length: usize) -> String {
        self.scroll.html(index, length)
    }

    pub fn apply(&mut self, op: &Operation) -> EmbedResult<()> {
        match op {
            Operation::InsertText { index, text } => self.insert_text(*index, text),
            Operation::InsertEmbed { index, name, value } => self.insert_embed(*index, name, value),
            Operation::FormatEmbed { index, name, value } => {
                self.format_embed(*index, name, value.as_deref())
            }
        }
    }

    pub fn apply_all(&mut self, ops: &[Operation]) -> EmbedResult<()> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::Formula;
    use crate::typeset::PlainTypesetter;
    use std::sync::Arc;

    #[test]
    fn test_unknown_format() {
        let mut editor = Editor::new(Registry::with_defaults());
        assert_eq!(
            editor.insert_embed(0, "audio", "a.mp3").unwrap_err(),
            EmbedError::UnknownFormat {
                name: "audio".to_string()
            }
        );
        assert_eq!(editor.get_length(), 1);
    }

    #[test]
    fn test_failed_creation_leaves_document_unchanged() {
        let mut registry = Registry::with_defaults();
        registry.register(Formula::default());
        let mut editor = Editor::new(registry);
        editor.insert_text(0, "x").unwrap();

        let before = editor.get_html(0, editor.get_length());
        assert_eq!(
            editor.insert_embed(0, "formula", "a^2").unwrap_err(),
            EmbedError::TypesetterUnavailable
        );
        assert_eq!(editor.get_html(0, editor.get_length()), before);
        assert_eq!(editor.get_length(), 2);
    }

    #[test]
    fn test_format_embed() {
        let mut editor = Editor::new(Registry::with_defaults());
        editor.insert_embed(0, "image", "a.png").unwrap();
        editor.format_embed(0, "alt", Some("cat")).unwrap();
        assert_eq!(editor.get_html(0, 2), "<p><img src=\"a.png\" alt=\"cat\"></p>");
        assert_eq!(
            editor.format_embed(1, "alt", Some("x")).unwrap_err(),
            EmbedError::NoEmbedAt { index: 1 }
        );
    }

    #[test]
    fn test_embed_value_and_formats() {
        let mut registry = Registry::with_defaults();
        registry.register(Formula::new(Arc::new(PlainTypesetter)));
        let mut editor = Editor::new(registry);
        editor.insert_embed(0, "formula", "e^{i\\pi}").unwrap();
        assert_eq!(editor.embed_value(0).as_deref(), Some("e^{i\\pi}"));
        assert_eq!(editor.embed_formats(0), Some(Formats::new()));
        assert_eq!(editor.embed_value(1), None);
    }

    #[test]
    fn test_apply_operations() {
        let mut editor = Editor::new(Registry::with_defaults());
        let ops = vec![
            Operation::InsertText {
                index: 0,
                text: "ab".to_string(),
            },
            Operation::InsertEmbed {
                index: 1,
                name: "image".to_string(),
                value: "javascript:alert(1)".to_string(),
            },
            Operation::FormatEmbed {
                index: 1,
                name: "width".to_string(),
                value: Some("10".to_string()),
            },
        ];
        editor.apply_all(&ops).unwrap();
        assert_eq!(
            editor.get_html(0, editor.get_length()),
            "<p>a<img src=\"//:0\" width=\"10\">b</p>"
        );
    }
}
