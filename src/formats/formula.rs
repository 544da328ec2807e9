use std::fmt;
use std::sync::Arc;

use crate::blot::Embed;
use crate::error::{EmbedError, EmbedResult};
use crate::escape::escape_text;
use crate::node::Node;
use crate::typeset::{RenderOptions, Typesetter, DEFAULT_ERROR_COLOR};

/// Inline formula embed.
///
/// The source is stored verbatim in `data-value`; the glyph drawn by the
/// typesetter is for display only and never serialized.
#[derive(Clone, Default)]
pub struct Formula {
    engine: Option<Arc<dyn Typesetter>>,
    error_color: Option<String>,
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula")
            .field("engine", &self.engine.as_ref().map(|_| "<typesetter>"))
            .field("error_color", &self.error_color)
            .finish()
    }
}

impl Formula {
    pub fn new(engine: Arc<dyn Typesetter>) -> Self {
        Self {
            engine: Some(engine),
            error_color: None,
        }
    }

    pub fn with_error_color(mut self, color: &str) -> Self {
        self.error_color = Some(color.to_string());
        self
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            throw_on_error: false,
            error_color: self
                .error_color
                .clone()
                .unwrap_or_else(|| DEFAULT_ERROR_COLOR.to_string()),
        }
    }
}

impl Embed for Formula {
    fn blot_name(&self) -> &'static str {
        "formula"
    }

    fn tag_name(&self) -> &'static str {
        "SPAN"
    }

    fn class_name(&self) -> Option<&'static str> {
        Some("ql-formula")
    }

    fn create(&self, value: &str) -> EmbedResult<Node> {
        let engine = self.engine.as_ref().ok_or(EmbedError::TypesetterUnavailable)?;
        let mut node = self.create_node();
        node.set_attribute("data-value", value);
        let options = self.render_options();
        if let Err(err) = engine.render(value, &mut node, &options) {
            tracing::warn!(error = %err, "formula rendered with error marker");
            node.set_text(value);
            node.set_attribute("style", &format!("color:{}", options.error_color));
        }
        Ok(node)
    }

    fn value(&self, node: &Node) -> Option<String> {
        node.get_attribute("data-value").map(str::to_string)
    }

    fn html(&self, node: &Node) -> String {
        let formula = node.get_attribute("data-value").unwrap_or("");
        format!("<span>{}</span>", escape_text(formula))
    }
}
