use serde::{Deserialize, Serialize};

use crate::error::TypesetError;
use crate::node::Node;

pub const DEFAULT_ERROR_COLOR: &str = "#f00";

/// Options handed to a [`Typesetter`] for each formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// When false the engine renders an inline error marker instead of failing
    pub throw_on_error: bool,
    pub error_color: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            throw_on_error: false,
            error_color: DEFAULT_ERROR_COLOR.to_string(),
        }
    }
}

/// Math typesetting engine used to draw formula glyphs.
///
/// Rendering is synchronous and only writes into `target`. The output is visual
/// only: formula serialization never reads it.
pub trait Typesetter: Send + Sync {
    fn render(&self, source: &str, target: &mut Node, options: &RenderOptions) -> Result<(), TypesetError>;
}

/// Engine that shows the formula source as plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTypesetter;

impl Typesetter for PlainTypesetter {
    fn render(&self, source: &str, target: &mut Node, _options: &RenderOptions) -> Result<(), TypesetError> {
        target.set_text(source);
        Ok(())
    }
}
