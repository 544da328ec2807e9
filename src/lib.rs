//! # Embed blots
//!
//! Embeddable content (images, formulas, videos) for a rich-text document tree,
//! and the HTML serialization path that exports it safely.
//!
//! ## Features
//! - One escaping function for every string written into markup
//! - Protocol allowlisting for every URL, with an inert `//:0` placeholder
//! - Per-variant attribute allowlists enforced by `format`
//! - Injected typesetting engine for formulas
//! - YAML configuration and editing scripts
//!
//! ## Example
//! ```ignore
//! use embed_blots::{Editor, Registry};
//!
//! let mut editor = Editor::new(Registry::with_defaults());
//! editor.insert_embed(0, "image", "https://example.com/cat.png?a=1&b=2")?;
//! editor.format_embed(0, "alt", Some("A cat"))?;
//!
//! assert_eq!(
//!     editor.get_html(0, 2),
//!     r#"<p><img src="https://example.com/cat.png?a=1&amp;b=2" alt="A cat"></p>"#
//! );
//! ```

pub mod blot;
pub mod config;
pub mod editor;
pub mod error;
pub mod escape;
pub mod formats;
pub mod node;
pub mod ops;
pub mod registry;
pub mod sanitize;
pub mod scroll;
pub mod typeset;

// --- Core types ---
pub use blot::{Embed, EmbedBlot, Formats, Scope};
pub use editor::Editor;
pub use error::{EmbedError, EmbedResult, TypesetError};
pub use formats::{EmbedFormat, Formula, Image, Video};
pub use node::Node;
pub use registry::Registry;
pub use scroll::Scroll;

// --- Ambient types ---
pub use config::EmbedConfig;
pub use ops::{HtmlRange, Operation, Script};
pub use typeset::{PlainTypesetter, RenderOptions, Typesetter};

// --- Serialization helpers ---
pub use escape::escape_text;
pub use sanitize::{sanitize, sanitize_or, PLACEHOLDER};

/// Parse a YAML editing script
pub fn parse_script(yaml: &str) -> EmbedResult<Script> {
    ops::parse_script(yaml)
}

/// Run a script against a fresh editor and return the HTML of its range
/// (the whole document when no range is given).
pub fn render_script(script: &Script, engine: Option<std::sync::Arc<dyn Typesetter>>) -> EmbedResult<String> {
    let config = script.config.clone().unwrap_or_default();
    let registry = Registry::from_config(&config, engine)?;
    let mut editor = Editor::new(registry);
    editor.apply_all(&script.ops)?;

    let range = script.range.unwrap_or(HtmlRange {
        index: 0,
        length: editor.get_length(),
    });
    Ok(editor.get_html(range.index, range.length))
}
