//! Built-in embed variants and the closed set that dispatches between them.

pub mod formula;
pub mod image;
pub mod video;

pub use formula::Formula;
pub use image::Image;
pub use video::Video;

use crate::blot::{Embed, Formats, Scope};
use crate::error::EmbedResult;
use crate::node::Node;

/// Every embed variant the editor knows how to store and serialize
#[derive(Debug, Clone)]
pub enum EmbedFormat {
    Image(Image),
    Formula(Formula),
    Video(Video),
}

impl EmbedFormat {
    fn inner(&self) -> &dyn Embed {
        match self {
            EmbedFormat::Image(image) => image,
            EmbedFormat::Formula(formula) => formula,
            EmbedFormat::Video(video) => video,
        }
    }
}

impl Embed for EmbedFormat {
    fn blot_name(&self) -> &'static str {
        self.inner().blot_name()
    }

    fn tag_name(&self) -> &'static str {
        self.inner().tag_name()
    }

    fn class_name(&self) -> Option<&'static str> {
        self.inner().class_name()
    }

    fn scope(&self) -> Scope {
        self.inner().scope()
    }

    fn attributes(&self) -> &'static [&'static str] {
        self.inner().attributes()
    }

    fn create(&self, value: &str) -> EmbedResult<Node> {
        self.inner().create(value)
    }

    fn value(&self, node: &Node) -> Option<String> {
        self.inner().value(node)
    }

    fn format(&self, node: &mut Node, name: &str, value: Option<&str>) {
        self.inner().format(node, name, value)
    }

    fn formats(&self, node: &Node) -> Formats {
        self.inner().formats(node)
    }

    fn html(&self, node: &Node) -> String {
        self.inner().html(node)
    }

    fn matches(&self, url: &str) -> bool {
        self.inner().matches(url)
    }
}

impl From<Image> for EmbedFormat {
    fn from(image: Image) -> Self {
        EmbedFormat::Image(image)
    }
}

impl From<Formula> for EmbedFormat {
    fn from(formula: Formula) -> Self {
        EmbedFormat::Formula(formula)
    }
}

impl From<Video> for EmbedFormat {
    fn from(video: Video) -> Self {
        EmbedFormat::Video(video)
    }
}
