use std::sync::Arc;

use crate::blot::Embed;
use crate::config::EmbedConfig;
use crate::error::{EmbedError, EmbedResult};
use crate::formats::{EmbedFormat, Formula, Image, Video};
use crate::typeset::Typesetter;

/// Lookup table from blot name to embed variant.
///
/// Registration order is kept so URL classification is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    formats: Vec<EmbedFormat>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image and video. Formula needs an engine, see [`Registry::from_config`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Image::default());
        registry.register(Video::default());
        registry
    }

    /// Build a registry from configuration.
    ///
    /// Fails when formulas are enabled but no typesetting engine is supplied.
    pub fn from_config(config: &EmbedConfig, engine: Option<Arc<dyn Typesetter>>) -> EmbedResult<Self> {
        config.validate()?;

        let mut registry = Self::new();
        if config.image.enabled {
            registry.register(config.image_format());
        }
        if config.video.enabled {
            registry.register(config.video_format());
        }
        if config.formula.enabled {
            let engine = engine.ok_or(EmbedError::TypesetterUnavailable)?;
            registry.register(config.formula_format(Formula::new(engine)));
        }
        Ok(registry)
    }

    /// Register a variant, replacing any variant with the same blot name
    pub fn register(&mut self, format: impl Into<EmbedFormat>) {
        let format = format.into();
        let name = format.blot_name();
        match self.formats.iter_mut().find(|f| f.blot_name() == name) {
            Some(existing) => *existing = format,
            None => self.formats.push(format),
        }
    }

    pub fn query(&self, name: &str) -> Option<&EmbedFormat> {
        self.formats.iter().find(|f| f.blot_name() == name)
    }

    /// First variant that claims a pasted or dropped URL
    pub fn match_url(&self, url: &str) -> Option<&EmbedFormat> {
        self.formats.iter().find(|f| f.matches(url))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.blot_name()).collect()
    }
}
