//! # Card Layout Renderer
//!
//! Turns a card layout schema plus a data-binding context into style strings
//! and resolved content that a host can paint directly.
//!
//! ## Host Surfaces
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Render Resolver                │
//! ├──────────────────────┬──────────────────────┤
//! │ Web                  │ Mini-program         │
//! │ px, allow-listed     │ rpx against a        │
//! │ length keys          │ reference width      │
//! └──────────────────────┴──────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod render;
pub mod style;

pub use error::{RenderError, RenderResult};
pub use render::{render_layout, render_store_preview, RenderElement, RenderOutput};
pub use style::{LengthKeys, StyleFormatter, UnitRule};

use card_core::{BindingContext, CardLayoutSchema, LayoutStore};
use serde::{Deserialize, Serialize};

/// Container background used when the schema has none.
pub const DEFAULT_BACKGROUND: &str = "#111";

/// Host surface that will paint the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostSurface {
    /// Browser canvas: pixel units.
    #[default]
    Web,
    /// Mobile mini-app host: device-relative `rpx` units.
    MiniProgram,
}

/// Configuration for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Target host surface.
    pub surface: HostSurface,
    /// Reference width for device-relative units; `None` uses the target width.
    pub reference_width: Option<f64>,
    /// Length-key override; `None` uses the surface default.
    pub length_keys: Option<LengthKeys>,
    /// Container background when the schema has none.
    pub default_background: String,
    /// Container text colour when the schema has none.
    pub default_font_color: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface: HostSurface::Web,
            reference_width: None,
            length_keys: None,
            default_background: DEFAULT_BACKGROUND.to_string(),
            default_font_color: None,
        }
    }
}

impl RendererConfig {
    /// Set the host surface.
    #[must_use]
    pub fn with_surface(mut self, surface: HostSurface) -> Self {
        self.surface = surface;
        self
    }

    /// Set the reference width for device-relative units.
    #[must_use]
    pub fn with_reference_width(mut self, width: f64) -> Self {
        self.reference_width = Some(width);
        self
    }

    /// Override which style keys are lengths.
    #[must_use]
    pub fn with_length_keys(mut self, keys: LengthKeys) -> Self {
        self.length_keys = Some(keys);
        self
    }

    /// Set the fallback container background.
    #[must_use]
    pub fn with_default_background(mut self, background: impl Into<String>) -> Self {
        self.default_background = background.into();
        self
    }

    /// Set the fallback container text colour.
    #[must_use]
    pub fn with_default_font_color(mut self, color: impl Into<String>) -> Self {
        self.default_font_color = Some(color.into());
        self
    }

    /// Build the style formatter for this surface against a reference width.
    #[must_use]
    pub fn formatter(&self, reference_width: f64) -> StyleFormatter {
        let (rule, default_keys) = match self.surface {
            HostSurface::Web => (UnitRule::Pixel, LengthKeys::web_default()),
            HostSurface::MiniProgram => {
                (UnitRule::DeviceRelative { reference_width }, LengthKeys::All)
            }
        };
        StyleFormatter::new(rule, self.length_keys.clone().unwrap_or(default_keys))
    }
}

/// Renderer bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct CardRenderer {
    config: RendererConfig,
}

impl CardRenderer {
    /// Create a renderer with the given configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render a schema; see [`render_layout`].
    ///
    /// # Errors
    ///
    /// Returns an error if `target_width` is infinite.
    pub fn render(
        &self,
        schema: Option<&CardLayoutSchema>,
        context: &BindingContext,
        target_width: f64,
        reference_width: Option<f64>,
    ) -> RenderResult<RenderOutput> {
        render_layout(schema, context, target_width, reference_width, &self.config)
    }

    /// Render a store's live schema against its preview data.
    ///
    /// # Errors
    ///
    /// Returns an error if `target_width` is infinite.
    pub fn render_preview(
        &self,
        store: &LayoutStore,
        target_width: f64,
    ) -> RenderResult<RenderOutput> {
        render_store_preview(store, target_width, &self.config)
    }
}

/// Card renderer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
