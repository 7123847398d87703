//! # Card Layout Core
//!
//! Schema-driven layout engine for business-card style documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  card-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Schema Model    │  Scaling Engine          │
//! │  - Canvas        │  - Axis classification   │
//! │  - Elements      │  - Deferred rounding     │
//! │  - Style maps    │                          │
//! ├─────────────────────────────────────────────┤
//! │  Layout Store    │  Binding Resolver        │
//! │  - Grid snapping │  - Dotted paths          │
//! │  - Z-order       │                          │
//! │  - Undo/redo     │  Templates               │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Build an array of `(key, StyleValue)` pairs for [`CardElement::with_style`].
macro_rules! style {
    ($($key:literal => $value:expr),* $(,)?) => {
        [$(($key, $crate::StyleValue::from($value))),*]
    };
}

pub mod binding;
pub mod element;
pub mod error;
pub mod grid;
pub mod history;
pub mod layout;
pub mod scale;
pub mod schema;
pub mod store;
pub mod templates;

pub use binding::BindingContext;
pub use element::{
    CardElement, ElementId, ElementKind, ImageFit, LayoutRect, StyleMap, StyleValue, TextAlign,
};
pub use error::{CardError, CardResult};
pub use history::HistoryState;
pub use layout::{BackgroundType, CanvasGrid, CardLayoutSchema, GridSize};
pub use scale::{scale_layout, ScaleOptions};
pub use schema::LayoutDocument;
pub use store::{
    Background, ElementPreset, LayoutPatch, LayoutStore, OnChangeCallback, StoreEvent,
    UpdateOptions,
};
pub use templates::CardTemplate;

/// Card core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
