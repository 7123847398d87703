//! Card layout schema - the canvas and its ordered element list.

use serde::{Deserialize, Serialize};

use crate::{CardElement, CardError, CardResult, ElementId};

/// Default grid cell size in schema units.
pub const DEFAULT_GRID_CELL: f64 = 40.0;

/// How the `background` value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    /// Plain CSS colour (or any `background` shorthand).
    #[default]
    Color,
    /// Image URL in `background_image`, with `background` as fallback.
    Image,
    /// CSS gradient.
    Gradient,
}

/// Grid cell dimensions in schema units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    /// Horizontal cell size.
    pub x: f64,
    /// Vertical cell size.
    pub y: f64,
}

/// Editor grid settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasGrid {
    /// Whether geometry writes snap to the grid.
    #[serde(default = "CanvasGrid::default_snap")]
    pub snap: bool,
    /// Cell size.
    pub size: GridSize,
}

impl Default for CanvasGrid {
    fn default() -> Self {
        Self {
            snap: true,
            size: GridSize {
                x: DEFAULT_GRID_CELL,
                y: DEFAULT_GRID_CELL,
            },
        }
    }
}

impl CanvasGrid {
    const fn default_snap() -> bool {
        true
    }

    /// Square grid with snapping enabled.
    #[must_use]
    pub fn square(cell: f64) -> Self {
        Self {
            snap: true,
            size: GridSize { x: cell, y: cell },
        }
    }

    /// Copy with each cell dimension sanitized against the defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            snap: self.snap,
            size: GridSize {
                x: sanitize_cell(self.size.x, DEFAULT_GRID_CELL),
                y: sanitize_cell(self.size.y, DEFAULT_GRID_CELL),
            },
        }
    }
}

/// Round a cell dimension to a positive whole number, or use `fallback`.
#[must_use]
pub fn sanitize_cell(value: f64, fallback: f64) -> f64 {
    let cell = if value.is_finite() {
        value.round().abs()
    } else {
        fallback
    };
    if cell > 0.0 {
        cell
    } else {
        fallback
    }
}

/// A complete card layout: canvas, background, and positioned elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLayoutSchema {
    /// Schema identifier.
    pub id: String,
    /// Canvas width in schema units.
    pub width: f64,
    /// Canvas height in schema units.
    pub height: f64,
    /// Background colour, gradient, or image fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Interpretation of the background.
    #[serde(default)]
    pub background_type: BackgroundType,
    /// Background image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Corner radius of the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Inner padding of the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    /// Default text colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    /// Editor grid; absent means the default grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<CanvasGrid>,
    /// Elements in render order.
    #[serde(default)]
    pub elements: Vec<CardElement>,
}

impl CardLayoutSchema {
    /// Create an empty schema with the given canvas size.
    #[must_use]
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            background: None,
            background_type: BackgroundType::Color,
            background_image: None,
            border_radius: None,
            padding: None,
            font_color: None,
            metadata: None,
            grid: None,
            elements: Vec::new(),
        }
    }

    /// Set the background value and its interpretation.
    #[must_use]
    pub fn with_background(mut self, kind: BackgroundType, value: impl Into<String>) -> Self {
        self.background_type = kind;
        self.background = Some(value.into());
        self
    }

    /// Set the background image URL.
    #[must_use]
    pub fn with_background_image(mut self, url: impl Into<String>) -> Self {
        self.background_image = Some(url.into());
        self
    }

    /// Set the corner radius.
    #[must_use]
    pub fn with_border_radius(mut self, radius: f64) -> Self {
        self.border_radius = Some(radius);
        self
    }

    /// Set the padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Set the default text colour.
    #[must_use]
    pub fn with_font_color(mut self, color: impl Into<String>) -> Self {
        self.font_color = Some(color.into());
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the editor grid.
    #[must_use]
    pub fn with_grid(mut self, grid: CanvasGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Append an element.
    #[must_use]
    pub fn with_element(mut self, element: CardElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&CardElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut CardElement> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Position of an element in render order.
    #[must_use]
    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    /// Whether an element with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.position(id).is_some()
    }

    /// ID of the first element, if any.
    #[must_use]
    pub fn first_element_id(&self) -> Option<ElementId> {
        self.elements.first().map(|e| e.id.clone())
    }

    /// Grid settings, falling back to the default grid.
    #[must_use]
    pub fn grid_or_default(&self) -> CanvasGrid {
        self.grid.unwrap_or_default()
    }

    /// Serialize the schema to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self).map_err(CardError::Serialization)
    }

    /// Deserialize a schema from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a schema.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json).map_err(CardError::Serialization)
    }
}
