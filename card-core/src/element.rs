//! Card elements - the positioned building blocks of a layout schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create an ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh ID of the form `<prefix>-<8 hex chars>`.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self(format!("{prefix}-{}", &uuid[..8]))
    }

    /// Borrow the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single style property value.
///
/// Numbers are lengths in schema units (scaled and unit-converted); strings are
/// passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Unitless number.
    Number(f64),
    /// Explicit string such as `"50%"` or `"bold"`.
    Text(String),
}

impl StyleValue {
    /// Numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered mapping of identifier-style property names to values.
pub type StyleMap = IndexMap<String, StyleValue>;

/// Horizontal text alignment hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align left.
    Left,
    /// Align center.
    Center,
    /// Align right.
    Right,
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Fill the box, cropping overflow.
    Cover,
    /// Fit inside the box, letterboxing.
    Contain,
}

/// The type-specific part of an element, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A text label.
    Text {
        /// Alignment hint for the host.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        align: Option<TextAlign>,
        /// Whether the host may wrap lines.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        multiline: Option<bool>,
    },

    /// An image whose source comes from the binding or literal content.
    Image {
        /// Alt text for accessibility.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        /// Fill mode.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fit: Option<ImageFit>,
    },

    /// A glyph drawn by the host.
    Icon {
        /// Glyph identifier.
        name: String,
        /// Optional glyph size in schema units.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<f64>,
    },

    /// A decorative shape.
    Shape {
        /// Host-specific auxiliary data.
        #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
        extras: serde_json::Map<String, serde_json::Value>,
    },

    /// A QR code, usually bound to a URL.
    Qrcode {
        /// Host-specific auxiliary data.
        #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
        extras: serde_json::Map<String, serde_json::Value>,
    },
}

impl ElementKind {
    /// Wire name of this kind (`"text"`, `"image"`, ...).
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Icon { .. } => "icon",
            Self::Shape { .. } => "shape",
            Self::Qrcode { .. } => "qrcode",
        }
    }

    /// Whether this is an image element.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// Resolved element geometry with every value finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Replace NaN and infinities with zero.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// A positioned element of a card layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardElement {
    /// Unique identifier, stable across mutation.
    pub id: ElementId,
    /// Type-specific data.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Left edge in schema units.
    pub x: f64,
    /// Top edge in schema units.
    pub y: f64,
    /// Width; absent means intrinsic sizing by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height; absent means intrinsic sizing by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Stacking order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    /// Dotted path into the binding context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    /// Literal fallback content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Style properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub style: StyleMap,
}

impl CardElement {
    /// Create a new element of the given kind at a position.
    #[must_use]
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            x,
            y,
            width: None,
            height: None,
            rotation: None,
            z_index: None,
            binding: None,
            content: None,
            style: StyleMap::new(),
        }
    }

    /// Create a text element.
    #[must_use]
    pub fn text(id: impl Into<ElementId>, x: f64, y: f64) -> Self {
        Self::new(
            id,
            ElementKind::Text {
                align: None,
                multiline: None,
            },
            x,
            y,
        )
    }

    /// Create an image element.
    #[must_use]
    pub fn image(id: impl Into<ElementId>, x: f64, y: f64) -> Self {
        Self::new(
            id,
            ElementKind::Image {
                alt: None,
                fit: None,
            },
            x,
            y,
        )
    }

    /// Create an icon element.
    #[must_use]
    pub fn icon(id: impl Into<ElementId>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(
            id,
            ElementKind::Icon {
                name: name.into(),
                size: None,
            },
            x,
            y,
        )
    }

    /// Create a shape element.
    #[must_use]
    pub fn shape(id: impl Into<ElementId>, x: f64, y: f64) -> Self {
        Self::new(
            id,
            ElementKind::Shape {
                extras: serde_json::Map::new(),
            },
            x,
            y,
        )
    }

    /// Create a QR code element.
    #[must_use]
    pub fn qrcode(id: impl Into<ElementId>, x: f64, y: f64) -> Self {
        Self::new(
            id,
            ElementKind::Qrcode {
                extras: serde_json::Map::new(),
            },
            x,
            y,
        )
    }

    /// Set width and height.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the binding path.
    #[must_use]
    pub fn with_binding(mut self, path: impl Into<String>) -> Self {
        self.binding = Some(path.into());
        self
    }

    /// Set the literal content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Append style properties, keeping their order.
    #[must_use]
    pub fn with_style<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<StyleValue>,
    {
        self.style
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Current geometry with non-finite values coerced to zero.
    ///
    /// Absent width/height read as zero.
    #[must_use]
    pub fn bounds(&self) -> LayoutRect {
        LayoutRect {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
            width: finite_or_zero(self.width.unwrap_or(0.0)),
            height: finite_or_zero(self.height.unwrap_or(0.0)),
        }
    }

    /// Z-index, with absent read as zero.
    #[must_use]
    pub fn z(&self) -> i64 {
        self.z_index.unwrap_or(0)
    }
}
