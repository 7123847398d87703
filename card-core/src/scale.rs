//! Proportional rescaling of a layout schema to a new target size.
//!
//! Horizontal quantities (`x`, `width`, most style lengths, card radius and
//! padding) scale by `target_width / width`. Vertical quantities (`y`,
//! `height`, and the height-axis style keys) scale by `target_height / height`,
//! or by the horizontal factor when no target height is given.

use crate::element::finite_or_zero;
use crate::{CardElement, CardError, CardLayoutSchema, CardResult, StyleMap, StyleValue};

/// Style keys whose numeric values scale with the vertical factor.
pub const HEIGHT_AXIS_KEYS: [&str; 4] = ["lineHeight", "top", "bottom", "height"];

/// Rounding applied to every scaled number.
pub type RoundFn = fn(f64) -> f64;

/// Whether a style key scales along the vertical axis.
#[must_use]
pub fn is_height_axis(key: &str) -> bool {
    HEIGHT_AXIS_KEYS.contains(&key)
}

/// Target size and rounding for [`scale_layout`].
#[derive(Debug, Clone, Copy)]
pub struct ScaleOptions {
    /// Target canvas width.
    pub target_width: f64,
    /// Target canvas height; `None` keeps the aspect ratio.
    pub target_height: Option<f64>,
    /// Rounding function, applied after multiplication.
    pub round: RoundFn,
}

impl ScaleOptions {
    /// Scale uniformly to the given width with nearest-integer rounding.
    #[must_use]
    pub fn new(target_width: f64) -> Self {
        Self {
            target_width,
            target_height: None,
            round: f64::round,
        }
    }

    /// Scale to an explicit height as well.
    #[must_use]
    pub fn with_height(mut self, target_height: f64) -> Self {
        self.target_height = Some(target_height);
        self
    }

    /// Use a different rounding function.
    #[must_use]
    pub fn with_round(mut self, round: RoundFn) -> Self {
        self.round = round;
        self
    }

    /// Keep full precision.
    #[must_use]
    pub fn unrounded(self) -> Self {
        self.with_round(std::convert::identity)
    }
}

/// Per-axis scale factors.
#[derive(Debug, Clone, Copy)]
struct AxisScale {
    width: f64,
    height: f64,
    round: RoundFn,
}

impl AxisScale {
    fn apply(&self, value: f64, factor: f64) -> f64 {
        (self.round)(finite_or_zero(finite_or_zero(value) * factor))
    }

    fn horizontal(&self, value: f64) -> f64 {
        self.apply(value, self.width)
    }

    fn vertical(&self, value: f64) -> f64 {
        self.apply(value, self.height)
    }

    fn style(&self, style: &StyleMap) -> StyleMap {
        style
            .iter()
            .map(|(key, value)| {
                let scaled = match value.as_number() {
                    Some(n) if is_height_axis(key) => StyleValue::Number(self.vertical(n)),
                    Some(n) => StyleValue::Number(self.horizontal(n)),
                    None => value.clone(),
                };
                (key.clone(), scaled)
            })
            .collect()
    }

    fn element(&self, element: &CardElement) -> CardElement {
        CardElement {
            x: self.horizontal(element.x),
            y: self.vertical(element.y),
            width: element.width.map(|w| self.horizontal(w)),
            height: element.height.map(|h| self.vertical(h)),
            rotation: element.rotation.map(finite_or_zero),
            style: self.style(&element.style),
            ..element.clone()
        }
    }
}

/// Scale a schema to a new size, preserving relative geometry.
///
/// The input is never mutated. Scaling a schema to its own size returns the
/// same geometry up to rounding.
///
/// # Errors
///
/// Returns [`CardError::InvalidArgument`] if `target_width` is not finite.
pub fn scale_layout(
    schema: &CardLayoutSchema,
    options: &ScaleOptions,
) -> CardResult<CardLayoutSchema> {
    if !options.target_width.is_finite() {
        return Err(CardError::InvalidArgument(format!(
            "target width must be a finite number, got {}",
            options.target_width
        )));
    }

    let explicit_height = options.target_height.filter(|h| h.abs() > 0.0);

    let width_scale = options.target_width / schema.width;
    let height_scale = explicit_height.map_or(width_scale, |h| h / schema.height);

    let axes = AxisScale {
        width: width_scale,
        height: height_scale,
        round: options.round,
    };

    tracing::trace!(
        schema = %schema.id,
        width_scale,
        height_scale,
        "scaling layout"
    );

    Ok(CardLayoutSchema {
        width: axes.apply(options.target_width, 1.0),
        height: explicit_height.map_or_else(
            || axes.vertical(schema.height),
            |h| axes.apply(h, 1.0),
        ),
        border_radius: schema.border_radius.map(|r| axes.horizontal(r)),
        padding: schema.padding.map(|p| axes.horizontal(p)),
        elements: schema.elements.iter().map(|e| axes.element(e)).collect(),
        ..schema.clone()
    })
}
