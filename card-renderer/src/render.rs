//! Render resolver: scaled schema + binding context -> host style strings.

use card_core::binding::{resolve, resolve_text};
use card_core::{
    scale_layout, BackgroundType, BindingContext, CardElement, CardLayoutSchema, LayoutStore,
    ScaleOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::style::{format_number, Declarations, StyleFormatter};
use crate::{HostSurface, RenderResult, RendererConfig};

/// Renderable description of a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    /// Declarations for the card container.
    pub container_style: String,
    /// Elements in schema order.
    pub elements: Vec<RenderElement>,
}

impl RenderOutput {
    /// Whether nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container_style.is_empty() && self.elements.is_empty()
    }
}

/// One resolved element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderElement {
    /// Element ID.
    pub id: String,
    /// Element type name (`text`, `image`, ...).
    #[serde(rename = "type")]
    pub element_type: String,
    /// Semicolon-joined declarations.
    pub style: String,
    /// Bound value or literal content.
    pub content: String,
    /// Image source; only set for image elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// Render a schema for a target width.
///
/// The schema is scaled uniformly to `target_width` first. Lengths are
/// converted against `reference_width`, falling back to the configured
/// reference and then to `target_width`. A missing schema or a zero (or NaN)
/// target width yields empty output.
///
/// # Errors
///
/// Returns [`crate::RenderError::Scale`] if `target_width` is infinite.
pub fn render_layout(
    schema: Option<&CardLayoutSchema>,
    context: &BindingContext,
    target_width: f64,
    reference_width: Option<f64>,
    config: &RendererConfig,
) -> RenderResult<RenderOutput> {
    let Some(schema) = schema else {
        tracing::debug!("no schema to render");
        return Ok(RenderOutput::default());
    };
    if target_width.is_nan() || target_width == 0.0 {
        tracing::debug!(schema = %schema.id, "target width not known yet");
        return Ok(RenderOutput::default());
    }

    let scaled = scale_layout(schema, &ScaleOptions::new(target_width))?;
    let reference = reference_width
        .or(config.reference_width)
        .unwrap_or(target_width);
    if config.surface == HostSurface::MiniProgram && reference <= 0.0 {
        tracing::warn!(reference, "non-positive reference width, using px");
    }
    let formatter = config.formatter(reference);

    let output = RenderOutput {
        container_style: container_style(&scaled, &formatter, config),
        elements: scaled
            .elements
            .iter()
            .map(|element| render_element(element, context, &formatter))
            .collect(),
    };
    tracing::trace!(
        schema = %scaled.id,
        target_width,
        reference,
        elements = output.elements.len(),
        "rendered layout"
    );
    Ok(output)
}

/// Render a store's live schema against its preview data.
///
/// # Errors
///
/// Returns [`crate::RenderError::Scale`] if `target_width` is infinite.
pub fn render_store_preview(
    store: &LayoutStore,
    target_width: f64,
    config: &RendererConfig,
) -> RenderResult<RenderOutput> {
    render_layout(
        Some(store.schema()),
        store.preview_data(),
        target_width,
        None,
        config,
    )
}

fn container_style(
    schema: &CardLayoutSchema,
    formatter: &StyleFormatter,
    config: &RendererConfig,
) -> String {
    let mut decl = Declarations::new();
    decl.push("width", formatter.length(schema.width));
    decl.push("height", formatter.length(schema.height));
    decl.push(
        "background",
        non_empty(schema.background.as_deref()).unwrap_or(config.default_background.as_str()),
    );
    if let Some(color) =
        non_empty(schema.font_color.as_deref()).or(config.default_font_color.as_deref())
    {
        decl.push("color", color);
    }
    if let Some(radius) = schema.border_radius.filter(|r| r.abs() > 0.0) {
        decl.push("border-radius", formatter.length(radius));
    }
    if let Some(padding) = schema.padding.filter(|p| p.abs() > 0.0) {
        decl.push("padding", formatter.length(padding));
    }
    decl.push("box-sizing", "border-box");

    if schema.background_type == BackgroundType::Image {
        if let Some(url) = non_empty(schema.background_image.as_deref()) {
            decl.push("background-image", format_args!("url({url})"));
            decl.push("background-size", "cover");
            decl.push("background-repeat", "no-repeat");
        }
    }
    decl.finish()
}

fn render_element(
    element: &CardElement,
    context: &BindingContext,
    formatter: &StyleFormatter,
) -> RenderElement {
    let mut decl = Declarations::new();
    decl.push("left", formatter.length(element.x));
    decl.push("top", formatter.length(element.y));
    if let Some(width) = element.width {
        decl.push("width", formatter.length(width));
    }
    if let Some(height) = element.height {
        decl.push("height", formatter.length(height));
    }
    if let Some(rotation) = element.rotation {
        decl.push("transform", format_args!("rotate({}deg)", format_number(rotation)));
    }
    if let Some(z_index) = element.z_index {
        decl.push("z-index", z_index);
    }
    for (property, value) in formatter.format(&element.style) {
        decl.push(&property, value);
    }

    let binding = element.binding.as_deref();
    let content = resolve_text(binding, context)
        .or_else(|| element.content.clone())
        .unwrap_or_default();
    let src = element.kind.is_image().then(|| match resolve(binding, context) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => element.content.clone().unwrap_or_default(),
    });

    RenderElement {
        id: element.id.to_string(),
        element_type: element.kind.type_name().to_string(),
        style: decl.finish(),
        content,
        src,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
