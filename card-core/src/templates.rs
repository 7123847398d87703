//! Bundled card templates and sample preview data.
//!
//! Templates are built once per process and never handed out mutably; use
//! [`instantiate`] to get an editable deep copy.

use std::sync::OnceLock;

use serde::Serialize;

use crate::{BackgroundType, BindingContext, CanvasGrid, CardElement, CardLayoutSchema};

/// Template geometry is laid out on a 2-unit grid.
const TEMPLATE_GRID_CELL: f64 = 2.0;

/// ID of the template loaded by a fresh store.
pub const DEFAULT_TEMPLATE_ID: &str = "black-gold";

/// A named seed layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardTemplate {
    /// Template identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Seed schema.
    pub schema: CardLayoutSchema,
}

/// All bundled templates, in gallery order.
#[must_use]
pub fn builtin_templates() -> &'static [CardTemplate] {
    static TEMPLATES: OnceLock<Vec<CardTemplate>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        vec![
            CardTemplate {
                id: "black-gold",
                name: "Black Gold",
                description: "Dark, technical look",
                schema: black_gold(),
            },
            CardTemplate {
                id: "crimson-wave",
                name: "Crimson Wave",
                description: "Minimal red and white",
                schema: crimson_wave(),
            },
            CardTemplate {
                id: "blue-city",
                name: "Blue City",
                description: "Light urban blue",
                schema: blue_city(),
            },
        ]
    })
}

/// Look up a template by ID.
#[must_use]
pub fn template(id: &str) -> Option<&'static CardTemplate> {
    builtin_templates().iter().find(|t| t.id == id)
}

/// Deep copy of a template's schema, ready for editing.
#[must_use]
pub fn instantiate(id: &str) -> Option<CardLayoutSchema> {
    template(id).map(|t| t.schema.clone())
}

/// Preview data covering every binding used by the bundled templates.
#[must_use]
pub fn sample_binding_context() -> BindingContext {
    serde_json::json!({
        "user": {
            "company": "Meike Network Co., Ltd.",
            "name": "Alex Chen",
            "title": "Sales Manager",
            "phone": "189****4399",
            "email": "alex@example.com",
            "address": "15F, Enterprise Center Tower 1, Jing'an District, Shanghai",
            "avatar": "https://i.pravatar.cc/240?img=68"
        }
    })
}

fn contact_dot(id: &str, y: f64) -> CardElement {
    CardElement::icon(id, "dot", 40.0, y)
        .with_size(12.0, 12.0)
        .with_style(style! { "backgroundColor" => "#E2B96F", "borderRadius" => "50%" })
}

fn black_gold() -> CardLayoutSchema {
    CardLayoutSchema::new("kuanmai-black-gold", 686.0, 360.0)
        .with_grid(CanvasGrid::square(TEMPLATE_GRID_CELL))
        .with_background(
            BackgroundType::Gradient,
            "radial-gradient(circle at 20% 20%, #1e1a21, #080809 80%)",
        )
        .with_border_radius(32.0)
        .with_padding(40.0)
        .with_metadata("template", "black-gold")
        .with_metadata("version", "1.0.0")
        .with_element(
            CardElement::text("company", 40.0, 32.0)
                .with_size(360.0, 32.0)
                .with_binding("user.company")
                .with_style(style! {
                    "fontSize" => 18,
                    "color" => "#E2B96F",
                    "letterSpacing" => 1,
                    "fontWeight" => "500",
                }),
        )
        .with_element(
            CardElement::text("name", 40.0, 86.0)
                .with_size(280.0, 60.0)
                .with_binding("user.name")
                .with_style(style! { "fontSize" => 36, "color" => "#FFFFFF", "fontWeight" => "700" }),
        )
        .with_element(
            CardElement::text("title", 40.0, 148.0)
                .with_size(220.0, 32.0)
                .with_binding("user.title")
                .with_style(style! { "fontSize" => 20, "color" => "#CFD5EF", "fontWeight" => "500" }),
        )
        .with_element(contact_dot("phone-dot", 206.0))
        .with_element(
            CardElement::text("phone", 60.0, 192.0)
                .with_size(300.0, 32.0)
                .with_binding("user.phone")
                .with_style(style! { "fontSize" => 18, "color" => "#FFFFFF" }),
        )
        .with_element(contact_dot("email-dot", 244.0))
        .with_element(
            CardElement::text("email", 60.0, 230.0)
                .with_size(320.0, 32.0)
                .with_binding("user.email")
                .with_style(style! { "fontSize" => 18, "color" => "#FFFFFF" }),
        )
        .with_element(contact_dot("address-dot", 282.0))
        .with_element(
            CardElement::text("address", 60.0, 268.0)
                .with_size(420.0, 40.0)
                .with_binding("user.address")
                .with_style(style! { "fontSize" => 16, "color" => "#CFD5EF", "lineHeight" => 24 }),
        )
        .with_element(
            CardElement::image("avatar", 480.0, 80.0)
                .with_size(150.0, 150.0)
                .with_binding("user.avatar")
                .with_style(style! {
                    "borderRadius" => "50%",
                    "border" => "6px solid rgba(0, 0, 0, 0.35)",
                    "boxShadow" => "0 20px 40px rgba(0, 0, 0, 0.45)",
                }),
        )
}

fn crimson_wave() -> CardLayoutSchema {
    let row = |id: &str, y: f64, width: f64, height: f64| {
        CardElement::text(id, 360.0, y)
            .with_size(width, height)
            .with_binding(format!("user.{id}"))
    };

    CardLayoutSchema::new("kuanmai-crimson-wave", 686.0, 360.0)
        .with_grid(CanvasGrid::square(TEMPLATE_GRID_CELL))
        .with_background(
            BackgroundType::Image,
            "linear-gradient(180deg, #fdfdfd 0%, #f7f7f7 60%, #f25340 100%)",
        )
        .with_background_image(
            "https://km-1257079185.cos.ap-chengdu.myqcloud.com/static/cardstyleV3/bg_big_15.png",
        )
        .with_padding(40.0)
        .with_metadata("template", "crimson-wave")
        .with_element(
            CardElement::text("name", 60.0, 90.0)
                .with_size(220.0, 48.0)
                .with_binding("user.name")
                .with_style(style! { "fontSize" => 40, "color" => "#B80017", "fontWeight" => "700" }),
        )
        .with_element(
            CardElement::text("title", 60.0, 148.0)
                .with_size(260.0, 32.0)
                .with_binding("user.title")
                .with_style(style! { "fontSize" => 20, "color" => "#9f9f9f" }),
        )
        .with_element(
            row("phone", 92.0, 260.0, 32.0).with_style(style! { "fontSize" => 20, "color" => "#666" }),
        )
        .with_element(
            row("email", 134.0, 260.0, 32.0).with_style(style! { "fontSize" => 20, "color" => "#666" }),
        )
        .with_element(
            row("company", 176.0, 280.0, 32.0)
                .with_style(style! { "fontSize" => 20, "color" => "#666" }),
        )
        .with_element(row("address", 218.0, 280.0, 48.0).with_style(style! {
            "fontSize" => 18,
            "color" => "#666",
            "lineHeight" => 26,
        }))
}

fn blue_city() -> CardLayoutSchema {
    let row = |id: &str, y: f64, width: f64, color: &str| {
        CardElement::text(id, 60.0, y)
            .with_size(width, 32.0)
            .with_binding(format!("user.{id}"))
            .with_style(style! { "fontSize" => 18, "color" => color })
    };

    CardLayoutSchema::new("kuanmai-blue-city", 686.0, 360.0)
        .with_grid(CanvasGrid::square(TEMPLATE_GRID_CELL))
        .with_background(
            BackgroundType::Gradient,
            "linear-gradient(120deg, #f7f9ff 0%, #eff3ff 60%)",
        )
        .with_padding(48.0)
        .with_metadata("template", "blue-city")
        .with_element(
            CardElement::text("name", 60.0, 78.0)
                .with_size(280.0, 48.0)
                .with_binding("user.name")
                .with_style(style! { "fontSize" => 32, "color" => "#1B2B65", "fontWeight" => "700" }),
        )
        .with_element(
            CardElement::text("title", 60.0, 122.0)
                .with_size(360.0, 72.0)
                .with_binding("user.title")
                .with_style(style! { "fontSize" => 18, "color" => "#4f5e8a", "lineHeight" => 26 }),
        )
        .with_element(
            CardElement::image("blue-panel", 420.0, 60.0)
                .with_size(186.0, 240.0)
                .with_style(style! { "borderRadius" => 24 })
                .with_content(
                    "https://images.unsplash.com/photo-1507679799987-c73779587ccf?auto=format&fit=crop&w=400&q=60",
                ),
        )
        .with_element(row("phone", 220.0, 260.0, "#1B2B65"))
        .with_element(row("email", 254.0, 360.0, "#1B2B65"))
        .with_element(row("company", 288.0, 360.0, "#1B2B65"))
        .with_element(
            CardElement::text("address", 60.0, 322.0)
                .with_size(360.0, 32.0)
                .with_binding("user.address")
                .with_style(style! { "fontSize" => 16, "color" => "#5f6d98" }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::resolve_text;
    use crate::StyleValue;
    use std::collections::HashSet;

    #[test]
    fn test_three_templates_with_unique_element_ids() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 3);
        for t in templates {
            let ids: HashSet<_> = t.schema.elements.iter().map(|e| e.id.clone()).collect();
            assert_eq!(ids.len(), t.schema.elements.len(), "duplicate id in {}", t.id);
            assert!(t.schema.width > 0.0 && t.schema.height > 0.0);
        }
    }

    #[test]
    fn test_instantiate_is_independent_copy() {
        let mut copy = instantiate(DEFAULT_TEMPLATE_ID).expect("template");
        copy.elements.clear();
        let seed = template(DEFAULT_TEMPLATE_ID).expect("template");
        assert!(!seed.schema.elements.is_empty());
    }

    #[test]
    fn test_font_weights_survive_scaling() {
        for t in builtin_templates() {
            let scaled =
                crate::scale_layout(&t.schema, &crate::ScaleOptions::new(343.0)).expect("scale");
            for (seed, element) in t.schema.elements.iter().zip(&scaled.elements) {
                if let Some(weight) = seed.style.get("fontWeight") {
                    assert!(matches!(weight, StyleValue::Text(_)), "{}", seed.id);
                    assert_eq!(element.style.get("fontWeight"), Some(weight));
                }
            }
        }
    }

    #[test]
    fn test_unknown_template() {
        assert!(template("nope").is_none());
        assert!(instantiate("nope").is_none());
    }

    #[test]
    fn test_sample_context_covers_template_bindings() {
        let ctx = sample_binding_context();
        for t in builtin_templates() {
            for element in &t.schema.elements {
                if let Some(path) = element.binding.as_deref() {
                    assert!(
                        resolve_text(Some(path), &ctx).is_some(),
                        "{} has no sample value for {path}",
                        t.id
                    );
                }
            }
        }
    }
}
