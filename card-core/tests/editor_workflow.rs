//! Editor workflow integration tests.
//!
//! Covers the end-to-end flow an editing session goes through:
//! - Load a template and edit it
//! - Export, re-import, and undo across the import
//! - Rescale the result for a new target size

use card_core::templates::{builtin_templates, instantiate, DEFAULT_TEMPLATE_ID};
use card_core::{
    scale_layout, CanvasGrid, CardElement, CardLayoutSchema, ElementPreset, LayoutPatch,
    LayoutStore, ScaleOptions, StyleValue, UpdateOptions,
};

// ============================================================================
// Scaling
// ============================================================================

#[test]
fn test_non_uniform_target() {
    let schema = CardLayoutSchema::new("card", 100.0, 50.0)
        .with_element(CardElement::shape("box", 10.0, 10.0).with_size(20.0, 10.0));

    let scaled = scale_layout(&schema, &ScaleOptions::new(200.0).with_height(100.0))
        .expect("scale");

    let element = &scaled.elements[0];
    assert_eq!((element.x, element.y), (20.0, 20.0));
    assert_eq!((element.width, element.height), (Some(40.0), Some(20.0)));
}

#[test]
fn test_axis_correct_style_scaling() {
    let schema = CardLayoutSchema::new("card", 100.0, 100.0).with_element(
        CardElement::text("t", 0.0, 0.0).with_style([("fontSize", 20), ("lineHeight", 10)]),
    );

    let scaled = scale_layout(&schema, &ScaleOptions::new(200.0).with_height(300.0))
        .expect("scale");

    let style = &scaled.elements[0].style;
    assert_eq!(style["fontSize"], StyleValue::Number(40.0));
    assert_eq!(style["lineHeight"], StyleValue::Number(30.0));
}

#[test]
fn test_templates_scale_without_touching_seed() {
    for template in builtin_templates() {
        let scaled = scale_layout(&template.schema, &ScaleOptions::new(343.0)).expect("scale");
        assert!((scaled.width - 343.0).abs() < f64::EPSILON);
        assert!((scaled.height - 180.0).abs() < f64::EPSILON, "{}", template.id);
        assert!((template.schema.width - 686.0).abs() < f64::EPSILON);
    }
}

// ============================================================================
// Editing session
// ============================================================================

#[test]
fn test_edit_export_import_undo() {
    let mut store = LayoutStore::new();
    let added = store.add_preset(ElementPreset::Text);
    store.update_layout(
        &added,
        LayoutPatch::position(101.0, 203.0),
        UpdateOptions::default(),
    );
    let edited = store.schema().clone();
    let json = store.export_json().expect("export");

    let mut other = LayoutStore::from_schema(CardLayoutSchema::new("blank", 300.0, 300.0));
    other.import_json(&json).expect("import");
    assert_eq!(other.schema(), &edited);
    assert_eq!(other.selected_element_id(), edited.first_element_id().as_ref());

    assert!(other.undo());
    assert_eq!(other.schema().id, "blank");
    assert!(other.redo());
    assert_eq!(other.schema(), &edited);
}

#[test]
fn test_canvas_shrink_resnaps_to_grid() {
    let mut store = LayoutStore::from_schema(
        CardLayoutSchema::new("shrink", 100.0, 100.0)
            .with_grid(CanvasGrid::square(10.0))
            .with_element(CardElement::shape("box", 90.0, 0.0).with_size(20.0, 20.0)),
    );

    store.update_canvas_size(50.0, 50.0);

    let element = &store.schema().elements[0];
    let width = element.width.expect("width");
    assert!(element.x + width <= 50.0);
    assert!((element.x % 10.0).abs() < f64::EPSILON);
    assert!((width % 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_drag_preview_then_commit() {
    let mut store = LayoutStore::new();
    let id = store.schema().first_element_id().expect("element");

    for step in 1..=5 {
        let x = 40.0 + f64::from(step) * 10.0;
        store.update_layout(&id, LayoutPatch::position(x, 32.0), UpdateOptions::preview());
    }
    assert!(!store.can_undo());

    store.update_layout(&id, LayoutPatch::position(120.0, 32.0), UpdateOptions::default());
    assert_eq!(store.history().past.len(), 1);
}

#[test]
fn test_template_switch_is_deep_copy() {
    let mut store = LayoutStore::new();
    assert!(store.select_template("crimson-wave"));
    let id = store.schema().first_element_id().expect("element");
    store.update_content(&id, Some("edited".into()));

    let fresh = instantiate("crimson-wave").expect("template");
    assert!(fresh.elements[0].content.is_none());

    store.reset();
    let default = instantiate(DEFAULT_TEMPLATE_ID).expect("default");
    assert_eq!(store.schema(), &default);
    assert!(!store.can_undo());
}
