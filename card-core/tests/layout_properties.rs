//! Property tests for scaling, snapping, z-order, and history.

use card_core::{
    scale_layout, CanvasGrid, CardElement, CardLayoutSchema, ElementId, LayoutPatch, LayoutStore,
    ScaleOptions, StyleValue, UpdateOptions,
};
use proptest::prelude::*;

const CELL: f64 = 10.0;

fn arb_element(index: usize) -> impl Strategy<Value = CardElement> {
    (0.0f64..800.0, 0.0f64..500.0, 1.0f64..300.0, 1.0f64..200.0, 8u8..48).prop_map(
        move |(x, y, width, height, font_size)| {
            CardElement::text(format!("el-{index}"), x, y)
                .with_size(width, height)
                .with_style([
                    ("fontSize", StyleValue::from(f64::from(font_size))),
                    ("lineHeight", StyleValue::from(f64::from(font_size) * 1.5)),
                ])
        },
    )
}

fn arb_schema() -> impl Strategy<Value = CardLayoutSchema> {
    (100.0f64..1200.0, 100.0f64..800.0, 1usize..6).prop_flat_map(|(width, height, count)| {
        let elements: Vec<_> = (0..count).map(arb_element).collect();
        elements.prop_map(move |elements| {
            elements.into_iter().fold(
                CardLayoutSchema::new("prop", width, height).with_grid(CanvasGrid::square(CELL)),
                CardLayoutSchema::with_element,
            )
        })
    })
}

#[derive(Debug, Clone)]
enum Edit {
    Move(usize, f64, f64),
    Resize(usize, f64, f64),
    Canvas(f64, f64),
    Grid(f64),
    Front(usize),
    Back(usize),
    Forward(usize),
    Content(usize, String),
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..6, -50.0f64..900.0, -50.0f64..600.0).prop_map(|(i, x, y)| Edit::Move(i, x, y)),
        (0usize..6, 0.0f64..400.0, 0.0f64..300.0).prop_map(|(i, w, h)| Edit::Resize(i, w, h)),
        (20.0f64..1200.0, 20.0f64..800.0).prop_map(|(w, h)| Edit::Canvas(w, h)),
        (1.0f64..60.0).prop_map(Edit::Grid),
        (0usize..6).prop_map(Edit::Front),
        (0usize..6).prop_map(Edit::Back),
        (0usize..6).prop_map(Edit::Forward),
        (0usize..6, "[a-z]{1,8}").prop_map(|(i, s)| Edit::Content(i, s)),
    ]
}

fn id_at(store: &LayoutStore, index: usize) -> ElementId {
    let elements = &store.schema().elements;
    elements[index % elements.len()].id.clone()
}

/// Apply an edit; returns whether the store committed a change.
fn apply(store: &mut LayoutStore, edit: &Edit) -> bool {
    match edit {
        Edit::Move(i, x, y) => {
            let id = id_at(store, *i);
            store.update_layout(&id, LayoutPatch::position(*x, *y), UpdateOptions::default())
        }
        Edit::Resize(i, w, h) => {
            let id = id_at(store, *i);
            store.update_layout(&id, LayoutPatch::size(*w, *h), UpdateOptions::default())
        }
        Edit::Canvas(w, h) => store.update_canvas_size(*w, *h),
        Edit::Grid(cell) => store.update_grid_size(*cell, *cell),
        Edit::Front(i) => {
            let id = id_at(store, *i);
            store.bring_to_front(&id)
        }
        Edit::Back(i) => {
            let id = id_at(store, *i);
            store.send_to_back(&id)
        }
        Edit::Forward(i) => {
            let id = id_at(store, *i);
            store.bring_forward(&id)
        }
        Edit::Content(i, text) => {
            let id = id_at(store, *i);
            store.update_content(&id, Some(text.clone()))
        }
    }
}

proptest! {
    #[test]
    fn prop_rescale_to_own_size_is_identity_up_to_rounding(schema in arb_schema()) {
        let scaled = scale_layout(&schema, &ScaleOptions::new(schema.width))
            .expect("finite width");

        prop_assert_eq!(scaled.elements.len(), schema.elements.len());
        for (before, after) in schema.elements.iter().zip(&scaled.elements) {
            prop_assert!((before.x - after.x).abs() <= 1.0);
            prop_assert!((before.y - after.y).abs() <= 1.0);
            let (bw, aw) = (before.width.unwrap_or(0.0), after.width.unwrap_or(0.0));
            let (bh, ah) = (before.height.unwrap_or(0.0), after.height.unwrap_or(0.0));
            prop_assert!((bw - aw).abs() <= 1.0);
            prop_assert!((bh - ah).abs() <= 1.0);
        }
    }

    #[test]
    fn prop_rescale_twice_is_stable(schema in arb_schema(), target in 50.0f64..2000.0) {
        let once = scale_layout(&schema, &ScaleOptions::new(target)).expect("scale");
        let twice = scale_layout(&once, &ScaleOptions::new(once.width)).expect("scale");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_snapped_elements_stay_inside_canvas(
        schema in arb_schema(),
        width in 1.0f64..1500.0,
        height in 1.0f64..1000.0,
    ) {
        let mut store = LayoutStore::from_schema(schema);
        store.update_canvas_size(width, height);

        let canvas = store.schema();
        for element in &canvas.elements {
            let w = element.width.expect("width");
            let h = element.height.expect("height");
            prop_assert!(element.x >= 0.0 && element.y >= 0.0);
            prop_assert!(element.x + w <= canvas.width);
            prop_assert!(element.y + h <= canvas.height);
            if canvas.width >= CELL {
                prop_assert!(element.x % CELL == 0.0 && w % CELL == 0.0);
            }
            if canvas.height >= CELL {
                prop_assert!(element.y % CELL == 0.0 && h % CELL == 0.0);
            }
        }
    }

    #[test]
    fn prop_z_order_is_dense_after_moves(
        schema in arb_schema(),
        edits in prop::collection::vec((0usize..6, 0u8..4), 1..20),
    ) {
        let mut store = LayoutStore::from_schema(schema);
        for (index, kind) in &edits {
            let id = id_at(&store, *index);
            match kind {
                0 => store.bring_forward(&id),
                1 => store.send_backward(&id),
                2 => store.bring_to_front(&id),
                _ => store.send_to_back(&id),
            };
        }

        let mut z: Vec<i64> = store.schema().elements.iter().map(CardElement::z).collect();
        z.sort_unstable();
        let expected: Vec<i64> = (1..=i64::try_from(z.len()).expect("len")).collect();
        prop_assert_eq!(z, expected);
    }

    #[test]
    fn prop_undo_redo_symmetry(
        schema in arb_schema(),
        edits in prop::collection::vec(arb_edit(), 1..15),
    ) {
        let mut store = LayoutStore::from_schema(schema);
        let initial = store.schema().clone();

        let committed = edits.iter().filter(|edit| apply(&mut store, edit)).count();
        let last = store.schema().clone();

        for _ in 0..committed {
            prop_assert!(store.undo());
        }
        prop_assert!(!store.can_undo());
        prop_assert_eq!(store.schema(), &initial);

        for _ in 0..committed {
            prop_assert!(store.redo());
        }
        prop_assert!(!store.can_redo());
        prop_assert_eq!(store.schema(), &last);
    }
}
