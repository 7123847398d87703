//! Editable layout store for a single editing session.
//!
//! [`LayoutStore`] owns the live schema, the active selection, and the undo/redo
//! stacks. Every geometry write is clamped to the canvas and snapped to the
//! grid. Operations addressing a missing element, template, or history entry
//! are no-ops that return `false`, so UI handlers can call them without
//! checking first.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::element::finite_or_zero;
use crate::grid::snap_to_canvas;
use crate::layout::sanitize_cell;
use crate::templates::{instantiate, sample_binding_context, DEFAULT_TEMPLATE_ID};
use crate::{
    BackgroundType, BindingContext, CanvasGrid, CardElement, CardLayoutSchema, CardResult,
    ElementId, GridSize, HistoryState, LayoutDocument, StyleMap, StyleValue,
};

/// Canvas size used when the default template is unavailable.
const FALLBACK_WIDTH: f64 = 686.0;
const FALLBACK_HEIGHT: f64 = 360.0;

/// Callback invoked after every committed change, with the live schema.
pub type OnChangeCallback = Box<dyn Fn(&StoreEvent, &CardLayoutSchema) + Send + Sync>;

/// What changed in a committed store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// An element was appended.
    ElementAdded(ElementId),
    /// An element was removed.
    ElementRemoved(ElementId),
    /// An element's geometry, style, binding, or content changed.
    ElementUpdated(ElementId),
    /// The canvas was resized and every element re-snapped.
    CanvasResized {
        /// New canvas width.
        width: f64,
        /// New canvas height.
        height: f64,
    },
    /// Grid cell size or snapping changed.
    GridChanged(CanvasGrid),
    /// Background settings changed.
    BackgroundChanged,
    /// Stacking order changed; indices are dense `1..=N` afterwards.
    ZOrderChanged(ElementId),
    /// The whole schema was replaced (template, import, or reset).
    SchemaReplaced,
    /// A snapshot was restored from the undo stack.
    Undo,
    /// A snapshot was restored from the redo stack.
    Redo,
}

/// How a mutation is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Push the pre-mutation schema onto the undo stack.
    pub record_history: bool,
    /// Update the last-modified timestamp.
    pub touch: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            record_history: true,
            touch: true,
        }
    }
}

impl UpdateOptions {
    /// Intermediate drag frame: neither history nor timestamp.
    #[must_use]
    pub const fn preview() -> Self {
        Self {
            record_history: false,
            touch: false,
        }
    }
}

/// Partial geometry update; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutPatch {
    /// New left edge.
    pub x: Option<f64>,
    /// New top edge.
    pub y: Option<f64>,
    /// New width.
    pub width: Option<f64>,
    /// New height.
    pub height: Option<f64>,
    /// New rotation in degrees.
    pub rotation: Option<f64>,
}

impl LayoutPatch {
    /// Move to a position.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Resize.
    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

/// Partial background update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Background {
    /// How the background value is interpreted.
    pub kind: Option<BackgroundType>,
    /// Colour, gradient, or image fallback.
    pub value: Option<String>,
    /// Image URL.
    pub image: Option<String>,
}

/// Default elements offered by the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPreset {
    /// Placeholder text line.
    Text,
    /// Avatar image bound to `user.avatar`.
    Image,
    /// Small round accent dot.
    Icon,
}

impl ElementPreset {
    fn build(self, schema: &CardLayoutSchema) -> CardElement {
        // Stagger new elements so repeated adds don't stack exactly.
        #[allow(clippy::cast_precision_loss)]
        let base_x = 40.0 + schema.elements.len() as f64 * 4.0;
        match self {
            Self::Text => CardElement::text(ElementId::generate("text"), base_x, 300.0)
                .with_size(260.0, 36.0)
                .with_content("New text")
                .with_style([
                    ("fontSize", StyleValue::from(18)),
                    ("color", StyleValue::from("#F4F6FB")),
                ]),
            Self::Image => {
                CardElement::image(ElementId::generate("image"), schema.width - 200.0, 80.0)
                    .with_size(120.0, 120.0)
                    .with_binding("user.avatar")
                    .with_style([
                        ("borderRadius", "16px"),
                        ("border", "4px solid rgba(255, 255, 255, 0.12)"),
                    ])
            }
            Self::Icon => CardElement::icon(ElementId::generate("icon"), "dot", base_x, 320.0)
                .with_size(14.0, 14.0)
                .with_style([("backgroundColor", "#F5C271"), ("borderRadius", "50%")]),
        }
    }
}

/// Stacking moves.
#[derive(Debug, Clone, Copy)]
enum ZMove {
    Forward,
    Backward,
    Front,
    Back,
    Set(i64),
}

/// Owner of the live schema, selection, history, and preview data.
pub struct LayoutStore {
    schema: CardLayoutSchema,
    selected: Option<ElementId>,
    history: HistoryState,
    preview_data: BindingContext,
    last_modified: u64,
    on_change: Option<OnChangeCallback>,
}

impl std::fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStore")
            .field("schema", &self.schema.id)
            .field("elements", &self.schema.elements.len())
            .field("selected", &self.selected)
            .field("past", &self.history.past.len())
            .field("future", &self.history.future.len())
            .field("last_modified", &self.last_modified)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutStore {
    /// Create a store holding a copy of the default template.
    #[must_use]
    pub fn new() -> Self {
        Self::from_schema(default_schema())
    }

    /// Create a store around an existing schema.
    ///
    /// The grid is sanitized and every element is clamped and snapped.
    #[must_use]
    pub fn from_schema(schema: CardLayoutSchema) -> Self {
        let schema = normalize(schema);
        Self {
            selected: schema.first_element_id(),
            schema,
            history: HistoryState::new(),
            preview_data: sample_binding_context(),
            last_modified: current_timestamp_ms(),
            on_change: None,
        }
    }

    /// The live schema.
    #[must_use]
    pub fn schema(&self) -> &CardLayoutSchema {
        &self.schema
    }

    /// The active grid.
    #[must_use]
    pub fn grid(&self) -> CanvasGrid {
        self.schema.grid_or_default()
    }

    /// ID of the selected element.
    #[must_use]
    pub fn selected_element_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// The selected element.
    #[must_use]
    pub fn selected_element(&self) -> Option<&CardElement> {
        self.selected.as_ref().and_then(|id| self.schema.element(id))
    }

    /// Undo/redo stacks.
    #[must_use]
    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    /// Whether an undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Milliseconds since the Unix epoch of the last touching change.
    #[must_use]
    pub fn last_modified(&self) -> u64 {
        self.last_modified
    }

    /// Data used for previews.
    #[must_use]
    pub fn preview_data(&self) -> &BindingContext {
        &self.preview_data
    }

    /// Replace the preview data.
    pub fn set_preview_data(&mut self, data: BindingContext) {
        self.preview_data = data;
    }

    /// Register the change callback, replacing any previous one.
    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: Fn(&StoreEvent, &CardLayoutSchema) + Send + Sync + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// Returns `false` if the ID does not exist.
    pub fn select_element(&mut self, id: Option<&ElementId>) -> bool {
        match id {
            Some(id) if !self.schema.contains(id) => false,
            id => {
                self.selected = id.cloned();
                true
            }
        }
    }

    /// Replace the live schema with a copy of a bundled template.
    ///
    /// Returns `false` for an unknown template ID.
    pub fn select_template(&mut self, id: &str) -> bool {
        let Some(schema) = instantiate(id) else {
            tracing::debug!(template = id, "unknown template ignored");
            return false;
        };
        self.replace_schema(schema, true);
        true
    }

    /// Reload the default template and clear history.
    pub fn reset(&mut self) {
        self.replace_schema(default_schema(), false);
        self.history.clear();
    }

    /// Append an element, snap it, and select it.
    ///
    /// A colliding or empty ID is replaced with a generated one, and a missing
    /// z-index becomes `len + 1`. Returns the ID actually used.
    pub fn add_element(&mut self, mut element: CardElement) -> ElementId {
        if element.id.as_str().is_empty() || self.schema.contains(&element.id) {
            element.id = ElementId::generate(element.kind.type_name());
        }
        if element.z_index.is_none() {
            element.z_index = i64::try_from(self.schema.elements.len() + 1).ok();
        }
        let id = element.id.clone();
        let (width, height, grid) = self.canvas();
        snap_element(&mut element, width, height, &grid);

        self.mutate(
            StoreEvent::ElementAdded(id.clone()),
            UpdateOptions::default(),
            |schema| schema.elements.push(element),
        );
        self.selected = Some(id.clone());
        id
    }

    /// Append one of the editor's default elements.
    pub fn add_preset(&mut self, preset: ElementPreset) -> ElementId {
        let element = preset.build(&self.schema);
        self.add_element(element)
    }

    /// Remove an element.
    ///
    /// If it was selected, the last remaining element becomes selected.
    pub fn remove_element(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.schema.position(id) else {
            return false;
        };
        self.mutate(
            StoreEvent::ElementRemoved(id.clone()),
            UpdateOptions::default(),
            |schema| {
                schema.elements.remove(index);
            },
        );
        if self.selected.as_ref() == Some(id) {
            self.selected = self.schema.elements.last().map(|e| e.id.clone());
        }
        true
    }

    /// Apply a geometry patch, then clamp and snap.
    ///
    /// Pass [`UpdateOptions::preview`] for intermediate drag frames.
    pub fn update_layout(
        &mut self,
        id: &ElementId,
        patch: LayoutPatch,
        options: UpdateOptions,
    ) -> bool {
        if !self.schema.contains(id) {
            return false;
        }
        let (width, height, grid) = self.canvas();
        self.mutate(StoreEvent::ElementUpdated(id.clone()), options, |schema| {
            if let Some(element) = schema.element_mut(id) {
                if let Some(x) = patch.x {
                    element.x = x;
                }
                if let Some(y) = patch.y {
                    element.y = y;
                }
                if patch.width.is_some() {
                    element.width = patch.width;
                }
                if patch.height.is_some() {
                    element.height = patch.height;
                }
                if let Some(rotation) = patch.rotation {
                    element.rotation = Some(finite_or_zero(rotation));
                }
                snap_element(element, width, height, &grid);
            }
        })
    }

    /// Merge style properties into an element's style map.
    pub fn update_style(&mut self, id: &ElementId, style: StyleMap) -> bool {
        self.update_element(id, |element| element.style.extend(style))
    }

    /// Set or clear an element's binding path.
    pub fn update_binding(&mut self, id: &ElementId, binding: Option<String>) -> bool {
        self.update_element(id, |element| element.binding = binding)
    }

    /// Set or clear an element's literal content.
    pub fn update_content(&mut self, id: &ElementId, content: Option<String>) -> bool {
        self.update_element(id, |element| element.content = content)
    }

    /// Set an element's z-index, then renumber all elements densely.
    pub fn set_element_z_index(&mut self, id: &ElementId, z_index: i64) -> bool {
        self.reorder(id, ZMove::Set(z_index))
    }

    /// Swap with the next element up in stacking order.
    pub fn bring_forward(&mut self, id: &ElementId) -> bool {
        self.reorder(id, ZMove::Forward)
    }

    /// Swap with the next element down in stacking order.
    pub fn send_backward(&mut self, id: &ElementId) -> bool {
        self.reorder(id, ZMove::Backward)
    }

    /// Move to the top of the stacking order.
    pub fn bring_to_front(&mut self, id: &ElementId) -> bool {
        self.reorder(id, ZMove::Front)
    }

    /// Move to the bottom of the stacking order.
    pub fn send_to_back(&mut self, id: &ElementId) -> bool {
        self.reorder(id, ZMove::Back)
    }

    /// Apply a background patch.
    pub fn update_background(&mut self, background: Background) -> bool {
        self.mutate(
            StoreEvent::BackgroundChanged,
            UpdateOptions::default(),
            |schema| {
                if let Some(kind) = background.kind {
                    schema.background_type = kind;
                }
                if background.value.is_some() {
                    schema.background = background.value;
                }
                if background.image.is_some() {
                    schema.background_image = background.image;
                }
            },
        )
    }

    /// Resize the canvas and re-snap every element.
    ///
    /// Sizes are rounded to whole units with a minimum of 1. Non-finite
    /// values keep the current size.
    pub fn update_canvas_size(&mut self, width: f64, height: f64) -> bool {
        let width = canvas_extent(width, self.schema.width);
        let height = canvas_extent(height, self.schema.height);
        self.mutate(
            StoreEvent::CanvasResized { width, height },
            UpdateOptions::default(),
            |schema| {
                schema.width = width;
                schema.height = height;
                resnap_all(schema);
            },
        )
    }

    /// Change the grid cell size and re-snap every element.
    pub fn update_grid_size(&mut self, x: f64, y: f64) -> bool {
        let current = self.grid();
        let grid = CanvasGrid {
            snap: current.snap,
            size: GridSize {
                x: sanitize_cell(x, current.size.x),
                y: sanitize_cell(y, current.size.y),
            },
        };
        self.set_grid(grid)
    }

    /// Enable or disable snapping; enabling re-snaps every element.
    pub fn toggle_grid_snap(&mut self, enabled: bool) -> bool {
        let grid = CanvasGrid {
            snap: enabled,
            ..self.grid()
        };
        self.set_grid(grid)
    }

    /// Restore the previous snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(&self.schema) else {
            return false;
        };
        self.restore(previous, StoreEvent::Undo);
        true
    }

    /// Re-apply the most recently undone snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(&self.schema) else {
            return false;
        };
        self.restore(next, StoreEvent::Redo);
        true
    }

    /// Export the live schema as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> CardResult<String> {
        LayoutDocument::from(&self.schema).to_json()
    }

    /// Replace the live schema with an imported document.
    ///
    /// A legacy `gridSize` is honored, every element is re-snapped, and the
    /// previous schema is pushed onto the undo stack.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CardError::Serialization`] for malformed JSON; the
    /// store is left untouched.
    pub fn import_json(&mut self, json: &str) -> CardResult<()> {
        let schema = LayoutDocument::from_json(json)?.into_schema();
        tracing::info!(
            schema = %schema.id,
            elements = schema.elements.len(),
            "importing layout"
        );
        self.replace_schema(schema, true);
        Ok(())
    }

    fn canvas(&self) -> (f64, f64, CanvasGrid) {
        (self.schema.width, self.schema.height, self.grid())
    }

    fn set_grid(&mut self, grid: CanvasGrid) -> bool {
        self.mutate(
            StoreEvent::GridChanged(grid),
            UpdateOptions::default(),
            |schema| {
                schema.grid = Some(grid);
                resnap_all(schema);
            },
        )
    }

    fn update_element<F>(&mut self, id: &ElementId, f: F) -> bool
    where
        F: FnOnce(&mut CardElement),
    {
        if !self.schema.contains(id) {
            return false;
        }
        self.mutate(
            StoreEvent::ElementUpdated(id.clone()),
            UpdateOptions::default(),
            |schema| {
                if let Some(element) = schema.element_mut(id) {
                    f(element);
                }
            },
        )
    }

    fn reorder(&mut self, id: &ElementId, movement: ZMove) -> bool {
        if !self.schema.contains(id) {
            return false;
        }
        self.mutate(
            StoreEvent::ZOrderChanged(id.clone()),
            UpdateOptions::default(),
            |schema| restack(schema, id, movement),
        )
    }

    fn replace_schema(&mut self, schema: CardLayoutSchema, record_history: bool) {
        let previous = std::mem::replace(&mut self.schema, normalize(schema));
        if record_history {
            self.history.record(previous);
        }
        self.selected = self.schema.first_element_id();
        self.last_modified = current_timestamp_ms();
        tracing::debug!(schema = %self.schema.id, "schema replaced");
        self.notify(&StoreEvent::SchemaReplaced);
    }

    fn restore(&mut self, schema: CardLayoutSchema, event: StoreEvent) {
        self.schema = schema;
        self.selected = self.schema.first_element_id();
        self.last_modified = current_timestamp_ms();
        tracing::debug!(
            ?event,
            past = self.history.past.len(),
            future = self.history.future.len(),
            "history step"
        );
        self.notify(&event);
    }

    /// Run `f` on the live schema and commit if anything changed.
    fn mutate<F>(&mut self, event: StoreEvent, options: UpdateOptions, f: F) -> bool
    where
        F: FnOnce(&mut CardLayoutSchema),
    {
        let before = self.schema.clone();
        f(&mut self.schema);
        if self.schema == before {
            return false;
        }
        if options.record_history {
            self.history.record(before);
        }
        if options.touch {
            self.last_modified = current_timestamp_ms();
        }
        tracing::debug!(?event, history = options.record_history, "layout changed");
        self.notify(&event);
        true
    }

    fn notify(&self, event: &StoreEvent) {
        if let Some(callback) = &self.on_change {
            callback(event, &self.schema);
        }
    }
}

fn default_schema() -> CardLayoutSchema {
    instantiate(DEFAULT_TEMPLATE_ID).unwrap_or_else(|| {
        CardLayoutSchema::new(DEFAULT_TEMPLATE_ID, FALLBACK_WIDTH, FALLBACK_HEIGHT)
    })
}

/// Sanitize the grid and snap every element of a freshly loaded schema.
fn normalize(mut schema: CardLayoutSchema) -> CardLayoutSchema {
    schema.grid = Some(schema.grid_or_default().sanitized());
    resnap_all(&mut schema);
    schema
}

fn resnap_all(schema: &mut CardLayoutSchema) {
    let (width, height, grid) = (schema.width, schema.height, schema.grid_or_default());
    for element in &mut schema.elements {
        snap_element(element, width, height, &grid);
    }
}

/// Clamp and snap one element; absent dimensions stay absent.
fn snap_element(element: &mut CardElement, width: f64, height: f64, grid: &CanvasGrid) {
    let rect = snap_to_canvas(element.bounds(), width, height, grid);
    element.rotation = element.rotation.map(finite_or_zero);
    element.x = rect.x;
    element.y = rect.y;
    if element.width.is_some() {
        element.width = Some(rect.width);
    }
    if element.height.is_some() {
        element.height = Some(rect.height);
    }
}

/// Apply a stacking move and renumber z-indices to `1..=N`.
///
/// The element list itself is never reordered.
fn restack(schema: &mut CardLayoutSchema, id: &ElementId, movement: ZMove) {
    let elements = &mut schema.elements;
    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by_key(|&i| elements[i].z());

    let Some(pos) = order.iter().position(|&i| &elements[i].id == id) else {
        return;
    };
    match movement {
        ZMove::Forward => {
            if pos + 1 < order.len() {
                order.swap(pos, pos + 1);
            }
        }
        ZMove::Backward => {
            if pos > 0 {
                order.swap(pos, pos - 1);
            }
        }
        ZMove::Front => {
            let index = order.remove(pos);
            order.push(index);
        }
        ZMove::Back => {
            let index = order.remove(pos);
            order.insert(0, index);
        }
        ZMove::Set(z_index) => {
            elements[order[pos]].z_index = Some(z_index);
            order.sort_by_key(|&i| elements[i].z());
        }
    }

    for (rank, &index) in order.iter().enumerate() {
        elements[index].z_index = i64::try_from(rank + 1).ok();
    }
}

fn canvas_extent(value: f64, current: f64) -> f64 {
    if value.is_finite() {
        value.round().max(1.0)
    } else {
        current
    }
}

/// Get the current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        // Timestamp will not exceed u64 max for millennia
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}
