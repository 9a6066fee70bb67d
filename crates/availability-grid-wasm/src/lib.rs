//! WASM bindings for availability-grid.
//!
//! Exposes label generation, range summaries and the drag-selection state
//! machine to JavaScript via `wasm-bindgen`. Matrices and other structured
//! values cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-grid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/availability_grid_wasm.wasm
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use availability_grid::summary::week_of;
use availability_grid::{
    describe_ranges, selected_ranges, AvailabilityMatrix, Cell, CommitSink, GridConfig,
    GridSelector, LabelSet, PaintPolicy, PointerEvent,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// ---------------------------------------------------------------------------
// JSON helpers
//
// Parsing and construction report plain `String` errors so they can be
// exercised off-wasm; the exports convert them to `JsValue` at the boundary.
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_matrix(json: &str) -> Result<AvailabilityMatrix, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid matrix JSON: {}", e))
}

fn parse_labels(json: Option<String>) -> Result<Option<LabelSet>, String> {
    json.map(|s| serde_json::from_str(&s))
        .transpose()
        .map_err(|e| format!("Invalid labels JSON: {}", e))
}

fn parse_today(today: Option<String>) -> Result<NaiveDate, String> {
    match today {
        Some(s) => s.parse().map_err(|e| format!("Invalid date '{}': {}", s, e)),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_policy(policy: Option<String>) -> Result<PaintPolicy, String> {
    match policy.as_deref() {
        None | Some("cumulative") => Ok(PaintPolicy::Cumulative),
        Some("restore_outside") => Ok(PaintPolicy::RestoreOutside),
        Some(other) => Err(format!(
            "Unknown paint policy '{}'. Expected 'cumulative' or 'restore_outside'",
            other
        )),
    }
}

/// Parse every constructor argument and build the selector around `sink`.
fn build_selector<S: CommitSink>(
    matrix_json: &str,
    labels_json: Option<String>,
    policy: Option<String>,
    sink: S,
) -> Result<GridSelector<S>, String> {
    let matrix = parse_matrix(matrix_json)?;
    let labels = parse_labels(labels_json)?;
    let policy = parse_policy(policy)?;
    let selector = GridSelector::new(matrix, labels, sink).map_err(|e| e.to_string())?;
    Ok(selector.with_policy(policy))
}

fn replace_from_json<S: CommitSink>(
    selector: &mut GridSelector<S>,
    matrix_json: &str,
) -> Result<(), String> {
    let matrix = parse_matrix(matrix_json)?;
    selector.replace_matrix(matrix).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn config_for(matrix: &AvailabilityMatrix) -> GridConfig {
    GridConfig {
        days: matrix.days(),
        slots: matrix.slots(),
        ..GridConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Stateless exports
// ---------------------------------------------------------------------------

/// Default `{days, times}` labels for the week after `today` (YYYY-MM-DD,
/// defaults to the local date).
#[wasm_bindgen(js_name = "defaultLabels")]
pub fn default_labels(today: Option<String>) -> Result<String, JsValue> {
    let today = parse_today(today).map_err(JsValue::from)?;
    to_json(&LabelSet::defaults_for(today))
}

/// The "week of" date for a confirmation screen, e.g. `"3/8/2026"`.
#[wasm_bindgen(js_name = "weekOf")]
pub fn week_of_js(today: Option<String>) -> Result<String, JsValue> {
    Ok(week_of(parse_today(today).map_err(JsValue::from)?))
}

/// Contiguous selected runs as `[{day, start_slot, end_slot}]`.
#[wasm_bindgen(js_name = "selectedRanges")]
pub fn selected_ranges_js(matrix_json: &str) -> Result<String, JsValue> {
    let matrix = parse_matrix(matrix_json).map_err(JsValue::from)?;
    to_json(&selected_ranges(&matrix))
}

/// Human-readable range descriptions as a JSON array of strings.
#[wasm_bindgen(js_name = "describeRanges")]
pub fn describe_ranges_js(matrix_json: &str, today: Option<String>) -> Result<String, JsValue> {
    let matrix = parse_matrix(matrix_json).map_err(JsValue::from)?;
    let config = config_for(&matrix);
    let labels = LabelSet::for_config(&config, parse_today(today).map_err(JsValue::from)?);
    to_json(&describe_ranges(&matrix, &labels, &config))
}

/// Apply a JSON array of pointer events to a matrix and return the result.
#[wasm_bindgen(js_name = "applyEvents")]
pub fn apply_events(
    matrix_json: &str,
    events_json: &str,
    policy: Option<String>,
) -> Result<String, JsValue> {
    let events: Vec<PointerEvent> = serde_json::from_str(events_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))?;
    let mut selector = build_selector(matrix_json, None, policy, |_: &AvailabilityMatrix| {})
        .map_err(JsValue::from)?;
    for event in events {
        selector.handle(event).map_err(js_err)?;
    }
    to_json(selector.matrix())
}

// ---------------------------------------------------------------------------
// Stateful selector
// ---------------------------------------------------------------------------

/// Forwards commits to a JavaScript callback as a JSON matrix string.
struct JsSink {
    callback: js_sys::Function,
}

impl CommitSink for JsSink {
    fn commit(&mut self, matrix: &AvailabilityMatrix) {
        let Ok(json) = serde_json::to_string(matrix) else {
            return;
        };
        // Errors thrown by the callback stay on the JS side.
        let _ = self.callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
    }
}

/// A `mouseup` listener on `document`, removed again on drop.
struct DocumentListener {
    document: web_sys::Document,
    closure: Closure<dyn FnMut()>,
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("mouseup", self.closure.as_ref().unchecked_ref());
    }
}

/// A drag-selection grid driven from JavaScript pointer events.
///
/// The commit callback must not call back into this handle synchronously.
#[wasm_bindgen]
pub struct GridSelectorHandle {
    inner: Rc<RefCell<GridSelector<JsSink>>>,
    listener: Option<DocumentListener>,
}

#[wasm_bindgen]
impl GridSelectorHandle {
    /// Create a selector over `matrix_json`. `labels_json` is an optional
    /// `{days, times}` object; `on_commit` receives the matrix as JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(
        matrix_json: &str,
        labels_json: Option<String>,
        on_commit: js_sys::Function,
        policy: Option<String>,
    ) -> Result<GridSelectorHandle, JsValue> {
        let sink = JsSink {
            callback: on_commit,
        };
        let selector =
            build_selector(matrix_json, labels_json, policy, sink).map_err(JsValue::from)?;
        Ok(Self {
            inner: Rc::new(RefCell::new(selector)),
            listener: None,
        })
    }

    /// Listen for `mouseup` anywhere on the document. Idempotent.
    pub fn mount(&mut self) -> Result<(), JsValue> {
        if self.listener.is_some() {
            return Ok(());
        }
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;
        let weak = Rc::downgrade(&self.inner);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().pointer_up();
            }
        });
        document.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        self.listener = Some(DocumentListener { document, closure });
        Ok(())
    }

    /// Remove the document listener, if any.
    pub fn unmount(&mut self) {
        self.listener = None;
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&self, day: usize, slot: usize) -> Result<(), JsValue> {
        self.inner
            .borrow_mut()
            .pointer_down(Cell::new(day, slot))
            .map_err(js_err)
    }

    #[wasm_bindgen(js_name = "pointerEnter")]
    pub fn pointer_enter(&self, day: usize, slot: usize) -> Result<(), JsValue> {
        self.inner
            .borrow_mut()
            .pointer_enter(Cell::new(day, slot))
            .map_err(js_err)
    }

    /// Release handler for hosts that do not use [`mount`](Self::mount).
    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&self) -> bool {
        self.inner.borrow_mut().pointer_up()
    }

    #[wasm_bindgen(js_name = "isDragging")]
    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().is_dragging()
    }

    #[wasm_bindgen(js_name = "isSelected")]
    pub fn is_selected(&self, day: usize, slot: usize) -> bool {
        self.inner.borrow().matrix().is_selected(Cell::new(day, slot))
    }

    /// The current matrix as JSON.
    pub fn matrix(&self) -> Result<String, JsValue> {
        to_json(self.inner.borrow().matrix())
    }

    /// The current labels as `{days, times}` JSON.
    pub fn labels(&self) -> Result<String, JsValue> {
        to_json(self.inner.borrow().labels())
    }

    /// Replace the matrix (rejected while a drag is in progress).
    #[wasm_bindgen(js_name = "replaceMatrix")]
    pub fn replace_matrix(&self, matrix_json: &str) -> Result<(), JsValue> {
        replace_from_json(&mut *self.inner.borrow_mut(), matrix_json).map_err(JsValue::from)
    }
}
