//! Browser binding.
//!
//! [`WorksheetView`] wires a [`GridView`] over a JS workbook object to the DOM:
//! pointer, double-click, context-menu and scroll listeners are registered on
//! the scroll container when the view is created. Effects are applied to the
//! [`ViewportHandle`]; everything else is forwarded to the host's event
//! callback as a plain JS object (`{ type: "columnWidthChanged", ... }`).
//!
//! State borrows are always dropped before touching the DOM or calling back
//! into JS, since either can re-enter the view.

mod handle;
mod js_model;

pub use handle::ViewportHandle;
pub use js_model::JsModel;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, PointerEvent};

use crate::config::GridConfig;
use crate::model::CopiedStyles;
use crate::render::{RenderFrame, SheetRenderer};
use crate::viewer::{ContextMenuAction, Effect, GridView};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Keeps the latest frame so the JS render callback runs after the state
/// borrow is released.
#[derive(Default)]
struct LatestFrame(Option<RenderFrame>);

impl SheetRenderer for LatestFrame {
    fn render_sheet(&mut self, frame: &RenderFrame) {
        self.0 = Some(frame.clone());
    }
}

struct WebState {
    grid: GridView<JsModel>,
    render_callback: Option<Function>,
    event_callback: Option<Function>,
}

#[derive(Clone)]
struct Shared {
    state: Rc<RefCell<WebState>>,
    handle: Rc<ViewportHandle>,
}

impl Shared {
    /// Run one engine step and apply its effects.
    fn dispatch(&self, step: impl FnOnce(&mut GridView<JsModel>) -> Vec<Effect>) {
        let effects = {
            let mut s = self.state.borrow_mut();
            step(&mut s.grid)
        };
        self.apply(effects);
    }

    fn apply(&self, effects: Vec<Effect>) {
        let mut render = false;
        for effect in effects {
            if matches!(effect, Effect::Render) {
                render = true;
            } else if !self.handle.apply(&effect) {
                self.notify(&effect);
            }
        }
        if render {
            self.render();
        }
    }

    fn notify(&self, effect: &Effect) {
        let Some(callback) = self.state.borrow().event_callback.clone() else {
            return;
        };
        match serde_wasm_bindgen::to_value(effect) {
            Ok(value) => {
                if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                    warn!(?err, "event callback threw");
                }
            }
            Err(err) => warn!(%err, "cannot convert effect"),
        }
    }

    /// Render pass: sync scroll, place overlays, then hand the frame to JS.
    fn render(&self) {
        let (effects, frame, editing, callback) = {
            let mut s = self.state.borrow_mut();
            let mut latest = LatestFrame::default();
            let effects = s.grid.render_sheet(&mut latest);
            let editing = s.grid.editing_cell().is_some();
            (effects, latest.0, editing, s.render_callback.clone())
        };
        for effect in &effects {
            self.handle.apply(effect);
        }
        let Some(frame) = frame else {
            return;
        };
        self.handle.place_overlay(&frame.overlay, editing);
        if let Some(callback) = callback {
            match serde_wasm_bindgen::to_value(&frame) {
                Ok(value) => {
                    if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                        warn!(?err, "render callback threw");
                    }
                }
                Err(err) => warn!(%err, "cannot convert frame"),
            }
        }
    }
}

/// The worksheet view exported to JavaScript
#[wasm_bindgen]
pub struct WorksheetView {
    shared: Shared,
    #[allow(dead_code)]
    pointer_closures: Vec<Closure<dyn FnMut(PointerEvent)>>,
    #[allow(dead_code)]
    mouse_closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[allow(dead_code)]
    scroll_closure: Closure<dyn FnMut(web_sys::Event)>,
}

#[wasm_bindgen]
impl WorksheetView {
    /// Create a view.
    ///
    /// `config` may be `undefined` or any subset of the grid configuration.
    /// `render` receives the render frame on every repaint; `on_event`
    /// receives host-facing effects.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the DOM cannot be
    /// prepared.
    #[wasm_bindgen(constructor)]
    pub fn new(
        model: JsValue,
        scroll_container: HtmlElement,
        config: JsValue,
        render: Option<Function>,
        on_event: Option<Function>,
    ) -> Result<WorksheetView, JsValue> {
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };
        let grid = GridView::new(JsModel::new(model), config)?;
        let handle = Rc::new(ViewportHandle::create(scroll_container)?);
        let shared = Shared {
            state: Rc::new(RefCell::new(WebState {
                grid,
                render_callback: render,
                event_callback: on_event,
            })),
            handle,
        };

        let container = shared.handle.scroll_container.clone();
        let mut pointer_closures: Vec<Closure<dyn FnMut(PointerEvent)>> = Vec::new();
        let mut mouse_closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        // Pointer down: capture so moves and the release keep coming to us
        {
            let shared = shared.clone();
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                if event.button() != 0 {
                    return;
                }
                let _ = shared
                    .handle
                    .scroll_container
                    .set_pointer_capture(event.pointer_id());
                let (x, y) = shared.handle.to_canvas(event.client_x(), event.client_y());
                let shift = event.shift_key();
                shared.dispatch(|grid| grid.on_pointer_down(x, y, shift));
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
                .ok();
            pointer_closures.push(closure);
        }

        // Pointer down on the autofill handle
        {
            let shared = shared.clone();
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                event.stop_propagation();
                event.prevent_default();
                let _ = shared
                    .handle
                    .scroll_container
                    .set_pointer_capture(event.pointer_id());
                shared.dispatch(GridView::on_handle_pointer_down);
            }) as Box<dyn FnMut(PointerEvent)>);
            shared
                .handle
                .selection_handle
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
                .ok();
            pointer_closures.push(closure);
        }

        for (name, up) in [("pointermove", false), ("pointerup", true)] {
            let shared = shared.clone();
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                let (x, y) = shared.handle.to_canvas(event.client_x(), event.client_y());
                if up {
                    shared.dispatch(|grid| grid.on_pointer_up(x, y));
                } else {
                    shared.dispatch(|grid| grid.on_pointer_move(x, y));
                }
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
            pointer_closures.push(closure);
        }

        for name in ["pointercancel", "lostpointercapture"] {
            let shared = shared.clone();
            let closure = Closure::wrap(Box::new(move |_event: PointerEvent| {
                shared.dispatch(GridView::on_pointer_cancel);
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
            pointer_closures.push(closure);
        }

        // Double click starts editing
        {
            let shared = shared.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                event.stop_propagation();
                let (x, y) = shared.handle.to_canvas(event.client_x(), event.client_y());
                shared.dispatch(|grid| grid.on_double_click(x, y));
            }) as Box<dyn FnMut(MouseEvent)>);
            container
                .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())
                .ok();
            mouse_closures.push(closure);
        }

        // Context menu is forwarded to the host
        {
            let shared = shared.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                event.prevent_default();
                event.stop_propagation();
                let (x, y) = shared.handle.to_canvas(event.client_x(), event.client_y());
                shared.dispatch(|grid| grid.on_context_menu(x, y));
            }) as Box<dyn FnMut(MouseEvent)>);
            container
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())
                .ok();
            mouse_closures.push(closure);
        }

        let scroll_closure = {
            let shared = shared.clone();
            Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let (left, top) = shared.handle.scroll_offset();
                shared.dispatch(|grid| grid.on_scroll(left, top));
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        container
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref())
            .ok();

        Ok(WorksheetView {
            shared,
            pointer_closures,
            mouse_closures,
            scroll_closure,
        })
    }

    #[wasm_bindgen(js_name = onPointerDown)]
    pub fn on_pointer_down(&self, x: f64, y: f64, shift: bool) {
        self.shared.dispatch(|grid| grid.on_pointer_down(x, y, shift));
    }

    #[wasm_bindgen(js_name = onPointerHandleDown)]
    pub fn on_pointer_handle_down(&self) {
        self.shared.dispatch(GridView::on_handle_pointer_down);
    }

    #[wasm_bindgen(js_name = onPointerMove)]
    pub fn on_pointer_move(&self, x: f64, y: f64) {
        self.shared.dispatch(|grid| grid.on_pointer_move(x, y));
    }

    #[wasm_bindgen(js_name = onPointerUp)]
    pub fn on_pointer_up(&self, x: f64, y: f64) {
        self.shared.dispatch(|grid| grid.on_pointer_up(x, y));
    }

    /// Repaint now. Sizes and frozen counts are re-read from the model, so
    /// host-side edits (undo, redo) are picked up.
    #[wasm_bindgen(js_name = renderSheet)]
    pub fn render_sheet(&self) {
        self.shared.state.borrow_mut().grid.invalidate_layout();
        self.shared.render();
    }

    /// Arm the format painter with styles copied by the host. The next area
    /// selection passes them to `model.onPasteStyles`. `null` disarms it.
    #[wasm_bindgen(js_name = setCopyStyles)]
    pub fn set_copy_styles(&self, styles: JsValue) -> Result<(), JsValue> {
        let styles = if styles.is_null() || styles.is_undefined() {
            None
        } else {
            let value: CopiedStyles = serde_wasm_bindgen::from_value(styles)
                .map_err(|e| JsValue::from_str(&format!("Invalid styles: {e}")))?;
            Some(value)
        };
        self.shared.dispatch(|grid| grid.set_copy_styles(styles));
        Ok(())
    }

    /// The viewport (canvas) size changed.
    pub fn resize(&self, width: f64, height: f64) {
        self.shared.dispatch(|grid| {
            grid.model_mut().set_window_size(width, height);
            grid.resize(width, height)
        });
    }

    /// Current render frame as a JS object.
    ///
    /// # Errors
    /// Returns an error if the frame cannot be converted.
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        let frame = self.shared.state.borrow_mut().grid.frame();
        serde_wasm_bindgen::to_value(&frame)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Run a context menu action such as `"insertRowAbove"`.
    ///
    /// # Errors
    /// Returns an error for unknown action names.
    #[wasm_bindgen(js_name = applyContextAction)]
    pub fn apply_context_action(&self, action: JsValue) -> Result<(), JsValue> {
        let action: ContextMenuAction = serde_wasm_bindgen::from_value(action)
            .map_err(|e| JsValue::from_str(&format!("Unknown action: {e}")))?;
        self.shared
            .dispatch(|grid| grid.apply_context_action(action));
        Ok(())
    }

    /// The host's editor closed.
    #[wasm_bindgen(js_name = finishEditing)]
    pub fn finish_editing(&self) {
        self.shared.dispatch(GridView::finish_editing);
    }

    /// Element the host mounts its cell editor into.
    #[wasm_bindgen(js_name = editorElement)]
    pub fn editor_element(&self) -> HtmlElement {
        self.shared.handle.editor().clone()
    }

    /// Remove the elements this view added to the DOM.
    pub fn detach(&self) {
        self.shared.handle.detach();
    }
}
