//! DOM elements the engine drives.
//!
//! ```text
//! parent (position: relative)
//! ├── canvas (host-drawn, z-index 0)
//! ├── scroll container (overflow: auto, z-index 1, receives pointer events)
//! │   └── spacer (sized to the virtual scroll extent)
//! └── overlay layer (pointer-events: none, z-index 2)
//!     ├── cell outline, area outline, extend-to outline
//!     ├── selection handle (pointer-events: auto)
//!     ├── column guide, row guide
//!     └── editor wrapper
//! ```

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::error::{GridError, Result};
use crate::render::{Overlay, SelectionRect};
use crate::types::Rect;
use crate::viewer::Effect;

const OUTLINE_COLOR: &str = "#217346";
const AREA_FILL: &str = "rgba(33, 115, 70, 0.08)";

fn px(value: f64) -> String {
    format!("{value}px")
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement> {
    let element = document
        .create_element("div")
        .map_err(|_| GridError::Js("cannot create div".into()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GridError::Js("div is not an HtmlElement".into()))?;
    element.set_class_name(class);
    let style = element.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("display", "none");
    let _ = style.set_property("box-sizing", "border-box");
    let _ = style.set_property("pointer-events", "none");
    Ok(element)
}

fn place(element: &HtmlElement, rect: Option<Rect>) {
    let style = element.style();
    let Some(rect) = rect else {
        let _ = style.set_property("display", "none");
        return;
    };
    let _ = style.set_property("display", "block");
    let _ = style.set_property("left", &px(rect.x));
    let _ = style.set_property("top", &px(rect.y));
    let _ = style.set_property("width", &px(rect.width));
    let _ = style.set_property("height", &px(rect.height));
}

/// Draw a multi-piece outline into `element`, one child per piece.
fn place_pieces(
    document: &Document,
    element: &HtmlElement,
    pieces: &[SelectionRect],
    dashed: bool,
) {
    element.set_inner_html("");
    if pieces.is_empty() {
        let _ = element.style().set_property("display", "none");
        return;
    }
    let _ = element.style().set_property("display", "block");
    let line = if dashed { "dashed" } else { "solid" };
    for piece in pieces {
        let Ok(child) = create_div(document, "xlgrid-outline-piece") else {
            continue;
        };
        place(&child, Some(Rect::new(piece.x, piece.y, piece.w, piece.h)));
        let style = child.style();
        if !dashed {
            let _ = style.set_property("background", AREA_FILL);
        }
        let border = format!("1px {line} {OUTLINE_COLOR}");
        for (side, draw) in [
            ("border-top", piece.draw_top),
            ("border-bottom", piece.draw_bottom),
            ("border-left", piece.draw_left),
            ("border-right", piece.draw_right),
        ] {
            if draw {
                let _ = style.set_property(side, &border);
            }
        }
        let _ = element.append_child(&child);
    }
}

/// Explicit handle on the viewport's DOM, owned by the web binding.
pub struct ViewportHandle {
    document: Document,
    pub scroll_container: HtmlElement,
    spacer: HtmlElement,
    layer: HtmlElement,
    cell_outline: HtmlElement,
    area_outline: HtmlElement,
    extend_outline: HtmlElement,
    pub selection_handle: HtmlElement,
    column_guide: HtmlElement,
    row_guide: HtmlElement,
    editor: HtmlElement,
}

impl ViewportHandle {
    /// Build the spacer and overlay elements around `scroll_container`.
    ///
    /// # Errors
    /// Fails when there is no document or the container has no parent.
    pub fn create(scroll_container: HtmlElement) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| GridError::Js("no document".into()))?;
        let parent = scroll_container
            .parent_element()
            .ok_or_else(|| GridError::Js("scroll container has no parent".into()))?;

        if let Some(parent) = parent.dyn_ref::<HtmlElement>() {
            let style = parent.style();
            if style
                .get_property_value("position")
                .unwrap_or_default()
                .is_empty()
            {
                let _ = style.set_property("position", "relative");
            }
        }

        let container_style = scroll_container.style();
        let _ = container_style.set_property("overflow", "auto");
        let _ = container_style.set_property("position", "absolute");
        let _ = container_style.set_property("inset", "0");
        let _ = container_style.set_property("z-index", "1");
        let _ = container_style.set_property("background", "transparent");

        let spacer = create_div(&document, "xlgrid-spacer")?;
        let _ = spacer.style().set_property("display", "block");
        let _ = spacer.style().set_property("top", "0");
        let _ = spacer.style().set_property("left", "0");
        let _ = scroll_container.append_child(&spacer);

        let layer = create_div(&document, "xlgrid-overlay")?;
        let layer_style = layer.style();
        let _ = layer_style.set_property("display", "block");
        let _ = layer_style.set_property("inset", "0");
        let _ = layer_style.set_property("overflow", "hidden");
        let _ = layer_style.set_property("z-index", "2");

        let cell_outline = create_div(&document, "xlgrid-cell-outline")?;
        let _ = cell_outline
            .style()
            .set_property("border", &format!("2px solid {OUTLINE_COLOR}"));
        let area_outline = create_div(&document, "xlgrid-area-outline")?;
        let extend_outline = create_div(&document, "xlgrid-extend-outline")?;
        for outline in [&area_outline, &extend_outline] {
            let _ = outline.style().set_property("inset", "0");
        }

        let selection_handle = create_div(&document, "xlgrid-handle")?;
        let handle_style = selection_handle.style();
        let _ = handle_style.set_property("background", OUTLINE_COLOR);
        let _ = handle_style.set_property("pointer-events", "auto");
        let _ = handle_style.set_property("cursor", "crosshair");

        let column_guide = create_div(&document, "xlgrid-column-guide")?;
        let _ = column_guide.style().set_property("top", "0");
        let _ = column_guide.style().set_property("width", "1px");
        let _ = column_guide.style().set_property("height", "100%");
        let row_guide = create_div(&document, "xlgrid-row-guide")?;
        let _ = row_guide.style().set_property("left", "0");
        let _ = row_guide.style().set_property("height", "1px");
        let _ = row_guide.style().set_property("width", "100%");
        for guide in [&column_guide, &row_guide] {
            let _ = guide.style().set_property("background", OUTLINE_COLOR);
        }

        let editor = create_div(&document, "xlgrid-editor")?;
        let _ = editor.style().set_property("pointer-events", "auto");

        for child in [
            &cell_outline,
            &area_outline,
            &extend_outline,
            &selection_handle,
            &column_guide,
            &row_guide,
            &editor,
        ] {
            let _ = layer.append_child(child);
        }
        let _ = parent.append_child(&layer);

        Ok(Self {
            document,
            scroll_container,
            spacer,
            layer,
            cell_outline,
            area_outline,
            extend_outline,
            selection_handle,
            column_guide,
            row_guide,
            editor,
        })
    }

    /// The editor wrapper; the host mounts its input inside it.
    pub fn editor(&self) -> &HtmlElement {
        &self.editor
    }

    /// Current container offsets, fractional where the browser reports them.
    pub fn scroll_offset(&self) -> (f64, f64) {
        let read = |name: &str| {
            Reflect::get(self.scroll_container.as_ref(), &JsValue::from_str(name))
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(0.0)
        };
        (read("scrollLeft"), read("scrollTop"))
    }

    /// Canvas point of a client-space pointer position.
    pub fn to_canvas(&self, client_x: i32, client_y: i32) -> (f64, f64) {
        let rect = self.scroll_container.get_bounding_client_rect();
        (
            f64::from(client_x) - rect.left(),
            f64::from(client_y) - rect.top(),
        )
    }

    /// Apply the DOM part of an effect. Returns `false` for effects that
    /// belong to the host.
    pub fn apply(&self, effect: &Effect) -> bool {
        match effect {
            Effect::ScrollContainer { left, top } => {
                let target = self.scroll_container.as_ref();
                let left = JsValue::from_f64(*left);
                let top = JsValue::from_f64(*top);
                let _ = Reflect::set(target, &JsValue::from_str("scrollLeft"), &left);
                let _ = Reflect::set(target, &JsValue::from_str("scrollTop"), &top);
            }
            Effect::ResizeSpacer { width, height } => {
                let style = self.spacer.style();
                let _ = style.set_property("width", &px(*width));
                let _ = style.set_property("height", &px(*height));
            }
            Effect::ShowColumnGuide { x } => {
                let style = self.column_guide.style();
                let _ = style.set_property("display", "block");
                let _ = style.set_property("left", &px(*x));
            }
            Effect::ShowRowGuide { y } => {
                let style = self.row_guide.style();
                let _ = style.set_property("display", "block");
                let _ = style.set_property("top", &px(*y));
            }
            Effect::HideGuides => {
                let _ = self.column_guide.style().set_property("display", "none");
                let _ = self.row_guide.style().set_property("display", "none");
            }
            Effect::SetCursor { cursor } => {
                let _ = self
                    .scroll_container
                    .style()
                    .set_property("cursor", cursor.css());
            }
            Effect::EndEdit => place(&self.editor, None),
            _ => return false,
        }
        true
    }

    /// Position overlay elements for a new frame. The editor wrapper follows
    /// the anchor cell while `editing`.
    pub fn place_overlay(&self, overlay: &Overlay, editing: bool) {
        place(&self.cell_outline, overlay.cell_outline);
        place_pieces(&self.document, &self.area_outline, &overlay.area_outline, false);
        place_pieces(&self.document, &self.extend_outline, &overlay.extend_outline, true);
        place(&self.selection_handle, overlay.handle);
        place(&self.editor, overlay.cell_outline.filter(|_| editing));
    }

    /// Remove everything [`ViewportHandle::create`] added.
    pub fn detach(&self) {
        self.spacer.remove();
        self.layer.remove();
    }
}
