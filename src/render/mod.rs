//! Renderer boundary.
//!
//! Drawing cells is the host's job. The engine hands the renderer a
//! [`RenderFrame`]: what is selected, what autofill proposes, where the
//! viewport is and which rows/columns are in view, plus overlay geometry.

pub mod selection;

pub use selection::{handle_rect, range_corner, selection_rects, Overlay, SelectionRect};

use serde::Serialize;

use crate::layout::VisibleSpan;
use crate::types::{ExtendToArea, SelectedView, SelectionType};

/// Snapshot handed to the renderer on every repaint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub selection: SelectedView,
    pub selection_type: SelectionType,
    pub extend_to: Option<ExtendToArea>,
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub width: f64,
    pub height: f64,
    pub rows: VisibleSpan,
    pub columns: VisibleSpan,
    pub overlay: Overlay,
    /// Canvas x of the column resize guide while a column is being resized.
    pub column_guide: Option<f64>,
    /// Canvas y of the row resize guide while a row is being resized.
    pub row_guide: Option<f64>,
}

/// Paints the visible region of a sheet.
pub trait SheetRenderer {
    fn render_sheet(&mut self, frame: &RenderFrame);
}

/// Renderer that drops every frame. Useful when the host polls
/// [`crate::viewer::GridView::frame`] itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl SheetRenderer for NullRenderer {
    fn render_sheet(&mut self, _frame: &RenderFrame) {}
}

/// Renderer that keeps every frame it was asked to paint.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub frames: Vec<RenderFrame>,
}

impl SheetRenderer for RecordingRenderer {
    fn render_sheet(&mut self, frame: &RenderFrame) {
        self.frames.push(frame.clone());
    }
}
