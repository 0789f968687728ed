//! Interaction engine for one sheet view.
//!
//! [`GridView`] owns the pointer gesture state machines, the viewport and the
//! scroll synchronizer, and talks to the workbook through [`SheetModel`].
//! Every entry point is a pure `(state, input) -> (state, effects)` step: it
//! mutates the model and its own state, and returns the [`Effect`]s the host
//! must apply. Nothing here touches the DOM.

pub mod context_menu;
pub mod effects;
pub mod events;
pub mod extend;
pub mod resize;
pub mod scroll;
pub mod selection;

pub use context_menu::ContextMenuAction;
pub use effects::{Cursor, Effect, Effects};
pub use events::{hit_test, HitTarget};
pub use extend::{resolve_extend_area, ExtendDrag};
pub use resize::{ResizeAxis, ResizeDrag};
pub use scroll::{ScrollSource, ScrollSync};

use tracing::{debug, trace};

use crate::cell_ref::column_name;
use crate::config::GridConfig;
use crate::error::Result;
use crate::layout::{SheetLayout, Viewport, VisibleSpan};
use crate::model::{CopiedStyles, SheetModel};
use crate::render::{
    handle_rect, range_corner, selection_rects, Overlay, RenderFrame, SheetRenderer,
};
use crate::types::{EditingCell, ExtendToArea, SelectedView};

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    /// Range drag over cells, anchored at the pointer-down cell
    SelectingCells,
    /// Dragging across column headers. `base` is the column span a
    /// shift-click started from.
    HeaderColumns { anchor: u32, base: Option<(u32, u32)> },
    /// Dragging across row headers
    HeaderRows { anchor: u32, base: Option<(u32, u32)> },
    Resizing(ResizeDrag),
    Extending(ExtendDrag),
}

pub struct GridView<M: SheetModel> {
    model: M,
    config: GridConfig,
    layout: SheetLayout,
    layout_dirty: bool,
    viewport: Viewport,
    scroll: ScrollSync,
    gesture: Gesture,
    editing: Option<EditingCell>,
    /// Format painter payload, pasted when the next area selection ends.
    copy_styles: Option<CopiedStyles>,
    cursor: Cursor,
}

impl<M: SheetModel> GridView<M> {
    /// Create a view over `model`.
    ///
    /// # Errors
    /// Returns an error if `config` fails validation.
    pub fn new(model: M, config: GridConfig) -> Result<Self> {
        config.validate()?;
        let layout = SheetLayout::from_model(&model, &config);
        let mut viewport = Viewport::new();
        viewport.set_scroll(model.scroll_x(), model.scroll_y());
        let scroll = ScrollSync::new(config.scroll_margin_x, config.scroll_margin_y);
        Ok(Self {
            model,
            config,
            layout,
            layout_dirty: false,
            viewport,
            scroll,
            gesture: Gesture::Idle,
            editing: None,
            copy_styles: None,
            cursor: Cursor::Default,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model. Cached offsets are dropped, since the
    /// caller may change sizes or frozen counts.
    pub fn model_mut(&mut self) -> &mut M {
        self.layout_dirty = true;
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scroll_sync(&self) -> &ScrollSync {
        &self.scroll
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Proposed autofill area while the handle is being dragged.
    pub fn extend_area(&self) -> Option<ExtendToArea> {
        match &self.gesture {
            Gesture::Extending(drag) => drag.area(),
            _ => None,
        }
    }

    /// True between pointer-down and pointer-up of any drag.
    pub fn is_dragging(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn editing_cell(&self) -> Option<&EditingCell> {
        self.editing.as_ref()
    }

    pub fn copy_styles(&self) -> Option<&CopiedStyles> {
        self.copy_styles.as_ref()
    }

    /// Arm (or with `None`, disarm) the format painter.
    pub fn set_copy_styles(&mut self, styles: Option<CopiedStyles>) -> Vec<Effect> {
        self.copy_styles = styles;
        let mut fx = Effects::new();
        self.set_cursor(self.idle_cursor(), &mut fx);
        fx.into_vec()
    }

    fn idle_cursor(&self) -> Cursor {
        if self.copy_styles.is_some() {
            Cursor::Copy
        } else {
            Cursor::Default
        }
    }

    fn set_cursor(&mut self, cursor: Cursor, fx: &mut Effects) {
        if cursor != self.cursor {
            self.cursor = cursor;
            fx.push(Effect::SetCursor { cursor });
        }
    }

    /// Finish a format-painter drag over the selected range.
    fn paste_copied_styles(&mut self, fx: &mut Effects) {
        let Some(styles) = self.copy_styles.take() else {
            return;
        };
        let empty = match &styles {
            CopiedStyles::Null => true,
            CopiedStyles::Array(list) => list.is_empty(),
            _ => false,
        };
        if !empty {
            debug!("pasting copied styles");
            self.model.paste_styles(&styles);
        }
        self.set_cursor(Cursor::Default, fx);
    }

    /// Drop cached offsets. Call after sizes, frozen counts, rows/columns or
    /// the active sheet change behind the engine's back.
    pub fn invalidate_layout(&mut self) {
        self.layout_dirty = true;
    }

    fn refresh_layout(&mut self) {
        if !self.layout_dirty && self.layout.is_current(&self.model) {
            return;
        }
        let sheet = self.model.selected_view().sheet;
        if sheet != self.layout.sheet {
            debug!(from = self.layout.sheet, to = sheet, "active sheet changed");
            self.scroll.cancel_pending();
            self.gesture = Gesture::Idle;
        }
        self.layout = SheetLayout::from_model(&self.model, &self.config);
        self.layout_dirty = false;
    }

    /// The host's viewport size changed.
    pub fn resize(&mut self, width: f64, height: f64) -> Vec<Effect> {
        self.viewport.resize(width, height);
        let mut fx = Effects::new();
        fx.request_render();
        fx.into_vec()
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64, shift: bool) -> Vec<Effect> {
        self.refresh_layout();
        let mut fx = Effects::new();
        if self.editing.take().is_some() {
            fx.push(Effect::EndEdit);
        }
        let view = self.model.selected_view();
        let hit = hit_test(
            &mut self.layout,
            &self.model,
            &self.viewport,
            &self.config,
            view.range,
            x,
            y,
        );
        debug!(?hit, x, y, shift, "pointer down");

        self.gesture = match hit {
            HitTarget::SelectionHandle => {
                Gesture::Extending(ExtendDrag::begin(view.sheet, view.range))
            }
            HitTarget::ColumnResize(column) => {
                let (left, width) = self
                    .viewport
                    .column_span_pixels(&mut self.layout, &self.model, column);
                let edge = left + width;
                fx.push(Effect::ShowColumnGuide { x: edge });
                Gesture::Resizing(ResizeDrag::begin(ResizeAxis::Column, column, x, width, edge))
            }
            HitTarget::RowResize(row) => {
                let (top, height) = self
                    .viewport
                    .row_span_pixels(&mut self.layout, &self.model, row);
                let edge = top + height;
                fx.push(Effect::ShowRowGuide { y: edge });
                Gesture::Resizing(ResizeDrag::begin(ResizeAxis::Row, row, y, height, edge))
            }
            HitTarget::CornerHeader => {
                let (last_row, last_column) = (self.config.last_row, self.config.last_column);
                selection::select_all(&mut self.model, last_row, last_column);
                Gesture::Idle
            }
            HitTarget::ColumnHeader(column) => {
                let base = shift.then(|| selection::column_span(&self.model));
                let last_row = self.config.last_row;
                selection::select_columns(&mut self.model, column, column, base, last_row);
                Gesture::HeaderColumns {
                    anchor: column,
                    base,
                }
            }
            HitTarget::RowHeader(row) => {
                let base = shift.then(|| selection::row_span(&self.model));
                let last_column = self.config.last_column;
                selection::select_rows(&mut self.model, row, row, base, last_column);
                Gesture::HeaderRows { anchor: row, base }
            }
            HitTarget::Cell(cell) => {
                if shift {
                    selection::extend_to_cell(&mut self.model, cell.row, cell.column);
                } else {
                    selection::select_cell(&mut self.model, cell.row, cell.column);
                }
                Gesture::SelectingCells
            }
        };
        fx.request_render();
        fx.into_vec()
    }

    /// Pointer-down on a host-drawn autofill handle element. Starts the
    /// extend-to drag without hit testing.
    pub fn on_handle_pointer_down(&mut self) -> Vec<Effect> {
        self.refresh_layout();
        let view = self.model.selected_view();
        self.gesture = Gesture::Extending(ExtendDrag::begin(view.sheet, view.range));
        let mut fx = Effects::new();
        fx.request_render();
        fx.into_vec()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Vec<Effect> {
        self.refresh_layout();
        let mut fx = Effects::new();
        match &mut self.gesture {
            Gesture::Idle => {
                let view = self.model.selected_view();
                let hit = hit_test(
                    &mut self.layout,
                    &self.model,
                    &self.viewport,
                    &self.config,
                    view.range,
                    x,
                    y,
                );
                let cursor = match hit {
                    HitTarget::ColumnResize(_) => Cursor::ColResize,
                    HitTarget::RowResize(_) => Cursor::RowResize,
                    _ => self.idle_cursor(),
                };
                self.set_cursor(cursor, &mut fx);
                return fx.into_vec();
            }
            Gesture::SelectingCells => {
                let cell = self
                    .viewport
                    .pixel_to_cell(&mut self.layout, &self.model, x, y);
                trace!(row = cell.row, column = cell.column, "area selecting");
                selection::extend_to_cell(&mut self.model, cell.row, cell.column);
            }
            Gesture::HeaderColumns { anchor, base } => {
                let column = self
                    .viewport
                    .column_at_pixel(&mut self.layout, &self.model, x);
                let last_row = self.config.last_row;
                selection::select_columns(&mut self.model, *anchor, column, *base, last_row);
            }
            Gesture::HeaderRows { anchor, base } => {
                let row = self.viewport.row_at_pixel(&mut self.layout, &self.model, y);
                let last_column = self.config.last_column;
                selection::select_rows(&mut self.model, *anchor, row, *base, last_column);
            }
            Gesture::Resizing(drag) => match drag.axis {
                ResizeAxis::Column => {
                    let guide = drag.update(x);
                    fx.push(Effect::ShowColumnGuide { x: guide });
                }
                ResizeAxis::Row => {
                    let guide = drag.update(y);
                    fx.push(Effect::ShowRowGuide { y: guide });
                }
            },
            Gesture::Extending(drag) => {
                let cell = self
                    .viewport
                    .pixel_to_cell(&mut self.layout, &self.model, x, y);
                drag.update(cell);
            }
        }
        fx.request_render();
        fx.into_vec()
    }

    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Vec<Effect> {
        self.refresh_layout();
        let mut fx = Effects::new();
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => return fx.into_vec(),
            Gesture::SelectingCells => {
                let range = self.model.selected_view().range;
                debug!(range = %range, "area selected");
                self.paste_copied_styles(&mut fx);
                fx.push(Effect::AreaSelected { range });
            }
            Gesture::HeaderColumns { .. } | Gesture::HeaderRows { .. } => {}
            Gesture::Resizing(drag) => {
                let pointer = match drag.axis {
                    ResizeAxis::Column => x,
                    ResizeAxis::Row => y,
                };
                self.commit_resize(drag, pointer, &mut fx);
            }
            Gesture::Extending(drag) => drag.commit(&mut self.model, &mut fx),
        }
        fx.request_render();
        fx.into_vec()
    }

    /// Pointer capture was lost. The gesture ends without committing.
    pub fn on_pointer_cancel(&mut self) -> Vec<Effect> {
        let mut fx = Effects::new();
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Resizing(_) => {
                fx.push(Effect::HideGuides);
                fx.request_render();
            }
            gesture => {
                debug!(?gesture, "gesture cancelled");
                fx.request_render();
            }
        }
        fx.into_vec()
    }

    fn commit_resize(&mut self, drag: ResizeDrag, pointer: f64, fx: &mut Effects) {
        fx.push(Effect::HideGuides);
        let min = match drag.axis {
            ResizeAxis::Column => self.config.min_column_width,
            ResizeAxis::Row => self.config.min_row_height,
        };
        let size = match drag.new_size(pointer, min) {
            Ok(size) => size,
            Err(err) => {
                debug!(%err, index = drag.index, "resize ignored");
                return;
            }
        };
        let sheet = self.layout.sheet;
        let (start, end) = drag.span(self.model.selected_view().range);
        match drag.axis {
            ResizeAxis::Column => {
                debug!(sheet, start, end, width = size, "columns resized");
                self.model.set_columns_width(sheet, start, end, size);
                fx.push(Effect::ColumnWidthChanged {
                    sheet,
                    column_start: start,
                    column_end: end,
                    width: size,
                });
            }
            ResizeAxis::Row => {
                debug!(sheet, start, end, height = size, "rows resized");
                self.model.set_rows_height(sheet, start, end, size);
                fx.push(Effect::RowHeightChanged {
                    sheet,
                    row_start: start,
                    row_end: end,
                    height: size,
                });
            }
        }
        self.layout_dirty = true;
    }

    /// Double-click on a cell starts editing the selected cell, caret at the
    /// end of its content.
    pub fn on_double_click(&mut self, x: f64, y: f64) -> Vec<Effect> {
        self.refresh_layout();
        let view = self.model.selected_view();
        let hit = hit_test(
            &mut self.layout,
            &self.model,
            &self.viewport,
            &self.config,
            view.range,
            x,
            y,
        );
        let mut fx = Effects::new();
        if !matches!(hit, HitTarget::Cell(_)) {
            return fx.into_vec();
        }
        let SelectedView {
            sheet, row, column, ..
        } = view;
        let cell = EditingCell::at_end(
            sheet,
            row,
            column,
            self.model.cell_content(sheet, row, column),
            self.model.column_width(sheet, column),
            self.model.row_height(sheet, row),
        );
        debug!(sheet, row, column, "begin edit");
        self.editing = Some(cell.clone());
        fx.push(Effect::BeginEdit { cell });
        fx.request_render();
        fx.into_vec()
    }

    /// The host closed the editor.
    pub fn finish_editing(&mut self) -> Vec<Effect> {
        let mut fx = Effects::new();
        if self.editing.take().is_some() {
            fx.push(Effect::EndEdit);
            fx.request_render();
        }
        fx.into_vec()
    }

    /// Forward a context-menu request for the selected cell. The selection
    /// is left alone.
    pub fn on_context_menu(&mut self, x: f64, y: f64) -> Vec<Effect> {
        let view = self.model.selected_view();
        vec![Effect::OpenContextMenu {
            row: view.row,
            column: view.column,
            column_label: column_name(view.column),
            x,
            y,
        }]
    }

    pub fn apply_context_action(&mut self, action: ContextMenuAction) -> Vec<Effect> {
        let view = self.model.selected_view();
        action.apply(&mut self.model, &view);
        self.layout_dirty = true;
        let mut fx = Effects::new();
        fx.request_render();
        fx.into_vec()
    }

    /// Scroll event from the container.
    pub fn on_scroll(&mut self, left: f64, top: f64) -> Vec<Effect> {
        let mut fx = Effects::new();
        match self.scroll.on_dom_scroll(left, top) {
            ScrollSource::Programmatic => {
                trace!(left, top, "ignoring programmatic scroll");
            }
            ScrollSource::User => {
                self.viewport.set_scroll(left, top);
                let (left, top) = (self.viewport.scroll_left, self.viewport.scroll_top);
                trace!(left, top, "user scroll");
                self.model.set_scroll_position(left, top);
                if let Some((width, height)) = self.scroll.ensure_spacer(left, top) {
                    fx.push(Effect::ResizeSpacer { width, height });
                }
                fx.request_render();
            }
        }
        fx.into_vec()
    }

    /// Bring the viewport and the container in line with the model's scroll
    /// offsets. Returns the container writes needed.
    pub fn sync_viewport(&mut self) -> Vec<Effect> {
        self.refresh_layout();
        self.viewport
            .set_scroll(self.model.scroll_x(), self.model.scroll_y());
        let (left, top) = (self.viewport.scroll_left, self.viewport.scroll_top);
        let mut fx = Effects::new();
        if let Some((width, height)) = self.scroll.ensure_spacer(left, top) {
            fx.push(Effect::ResizeSpacer { width, height });
        }
        if let Some((left, top)) = self.scroll.write_to_dom(left, top) {
            fx.push(Effect::ScrollContainer { left, top });
        }
        fx.into_vec()
    }

    /// One render pass: sync scroll, then hand the frame to `renderer`.
    pub fn render_sheet(&mut self, renderer: &mut dyn SheetRenderer) -> Vec<Effect> {
        let effects = self.sync_viewport();
        let frame = self.frame();
        renderer.render_sheet(&frame);
        effects
    }

    /// Snapshot of everything the renderer needs.
    pub fn frame(&mut self) -> RenderFrame {
        self.refresh_layout();
        let selection = self.model.selected_view();
        let rows = self.viewport.visible_rows(&mut self.layout, &self.model);
        let columns = self.viewport.visible_columns(&mut self.layout, &self.model);
        let extend_to = self.extend_area();
        let overlay = self.overlay(&selection, extend_to, &rows, &columns);
        let (column_guide, row_guide) = match &self.gesture {
            Gesture::Resizing(drag) if drag.axis == ResizeAxis::Column => {
                (Some(drag.guide()), None)
            }
            Gesture::Resizing(drag) => (None, Some(drag.guide())),
            _ => (None, None),
        };
        RenderFrame {
            selection,
            selection_type: selection
                .range
                .selection_type(self.config.last_row, self.config.last_column),
            extend_to,
            scroll_left: self.viewport.scroll_left,
            scroll_top: self.viewport.scroll_top,
            width: self.viewport.width,
            height: self.viewport.height,
            rows,
            columns,
            overlay,
            column_guide,
            row_guide,
        }
    }

    fn overlay(
        &mut self,
        view: &SelectedView,
        extend_to: Option<ExtendToArea>,
        rows: &VisibleSpan,
        columns: &VisibleSpan,
    ) -> Overlay {
        let cell_outline = (rows.contains(view.row) && columns.contains(view.column)).then(|| {
            self.viewport
                .cell_to_pixel(&mut self.layout, &self.model, view.row, view.column)
        });
        let (layout, model, viewport) = (&mut self.layout, &self.model, &self.viewport);
        let area_outline = if view.range.width() > 1 || view.range.height() > 1 {
            selection_rects(view.range, layout, model, viewport, rows, columns)
        } else {
            Vec::new()
        };
        let handle = range_corner(view.range, layout, model, viewport, rows, columns)
            .map(|corner| handle_rect(corner, self.config.selection_handle_size));
        let extend_outline = extend_to
            .map(|area| selection_rects(area.range(), layout, model, viewport, rows, columns))
            .unwrap_or_default();
        Overlay {
            cell_outline,
            area_outline,
            handle,
            extend_outline,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::model::MemoryModel;
    use crate::render::RecordingRenderer;
    use crate::types::CellRange;
    use tracing_test::traced_test;

    fn view() -> GridView<MemoryModel> {
        let config = GridConfig {
            row_header_width: 30.0,
            column_header_height: 20.0,
            ..GridConfig::default()
        };
        GridView::new(MemoryModel::with_default_sizes(100.0, 20.0), config).unwrap()
    }

    #[test]
    fn every_step_renders_once() {
        let mut grid = view();
        let down = grid.on_pointer_down(180.0, 50.0, false);
        assert_eq!(down.iter().filter(|e| **e == Effect::Render).count(), 1);
        for x in [250.0, 350.0, 450.0] {
            let moved = grid.on_pointer_move(x, 90.0);
            assert_eq!(moved, vec![Effect::Render]);
        }
        let up = grid.on_pointer_up(450.0, 90.0);
        assert_eq!(
            up,
            vec![
                Effect::AreaSelected {
                    range: CellRange::new(2, 2, 4, 5)
                },
                Effect::Render
            ]
        );
        assert!(!grid.is_dragging());
    }

    #[test]
    fn render_pass_writes_model_scroll_once() {
        let mut model = MemoryModel::with_default_sizes(100.0, 20.0);
        model.set_scroll_position(0.0, 400.0);
        let mut grid = GridView::new(model, GridConfig::default()).unwrap();
        let mut renderer = RecordingRenderer::default();
        let fx = grid.render_sheet(&mut renderer);
        assert!(fx.contains(&Effect::ScrollContainer {
            left: 0.0,
            top: 400.0
        }));
        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(renderer.frames[0].scroll_top, 400.0);
        assert!(grid.on_scroll(0.0, 400.0).is_empty());
        assert!(grid.render_sheet(&mut renderer).is_empty());
    }

    #[test]
    fn double_click_seeds_editor() {
        let mut grid = view();
        grid.model_mut().set_cell(0, 2, 2, "=SUM(A1:A3)");
        grid.on_pointer_down(180.0, 50.0, false);
        grid.on_pointer_up(180.0, 50.0);
        let fx = grid.on_double_click(180.0, 50.0);
        let Some(Effect::BeginEdit { cell }) = fx.first() else {
            panic!("expected BeginEdit, got {fx:?}");
        };
        assert_eq!((cell.row, cell.column), (2, 2));
        assert_eq!(cell.text, "=SUM(A1:A3)");
        assert_eq!(cell.cursor_start, 11);
        assert_eq!(cell.editor_width, 100.0);
        assert_eq!(cell.editor_height, 20.0);
        assert_eq!(grid.finish_editing(), vec![Effect::EndEdit, Effect::Render]);
    }

    #[test]
    fn hover_reports_resize_cursor_once() {
        let mut grid = view();
        assert_eq!(
            grid.on_pointer_move(229.0, 10.0),
            vec![Effect::SetCursor {
                cursor: Cursor::ColResize
            }]
        );
        assert!(grid.on_pointer_move(230.0, 10.0).is_empty());
        assert_eq!(
            grid.on_pointer_move(180.0, 60.0),
            vec![Effect::SetCursor {
                cursor: Cursor::Default
            }]
        );
    }

    #[test]
    #[traced_test]
    fn collapsed_resize_is_logged_and_dropped() {
        let mut grid = view();
        grid.on_pointer_down(230.0, 10.0, false);
        grid.model_mut().clear_calls();
        let fx = grid.on_pointer_up(20.0, 10.0);
        assert_eq!(fx, vec![Effect::HideGuides, Effect::Render]);
        assert!(grid.model().calls().is_empty());
        assert!(logs_contain("resize ignored"));
    }
}
