//! Viewport state and pointer <-> cell coordinate mapping.
//!
//! Canvas coordinates put the origin at the top-left corner of the header
//! bands. The scroll offset is measured from the frozen boundary, so the
//! scrollable pane shows sheet offset `content + scroll` at content position
//! `content` (content = canvas position minus the header band).

use serde::Serialize;

use super::SheetLayout;
use crate::model::SheetModel;
use crate::types::{CellCoord, Rect};

/// Viewport state - represents the visible area of the spreadsheet
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll offset of the scrollable pane
    pub scroll_left: f64,
    /// Vertical scroll offset of the scrollable pane
    pub scroll_top: f64,
    /// Canvas width in pixels (headers included)
    pub width: f64,
    /// Canvas height in pixels (headers included)
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible rows or columns along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleSpan {
    /// Frozen indices drawn at fixed position (`1..=frozen`).
    pub frozen: u32,
    /// First scrolled index in view.
    pub first: u32,
    /// Last scrolled index in view (inclusive).
    pub last: u32,
}

impl VisibleSpan {
    pub fn contains(&self, index: u32) -> bool {
        index <= self.frozen || (self.first..=self.last).contains(&index)
    }
}

impl Viewport {
    /// Create a new viewport with default values
    pub fn new() -> Self {
        Self {
            scroll_left: 0.0,
            scroll_top: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    /// Set absolute scroll position. Offsets below zero are pinned to zero.
    pub fn set_scroll(&mut self, left: f64, top: f64) {
        self.scroll_left = if left.is_finite() { left.max(0.0) } else { 0.0 };
        self.scroll_top = if top.is_finite() { top.max(0.0) } else { 0.0 };
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Cell under canvas point `(x, y)`.
    ///
    /// Points over the header bands resolve to the first row/column in view
    /// on that axis, points past the last rendered cell to the boundary cell.
    pub fn pixel_to_cell<M: SheetModel + ?Sized>(
        &self,
        layout: &mut SheetLayout,
        model: &M,
        x: f64,
        y: f64,
    ) -> CellCoord {
        CellCoord::new(
            self.row_at_pixel(layout, model, y),
            self.column_at_pixel(layout, model, x),
        )
    }

    pub fn column_at_pixel<M: SheetModel + ?Sized>(
        &self,
        layout: &mut SheetLayout,
        model: &M,
        x: f64,
    ) -> u32 {
        let content_x = (x - layout.row_header_width).max(0.0);
        let frozen_width = layout.frozen_columns_width(model);
        if content_x < frozen_width {
            layout.column_at_x(model, content_x)
        } else {
            let column = layout.column_at_x(model, content_x + self.scroll_left);
            column.max(layout.frozen_columns + 1).min(layout.columns.last())
        }
    }

    pub fn row_at_pixel<M: SheetModel + ?Sized>(
        &self,
        layout: &mut SheetLayout,
        model: &M,
        y: f64,
    ) -> u32 {
        let content_y = (y - layout.column_header_height).max(0.0);
        let frozen_height = layout.frozen_rows_height(model);
        if content_y < frozen_height {
            layout.row_at_y(model, content_y)
        } else {
            let row = layout.row_at_y(model, content_y + self.scroll_top);
            row.max(layout.frozen_rows + 1).min(layout.rows.last())
        }
    }

    /// Canvas rectangle of cell `(row, column)`.
    ///
    /// Frozen cells sit at a fixed position; scrolled cells move with the
    /// scroll offset and may land under the frozen pane or off-canvas.
    pub fn cell_to_pixel<M: SheetModel + ?Sized>(
        &self,
        layout: &mut SheetLayout,
        model: &M,
        row: u32,
        column: u32,
    ) -> Rect {
        let (x, width) = self.column_span_pixels(layout, model, column);
        let (y, height) = self.row_span_pixels(layout, model, row);
        Rect::new(x, y, width, height)
    }

    /// Canvas x and width of a column.
    pub fn column_span_pixels<M: SheetModel + ?Sized>(
        &self,
        layout: &mut SheetLayout,
        model: &M,
        column: u32,
    ) -> (f64, f64) {
        let start = layout.column_start(model, column);
        let end = layout.column_end(model, column);
        let x = if column <= layout.frozen_columns {
            layout.row_header_width + start
        } else {
            layout.row_header_width + start - self.scroll_left
        };
        (x, end - start)
    }

    /// Canvas y and height of a row.
    pub fn row_span_pixels<M: SheetModel + ?Sized>(
        &self,
        layout: &mut SheetLayout,
        model: &M,
        row: u32,
    ) -> (f64, f64) {
        let start = layout.row_start(model, row);
        let end = layout.row_end(model, row);
        let y = if row <= layout.frozen_rows {
            layout.column_header_height + start
        } else {
            layout.column_header_height + start - self.scroll_top
        };
        (y, end - start)
    }

    /// Get visible row span based on current scroll position.
    pub fn visible_rows<M: SheetModel + ?Sized>(
        &self,
        layout: &mut SheetLayout,
        model: &M,
    ) -> VisibleSpan {
        let frozen_height = layout.frozen_rows_height(model);
        let first = layout
            .row_at_y(model, frozen_height + self.scroll_top)
            .max(layout.frozen_rows + 1);
        let last = self.row_at_pixel(layout, model, self.height);
        VisibleSpan {
            frozen: layout.frozen_rows,
            first: first.min(layout.rows.last()),
            last: last.max(first).min(layout.rows.last()),
        }
    }

    /// Get visible column span based on current scroll position.
    pub fn visible_columns<M: SheetModel + ?Sized>(
        &self,
        layout: &mut SheetLayout,
        model: &M,
    ) -> VisibleSpan {
        let frozen_width = layout.frozen_columns_width(model);
        let first = layout
            .column_at_x(model, frozen_width + self.scroll_left)
            .max(layout.frozen_columns + 1);
        let last = self.column_at_pixel(layout, model, self.width);
        VisibleSpan {
            frozen: layout.frozen_columns,
            first: first.min(layout.columns.last()),
            last: last.max(first).min(layout.columns.last()),
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
    use crate::config::GridConfig;
    use crate::model::MemoryModel;

    fn setup(frozen_rows: u32, frozen_cols: u32) -> (MemoryModel, SheetLayout, Viewport) {
        let mut model = MemoryModel::with_default_sizes(100.0, 20.0);
        model.set_frozen_rows_count(0, frozen_rows);
        model.set_frozen_columns_count(0, frozen_cols);
        let config = GridConfig {
            row_header_width: 30.0,
            column_header_height: 20.0,
            ..GridConfig::default()
        };
        let layout = SheetLayout::from_model(&model, &config);
        (model, layout, Viewport::new())
    }

    #[test]
    fn test_pixel_to_cell_origin() {
        let (model, mut layout, vp) = setup(0, 0);
        assert_eq!(vp.pixel_to_cell(&mut layout, &model, 30.0, 20.0), CellCoord::new(1, 1));
        assert_eq!(vp.pixel_to_cell(&mut layout, &model, 131.0, 41.0), CellCoord::new(2, 2));
    }

    #[test]
    fn test_header_band_clamps_to_first_cell() {
        let (model, mut layout, vp) = setup(0, 0);
        assert_eq!(vp.pixel_to_cell(&mut layout, &model, 5.0, 5.0), CellCoord::new(1, 1));
        assert_eq!(vp.pixel_to_cell(&mut layout, &model, -500.0, -500.0), CellCoord::new(1, 1));
    }

    #[test]
    fn test_scroll_offsets_mapping() {
        let (model, mut layout, mut vp) = setup(0, 0);
        vp.set_scroll(1000.0, 400.0);
        // content (0,0) shows sheet offset (1000, 400) => column 11, row 21
        assert_eq!(vp.pixel_to_cell(&mut layout, &model, 30.0, 20.0), CellCoord::new(21, 11));
        let rect = vp.cell_to_pixel(&mut layout, &model, 21, 11);
        assert_eq!(rect, Rect::new(30.0, 20.0, 100.0, 20.0));
    }

    #[test]
    fn test_frozen_cells_ignore_scroll() {
        let (model, mut layout, mut vp) = setup(2, 1);
        vp.set_scroll(5000.0, 5000.0);
        // Inside the frozen corner
        assert_eq!(vp.pixel_to_cell(&mut layout, &model, 40.0, 25.0), CellCoord::new(1, 1));
        let rect = vp.cell_to_pixel(&mut layout, &model, 2, 1);
        assert_eq!(rect, Rect::new(30.0, 40.0, 100.0, 20.0));
        // First scrollable pixel after the frozen pane: sheet x = 100 + 5000
        assert_eq!(vp.column_at_pixel(&mut layout, &model, 130.0), 52);
        assert_eq!(vp.row_at_pixel(&mut layout, &model, 60.0), 253);
    }

    #[test]
    fn test_frozen_boundary_without_scroll() {
        let (model, mut layout, vp) = setup(2, 1);
        assert_eq!(vp.column_at_pixel(&mut layout, &model, 130.0), 2);
        assert_eq!(vp.row_at_pixel(&mut layout, &model, 60.0), 3);
        let rect = vp.cell_to_pixel(&mut layout, &model, 3, 2);
        assert_eq!(rect.x, 130.0);
        assert_eq!(rect.y, 60.0);
    }

    #[test]
    fn test_past_last_cell_clamps() {
        let mut model = MemoryModel::with_default_sizes(100.0, 20.0);
        model.set_frozen_rows_count(0, 0);
        let config = GridConfig {
            last_row: 50,
            last_column: 10,
            ..GridConfig::default()
        };
        let mut layout = SheetLayout::from_model(&model, &config);
        let vp = Viewport::new();
        assert_eq!(
            vp.pixel_to_cell(&mut layout, &model, 1e7, 1e7),
            CellCoord::new(50, 10)
        );
    }

    #[test]
    fn test_visible_spans() {
        let (model, mut layout, mut vp) = setup(1, 0);
        vp.resize(830.0, 620.0);
        vp.set_scroll(0.0, 200.0);
        let rows = vp.visible_rows(&mut layout, &model);
        // frozen row 1 is 20px; scrolled pane starts at sheet y 220 => row 12
        assert_eq!(rows.frozen, 1);
        assert_eq!(rows.first, 12);
        // bottom edge: content 600 + 200 => row 41
        assert_eq!(rows.last, 41);
        assert!(rows.contains(1));
        assert!(!rows.contains(5));
        let cols = vp.visible_columns(&mut layout, &model);
        assert_eq!((cols.first, cols.last), (1, 9));
    }
}
