//! Pointer hit testing.
//!
//! Classifies a canvas point by what it lands on. Priority: the autofill
//! handle, then header resize edges, then the header bands, then cells.

use crate::config::GridConfig;
use crate::layout::{SheetLayout, Viewport, VisibleSpan};
use crate::model::SheetModel;
use crate::render::{handle_rect, range_corner};
use crate::types::{CellCoord, CellRange};

/// Target of a hit test (what was clicked)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The autofill handle at the selection's bottom-right corner
    SelectionHandle,
    /// Trailing edge of a column header
    ColumnResize(u32),
    /// Trailing edge of a row header
    RowResize(u32),
    /// The corner header (select all)
    CornerHeader,
    /// A column header at the given column index
    ColumnHeader(u32),
    /// A row header at the given row index
    RowHeader(u32),
    /// A regular cell
    Cell(CellCoord),
}

/// Index drawn immediately before `index` on screen, if any.
fn previous_on_screen(index: u32, span: &VisibleSpan) -> Option<u32> {
    if index > span.frozen && index == span.first {
        (span.frozen > 0).then_some(span.frozen)
    } else {
        index.checked_sub(1).filter(|i| *i > 0)
    }
}

fn column_edge_at<M: SheetModel + ?Sized>(
    layout: &mut SheetLayout,
    model: &M,
    viewport: &Viewport,
    columns: &VisibleSpan,
    x: f64,
    half: f64,
) -> Option<u32> {
    let column = viewport.column_at_pixel(layout, model, x);
    let (left, width) = viewport.column_span_pixels(layout, model, column);
    if (left + width - x).abs() <= half {
        return Some(column);
    }
    if (x - left).abs() <= half {
        return previous_on_screen(column, columns);
    }
    None
}

fn row_edge_at<M: SheetModel + ?Sized>(
    layout: &mut SheetLayout,
    model: &M,
    viewport: &Viewport,
    rows: &VisibleSpan,
    y: f64,
    half: f64,
) -> Option<u32> {
    let row = viewport.row_at_pixel(layout, model, y);
    let (top, height) = viewport.row_span_pixels(layout, model, row);
    if (top + height - y).abs() <= half {
        return Some(row);
    }
    if (y - top).abs() <= half {
        return previous_on_screen(row, rows);
    }
    None
}

/// Classify the canvas point `(x, y)`.
pub fn hit_test<M: SheetModel + ?Sized>(
    layout: &mut SheetLayout,
    model: &M,
    viewport: &Viewport,
    config: &GridConfig,
    selection: CellRange,
    x: f64,
    y: f64,
) -> HitTarget {
    let rows = viewport.visible_rows(layout, model);
    let columns = viewport.visible_columns(layout, model);

    if let Some(corner) = range_corner(selection, layout, model, viewport, &rows, &columns) {
        let handle = handle_rect(
            corner,
            config.selection_handle_size + 2.0 * config.handle_hit_slop,
        );
        if handle.contains(x, y) {
            return HitTarget::SelectionHandle;
        }
    }

    let in_column_header = y < layout.column_header_height;
    let in_row_header = x < layout.row_header_width;
    let half = config.resize_handle_width / 2.0;

    match (in_column_header, in_row_header) {
        (true, true) => HitTarget::CornerHeader,
        (true, false) => {
            if let Some(column) = column_edge_at(layout, model, viewport, &columns, x, half) {
                return HitTarget::ColumnResize(column);
            }
            HitTarget::ColumnHeader(viewport.column_at_pixel(layout, model, x))
        }
        (false, true) => {
            if let Some(row) = row_edge_at(layout, model, viewport, &rows, y, half) {
                return HitTarget::RowResize(row);
            }
            HitTarget::RowHeader(viewport.row_at_pixel(layout, model, y))
        }
        (false, false) => HitTarget::Cell(viewport.pixel_to_cell(layout, model, x, y)),
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

    fn setup() -> (MemoryModel, SheetLayout, Viewport, GridConfig) {
        let model = MemoryModel::with_default_sizes(100.0, 20.0);
        let config = GridConfig {
            row_header_width: 30.0,
            column_header_height: 20.0,
            ..GridConfig::default()
        };
        let layout = SheetLayout::from_model(&model, &config);
        (model, layout, Viewport::new(), config)
    }

    fn hit(x: f64, y: f64) -> HitTarget {
        let (model, mut layout, viewport, config) = setup();
        let selection = CellRange::new(1, 1, 1, 1);
        hit_test(&mut layout, &model, &viewport, &config, selection, x, y)
    }

    #[test]
    fn header_regions() {
        assert_eq!(hit(10.0, 10.0), HitTarget::CornerHeader);
        assert_eq!(hit(180.0, 10.0), HitTarget::ColumnHeader(2));
        assert_eq!(hit(10.0, 50.0), HitTarget::RowHeader(2));
        assert_eq!(hit(180.0, 50.0), HitTarget::Cell(CellCoord::new(2, 2)));
    }

    #[test]
    fn resize_edges_in_headers() {
        // Column 2 spans canvas x 130..230
        assert_eq!(hit(229.0, 10.0), HitTarget::ColumnResize(2));
        assert_eq!(hit(232.0, 10.0), HitTarget::ColumnResize(2));
        // Row 2 spans canvas y 40..60
        assert_eq!(hit(10.0, 59.0), HitTarget::RowResize(2));
        // Leading edge of the first column is not a resize handle
        assert_eq!(hit(31.0, 10.0), HitTarget::ColumnHeader(1));
    }

    #[test]
    fn selection_handle_wins_over_cells() {
        // A1 bottom-right corner is at (130, 40)
        assert_eq!(hit(131.0, 41.0), HitTarget::SelectionHandle);
        assert_eq!(hit(140.0, 50.0), HitTarget::Cell(CellCoord::new(2, 2)));
    }
}
