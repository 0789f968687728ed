//! Selection overlay geometry.
//!
//! These helpers keep overlay math testable without depending on the DOM:
//! the host positions its outline/handle elements from the rects computed here.

use serde::Serialize;

use crate::layout::{SheetLayout, Viewport, VisibleSpan};
use crate::model::SheetModel;
use crate::types::{CellRange, Rect};

/// One piece of a range outline. A range crossing a frozen boundary is split
/// into up to four pieces; the `draw_*` flags say which edges belong to the
/// outer border of the whole range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub draw_top: bool,
    pub draw_bottom: bool,
    pub draw_left: bool,
    pub draw_right: bool,
}

/// Frozen and scrolled sub-ranges of `[min, max]`, each clipped to what is on
/// screen. `None` when that part is empty or out of view.
fn split_axis(min: u32, max: u32, span: &VisibleSpan) -> (Option<(u32, u32)>, Option<(u32, u32)>) {
    let frozen = if span.frozen > 0 {
        let end = max.min(span.frozen);
        (min <= end).then_some((min, end))
    } else {
        None
    };
    let scrolled = if max > span.frozen {
        let start = min.max(span.frozen + 1).max(span.first);
        let end = max.min(span.last);
        (start <= end).then_some((start, end))
    } else {
        None
    };
    (frozen, scrolled)
}

/// Outline pieces for `range`, clipped to the visible rows/columns.
pub fn selection_rects<M: SheetModel + ?Sized>(
    range: CellRange,
    layout: &mut SheetLayout,
    model: &M,
    viewport: &Viewport,
    rows: &VisibleSpan,
    columns: &VisibleSpan,
) -> Vec<SelectionRect> {
    let n = range.normalized();
    let (frozen_rows, scroll_rows) = split_axis(n.row_start, n.row_end, rows);
    let (frozen_cols, scroll_cols) = split_axis(n.column_start, n.column_end, columns);

    let mut rects = Vec::new();
    for row_range in [frozen_rows, scroll_rows].into_iter().flatten() {
        for col_range in [frozen_cols, scroll_cols].into_iter().flatten() {
            let (row_start, row_end) = row_range;
            let (col_start, col_end) = col_range;
            let (x1, _) = viewport.column_span_pixels(layout, model, col_start);
            let (x_last, w_last) = viewport.column_span_pixels(layout, model, col_end);
            let (y1, _) = viewport.row_span_pixels(layout, model, row_start);
            let (y_last, h_last) = viewport.row_span_pixels(layout, model, row_end);
            let w = (x_last + w_last - x1).max(0.0);
            let h = (y_last + h_last - y1).max(0.0);
            if w <= 0.0 || h <= 0.0 {
                continue;
            }
            rects.push(SelectionRect {
                x: x1,
                y: y1,
                w,
                h,
                draw_top: row_start == n.row_start,
                draw_bottom: row_end == n.row_end,
                draw_left: col_start == n.column_start,
                draw_right: col_end == n.column_end,
            });
        }
    }
    rects
}

/// Bottom-right corner of `range` in canvas pixels, if that corner is on screen.
pub fn range_corner<M: SheetModel + ?Sized>(
    range: CellRange,
    layout: &mut SheetLayout,
    model: &M,
    viewport: &Viewport,
    rows: &VisibleSpan,
    columns: &VisibleSpan,
) -> Option<(f64, f64)> {
    let n = range.normalized();
    if !rows.contains(n.row_end) || !columns.contains(n.column_end) {
        return None;
    }
    let rect = viewport.cell_to_pixel(layout, model, n.row_end, n.column_end);
    Some((rect.right(), rect.bottom()))
}

/// Everything the host needs to place its DOM overlays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Outline of the anchor cell (absent when scrolled out of view).
    pub cell_outline: Option<Rect>,
    /// Pieces of the selected range outline.
    pub area_outline: Vec<SelectionRect>,
    /// Autofill handle at the selection's bottom-right corner.
    pub handle: Option<Rect>,
    /// Pieces of the proposed extend-to outline.
    pub extend_outline: Vec<SelectionRect>,
}

/// Square handle of side `size` centered on the corner.
pub fn handle_rect(corner: (f64, f64), size: f64) -> Rect {
    let (x, y) = corner;
    Rect::new(x - size / 2.0, y - size / 2.0, size, size)
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

    fn setup(frozen_rows: u32, frozen_cols: u32) -> (MemoryModel, SheetLayout) {
        let mut model = MemoryModel::with_default_sizes(100.0, 20.0);
        model.set_frozen_rows_count(0, frozen_rows);
        model.set_frozen_columns_count(0, frozen_cols);
        let config = GridConfig {
            row_header_width: 0.0,
            column_header_height: 0.0,
            ..GridConfig::default()
        };
        let layout = SheetLayout::from_model(&model, &config);
        (model, layout)
    }

    #[test]
    fn selection_rects_split_frozen_rows() {
        let (model, mut layout) = setup(1, 0);
        let mut viewport = Viewport::new();
        viewport.set_scroll(0.0, 20.0);
        let rows = viewport.visible_rows(&mut layout, &model);
        let cols = viewport.visible_columns(&mut layout, &model);
        let rects = selection_rects(
            CellRange::new(1, 1, 4, 2),
            &mut layout,
            &model,
            &viewport,
            &rows,
            &cols,
        );
        assert_eq!(rects.len(), 2);

        let frozen = rects.iter().find(|r| r.draw_top).unwrap();
        let scroll = rects.iter().find(|r| r.draw_bottom).unwrap();
        assert_eq!(frozen.y, 0.0);
        assert_eq!(frozen.h, 20.0);
        // Row 2 is scrolled under the frozen row; row 3 starts right below it.
        assert_eq!(scroll.y, 20.0);
        assert_eq!(scroll.h, 40.0);
        assert_eq!(scroll.w, 200.0);
    }

    #[test]
    fn selection_rects_split_frozen_cols() {
        let (model, mut layout) = setup(0, 1);
        let mut viewport = Viewport::new();
        viewport.set_scroll(200.0, 0.0);
        let rows = viewport.visible_rows(&mut layout, &model);
        let cols = viewport.visible_columns(&mut layout, &model);
        let rects = selection_rects(
            CellRange::new(1, 1, 2, 5),
            &mut layout,
            &model,
            &viewport,
            &rows,
            &cols,
        );
        assert_eq!(rects.len(), 2);
        let frozen = rects.iter().find(|r| r.draw_left).unwrap();
        let scroll = rects.iter().find(|r| r.draw_right).unwrap();
        assert_eq!(frozen.x, 0.0);
        // Columns 2-3 scrolled away; column 4 is first visible at x = 100
        assert_eq!(scroll.x, 100.0);
        assert_eq!(scroll.w, 200.0);
    }

    #[test]
    fn full_column_selection_is_clipped_to_view() {
        let (model, mut layout) = setup(0, 0);
        let viewport = Viewport::new();
        let rows = viewport.visible_rows(&mut layout, &model);
        let cols = viewport.visible_columns(&mut layout, &model);
        let rects = selection_rects(
            CellRange::new(1, 3, crate::types::LAST_ROW, 3),
            &mut layout,
            &model,
            &viewport,
            &rows,
            &cols,
        );
        assert_eq!(rects.len(), 1);
        assert!(!rects[0].draw_bottom);
        assert!(rects[0].draw_top);
        assert_eq!(rects[0].h, f64::from(rows.last) * 20.0);
    }

    #[test]
    fn corner_only_when_visible() {
        let (model, mut layout) = setup(0, 0);
        let viewport = Viewport::new();
        let rows = viewport.visible_rows(&mut layout, &model);
        let cols = viewport.visible_columns(&mut layout, &model);
        let corner = range_corner(
            CellRange::new(3, 2, 5, 4),
            &mut layout,
            &model,
            &viewport,
            &rows,
            &cols,
        );
        assert_eq!(corner, Some((400.0, 100.0)));
        let hidden = range_corner(
            CellRange::new(1, 1, 5000, 1),
            &mut layout,
            &model,
            &viewport,
            &rows,
            &cols,
        );
        assert_eq!(hidden, None);
        assert_eq!(handle_rect((400.0, 100.0), 6.0), Rect::new(397.0, 97.0, 6.0, 6.0));
    }
}
