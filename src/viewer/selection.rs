//! Selection mutations driven by pointer gestures.
//!
//! Whole-row/column selections span the configured last row/column on the
//! orthogonal axis. Every function here only talks to the model; the caller
//! requests the render.

use tracing::debug;

use crate::model::SheetModel;
use crate::types::CellRange;

pub fn select_cell<M: SheetModel + ?Sized>(model: &mut M, row: u32, column: u32) {
    debug!(row, column, "select cell");
    model.set_selected_cell(row, column);
}

/// Extend the range from the anchor to `(row, column)`.
pub fn extend_to_cell<M: SheetModel + ?Sized>(model: &mut M, row: u32, column: u32) {
    model.on_area_selecting(row, column);
}

/// Inclusive column span of the current range.
pub fn column_span<M: SheetModel + ?Sized>(model: &M) -> (u32, u32) {
    let range = model.selected_view().range.normalized();
    (range.column_start, range.column_end)
}

/// Inclusive row span of the current range.
pub fn row_span<M: SheetModel + ?Sized>(model: &M) -> (u32, u32) {
    let range = model.selected_view().range.normalized();
    (range.row_start, range.row_end)
}

fn union_span(first: u32, last: u32, base: Option<(u32, u32)>) -> (u32, u32) {
    let (lo, hi) = (first.min(last), first.max(last));
    match base {
        Some((start, end)) => (lo.min(start), hi.max(end)),
        None => (lo, hi),
    }
}

/// Select columns `first..=last` (either order), widened to cover `base`
/// when a shift-click captured one.
pub fn select_columns<M: SheetModel + ?Sized>(
    model: &mut M,
    first: u32,
    last: u32,
    base: Option<(u32, u32)>,
    last_row: u32,
) {
    let (lo, hi) = union_span(first, last, base);
    debug!(first = lo, last = hi, "select columns");
    model.set_selected_cell(1, lo);
    model.set_selected_range(CellRange::new(1, lo, last_row, hi));
}

/// Select rows `first..=last` (either order), widened to cover `base`.
pub fn select_rows<M: SheetModel + ?Sized>(
    model: &mut M,
    first: u32,
    last: u32,
    base: Option<(u32, u32)>,
    last_column: u32,
) {
    let (lo, hi) = union_span(first, last, base);
    debug!(first = lo, last = hi, "select rows");
    model.set_selected_cell(lo, 1);
    model.set_selected_range(CellRange::new(lo, 1, hi, last_column));
}

pub fn select_all<M: SheetModel + ?Sized>(model: &mut M, last_row: u32, last_column: u32) {
    debug!("select all");
    model.set_selected_cell(1, 1);
    model.set_selected_range(CellRange::new(1, 1, last_row, last_column));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::MemoryModel;
    use crate::types::{CellCoord, SelectionType, LAST_COLUMN, LAST_ROW};

    #[test]
    fn column_selection_spans_all_rows() {
        let mut model = MemoryModel::new();
        select_columns(&mut model, 3, 3, None, LAST_ROW);
        let view = model.selected_view();
        assert_eq!(view.anchor(), CellCoord::new(1, 3));
        assert_eq!(view.range, CellRange::new(1, 3, LAST_ROW, 3));
        assert_eq!(
            view.range.selection_type(LAST_ROW, LAST_COLUMN),
            SelectionType::ColumnRange
        );
    }

    #[test]
    fn shift_column_selection_keeps_existing_span() {
        let mut model = MemoryModel::new();
        model.set_selected_range(CellRange::new(2, 4, 6, 6));
        let base = column_span(&model);
        select_columns(&mut model, 2, 2, Some(base), LAST_ROW);
        assert_eq!(model.selected_view().range, CellRange::new(1, 2, LAST_ROW, 6));
    }

    #[test]
    fn row_selection_handles_reversed_drag() {
        let mut model = MemoryModel::new();
        select_rows(&mut model, 9, 4, None, LAST_COLUMN);
        let view = model.selected_view();
        assert_eq!(view.anchor(), CellCoord::new(4, 1));
        assert_eq!(view.range, CellRange::new(4, 1, 9, LAST_COLUMN));
    }

    #[test]
    fn shift_row_base_survives_later_drag() {
        let mut model = MemoryModel::new();
        model.set_selected_range(CellRange::new(3, 2, 5, 2));
        let base = row_span(&model);
        select_rows(&mut model, 8, 8, Some(base), LAST_COLUMN);
        select_rows(&mut model, 8, 9, Some(base), LAST_COLUMN);
        assert_eq!(model.selected_view().range, CellRange::new(3, 1, 9, LAST_COLUMN));
    }

    #[test]
    fn select_all_covers_sheet() {
        let mut model = MemoryModel::new();
        select_all(&mut model, LAST_ROW, LAST_COLUMN);
        assert_eq!(
            model
                .selected_view()
                .range
                .selection_type(LAST_ROW, LAST_COLUMN),
            SelectionType::All
        );
    }
}
