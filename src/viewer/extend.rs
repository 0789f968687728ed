//! Autofill ("extend to") drag.
//!
//! Dragging the selection handle proposes an area adjacent to the selection
//! along one axis. The direction is re-evaluated on every move, vertical
//! first: the pointer must be outside the selection's rows and at least as
//! close (in cells) to the top/bottom edge as to the side edges. Exact ties
//! go to rows.

use tracing::{debug, trace};

use super::effects::{Effect, Effects};
use crate::model::SheetModel;
use crate::types::{CellCoord, CellRange, ExtendDirection, ExtendToArea, FillArea, SheetId};

/// Distance in cells from `value` to the span `[start, end]`, 0 inside it.
fn distance_outside(value: u32, start: u32, end: u32) -> u32 {
    if value < start {
        start - value
    } else if value > end {
        value - end
    } else {
        0
    }
}

/// Area proposed for a drag from `selection` to `target`, or `None` while the
/// target is inside the selection.
pub fn resolve_extend_area(selection: CellRange, target: CellCoord) -> Option<ExtendToArea> {
    let sel = selection.normalized();
    let row_dist = distance_outside(target.row, sel.row_start, sel.row_end);
    let col_dist = distance_outside(target.column, sel.column_start, sel.column_end);
    let vertical = row_dist > 0 && (col_dist == 0 || row_dist <= col_dist);

    if vertical && target.row > sel.row_end {
        return Some(ExtendToArea {
            direction: ExtendDirection::RowsDown,
            row_start: sel.row_end + 1,
            row_end: target.row,
            column_start: sel.column_start,
            column_end: sel.column_end,
        });
    }
    if vertical && target.row < sel.row_start {
        return Some(ExtendToArea {
            direction: ExtendDirection::RowsUp,
            row_start: target.row,
            row_end: sel.row_start - 1,
            column_start: sel.column_start,
            column_end: sel.column_end,
        });
    }
    if col_dist == 0 {
        return None;
    }
    if target.column > sel.column_end {
        Some(ExtendToArea {
            direction: ExtendDirection::ColumnsRight,
            row_start: sel.row_start,
            row_end: sel.row_end,
            column_start: sel.column_end + 1,
            column_end: target.column,
        })
    } else {
        Some(ExtendToArea {
            direction: ExtendDirection::ColumnsLeft,
            row_start: sel.row_start,
            row_end: sel.row_end,
            column_start: target.column,
            column_end: sel.column_start - 1,
        })
    }
}

/// State of an autofill drag in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendDrag {
    sheet: SheetId,
    /// Selection at drag start, normalized.
    source: CellRange,
    area: Option<ExtendToArea>,
}

impl ExtendDrag {
    pub fn begin(sheet: SheetId, selection: CellRange) -> Self {
        let source = selection.normalized();
        debug!(sheet, source = %source, "extend-to drag started");
        Self {
            sheet,
            source,
            area: None,
        }
    }

    pub fn source(&self) -> CellRange {
        self.source
    }

    pub fn area(&self) -> Option<ExtendToArea> {
        self.area
    }

    /// Re-evaluate the proposed area for the cell under the pointer. The
    /// previous area is replaced, never merged.
    pub fn update(&mut self, target: CellCoord) {
        self.area = resolve_extend_area(self.source, target);
        trace!(
            row = target.row,
            column = target.column,
            direction = ?self.area.map(|a| a.direction),
            "extend-to target"
        );
    }

    /// Finish the drag. With an area set, fill from the source selection to
    /// the area's far edge and widen the selection to cover both.
    pub fn commit<M: SheetModel + ?Sized>(self, model: &mut M, effects: &mut Effects) {
        let Some(area) = self.area else {
            debug!(sheet = self.sheet, "extend-to drag ended without an area");
            return;
        };
        let fill = FillArea::from_range(self.sheet, self.source);
        if area.direction.is_vertical() {
            model.auto_fill_rows(fill, area.fill_target());
        } else {
            model.auto_fill_columns(fill, area.fill_target());
        }
        let target = area.range();
        model.set_selected_range(self.source.union(target));
        debug!(
            sheet = self.sheet,
            direction = ?area.direction,
            target = %target,
            "extend-to committed"
        );
        effects.push(Effect::ExtendToCompleted {
            source: self.source,
            target,
        });
        effects.request_render();
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
    use crate::model::{MemoryModel, ModelCall};
    use test_case::test_case;

    fn sel() -> CellRange {
        // rows 3-5, columns 2-4
        CellRange::new(3, 2, 5, 4)
    }

    #[test_case(7, 3, ExtendDirection::RowsDown, (6, 7, 2, 4) ; "straight down")]
    #[test_case(7, 7, ExtendDirection::RowsDown, (6, 7, 2, 4) ; "diagonal closer to bottom")]
    #[test_case(3, 7, ExtendDirection::ColumnsRight, (3, 5, 5, 7) ; "straight right")]
    #[test_case(1, 3, ExtendDirection::RowsUp, (1, 2, 2, 4) ; "straight up")]
    #[test_case(4, 1, ExtendDirection::ColumnsLeft, (3, 5, 1, 1) ; "straight left")]
    #[test_case(9, 5, ExtendDirection::ColumnsRight, (3, 5, 5, 5) ; "diagonal closer to side")]
    #[test_case(8, 7, ExtendDirection::RowsDown, (6, 8, 2, 4) ; "tie goes to rows")]
    #[test_case(2, 1, ExtendDirection::RowsUp, (2, 2, 2, 4) ; "tie up-left goes to rows")]
    fn resolves_direction(
        row: u32,
        column: u32,
        direction: ExtendDirection,
        bounds: (u32, u32, u32, u32),
    ) {
        let area = resolve_extend_area(sel(), CellCoord::new(row, column)).unwrap();
        assert_eq!(area.direction, direction);
        assert_eq!(
            (area.row_start, area.row_end, area.column_start, area.column_end),
            bounds
        );
    }

    #[test]
    fn inside_selection_has_no_area() {
        assert_eq!(resolve_extend_area(sel(), CellCoord::new(4, 3)), None);
        assert_eq!(resolve_extend_area(sel(), CellCoord::new(5, 4)), None);
    }

    #[test]
    fn reversed_selection_is_normalized() {
        let area = resolve_extend_area(CellRange::new(5, 4, 3, 2), CellCoord::new(7, 3)).unwrap();
        assert_eq!(area.direction, ExtendDirection::RowsDown);
        assert_eq!((area.row_start, area.row_end), (6, 7));
    }

    #[test]
    fn direction_switch_replaces_area() {
        let mut drag = ExtendDrag::begin(0, sel());
        drag.update(CellCoord::new(7, 3));
        assert_eq!(drag.area().unwrap().direction, ExtendDirection::RowsDown);
        drag.update(CellCoord::new(3, 7));
        let area = drag.area().unwrap();
        assert_eq!(area.direction, ExtendDirection::ColumnsRight);
        assert_eq!(area.range(), CellRange::new(3, 5, 5, 7));
        drag.update(CellCoord::new(4, 3));
        assert_eq!(drag.area(), None);
    }

    #[test]
    fn commit_rows_down_fills_and_widens_selection() {
        let mut model = MemoryModel::new();
        model.set_selected_cell(3, 2);
        model.set_selected_range(sel());
        model.clear_calls();

        let mut drag = ExtendDrag::begin(0, sel());
        drag.update(CellCoord::new(7, 3));
        let mut fx = Effects::new();
        drag.commit(&mut model, &mut fx);

        let fill = FillArea {
            sheet: 0,
            row: 3,
            column: 2,
            width: 3,
            height: 3,
        };
        assert_eq!(
            model.calls(),
            &[
                ModelCall::AutoFillRows(fill, 7),
                ModelCall::SetSelectedRange(CellRange::new(3, 2, 7, 4)),
            ]
        );
        let effects = fx.into_vec();
        assert_eq!(effects.last(), Some(&Effect::Render));
        assert!(effects.contains(&Effect::ExtendToCompleted {
            source: sel(),
            target: CellRange::new(6, 2, 7, 4),
        }));
    }

    #[test]
    fn commit_columns_left_targets_first_column() {
        let mut model = MemoryModel::new();
        let mut drag = ExtendDrag::begin(0, sel());
        drag.update(CellCoord::new(4, 1));
        drag.commit(&mut model, &mut Effects::new());
        assert!(matches!(model.calls().first(), Some(ModelCall::AutoFillColumns(_, 1))));
    }

    #[test]
    fn commit_without_area_is_noop() {
        let mut model = MemoryModel::new();
        let mut drag = ExtendDrag::begin(0, sel());
        drag.update(CellCoord::new(4, 3));
        let mut fx = Effects::new();
        drag.commit(&mut model, &mut fx);
        assert!(model.calls().is_empty());
        assert!(fx.into_vec().is_empty());
    }
}
