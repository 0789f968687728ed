use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CellCoord, SheetId};

/// Type of selection, derived from how far the range reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SelectionType {
    /// Standard cell selection (default)
    #[default]
    CellRange,
    /// Entire row(s) selected
    RowRange,
    /// Entire column(s) selected
    ColumnRange,
    /// All cells selected (corner click)
    All,
}

/// A selected rectangle as the model stores it.
///
/// Corners are kept in the order the user dragged them, so `row_start` may be
/// greater than `row_end`. Use [`CellRange::normalized`] before drawing or
/// committing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub row_start: u32,
    pub column_start: u32,
    pub row_end: u32,
    pub column_end: u32,
}

impl CellRange {
    pub fn new(row_start: u32, column_start: u32, row_end: u32, column_end: u32) -> Self {
        Self {
            row_start,
            column_start,
            row_end,
            column_end,
        }
    }

    pub fn single(cell: CellCoord) -> Self {
        Self::new(cell.row, cell.column, cell.row, cell.column)
    }

    /// `[r0, c0, r1, c1]`, the layout the JS model uses.
    pub fn from_array(range: [u32; 4]) -> Self {
        let [r0, c0, r1, c1] = range;
        Self::new(r0, c0, r1, c1)
    }

    pub fn to_array(self) -> [u32; 4] {
        [self.row_start, self.column_start, self.row_end, self.column_end]
    }

    /// Get normalized bounds (min/max)
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            row_start: self.row_start.min(self.row_end),
            column_start: self.column_start.min(self.column_end),
            row_end: self.row_start.max(self.row_end),
            column_end: self.column_start.max(self.column_end),
        }
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        let n = self.normalized();
        (n.row_start..=n.row_end).contains(&cell.row)
            && (n.column_start..=n.column_end).contains(&cell.column)
    }

    pub fn contains_row(&self, row: u32) -> bool {
        let n = self.normalized();
        (n.row_start..=n.row_end).contains(&row)
    }

    pub fn contains_column(&self, column: u32) -> bool {
        let n = self.normalized();
        (n.column_start..=n.column_end).contains(&column)
    }

    pub fn width(&self) -> u32 {
        self.column_start.abs_diff(self.column_end) + 1
    }

    pub fn height(&self) -> u32 {
        self.row_start.abs_diff(self.row_end) + 1
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let a = self.normalized();
        let b = other.normalized();
        Self {
            row_start: a.row_start.min(b.row_start),
            column_start: a.column_start.min(b.column_start),
            row_end: a.row_end.max(b.row_end),
            column_end: a.column_end.max(b.column_end),
        }
    }

    pub fn selection_type(&self, last_row: u32, last_column: u32) -> SelectionType {
        let n = self.normalized();
        let full_rows = n.column_start == 1 && n.column_end >= last_column;
        let full_columns = n.row_start == 1 && n.row_end >= last_row;
        match (full_rows, full_columns) {
            (true, true) => SelectionType::All,
            (true, false) => SelectionType::RowRange,
            (false, true) => SelectionType::ColumnRange,
            (false, false) => SelectionType::CellRange,
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.normalized();
        let start = CellCoord::new(n.row_start, n.column_start);
        let end = CellCoord::new(n.row_end, n.column_end);
        if start == end {
            write!(f, "{start}")
        } else {
            write!(f, "{start}:{end}")
        }
    }
}

/// Snapshot of what the model currently has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedView {
    pub sheet: SheetId,
    pub row: u32,
    pub column: u32,
    pub range: CellRange,
}

impl SelectedView {
    pub fn anchor(&self) -> CellCoord {
        CellCoord::new(self.row, self.column)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{LAST_COLUMN, LAST_ROW};

    #[test]
    fn normalized_orders_corners() {
        let r = CellRange::new(5, 4, 3, 2).normalized();
        assert_eq!(r, CellRange::new(3, 2, 5, 4));
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 3);
    }

    #[test]
    fn contains_ignores_drag_order() {
        let r = CellRange::new(5, 4, 3, 2);
        assert!(r.contains(CellCoord::new(4, 3)));
        assert!(!r.contains(CellCoord::new(6, 3)));
        assert!(r.contains_column(2));
        assert!(!r.contains_row(2));
    }

    #[test]
    fn union_covers_both() {
        let r = CellRange::new(3, 2, 5, 4).union(CellRange::new(6, 2, 7, 4));
        assert_eq!(r, CellRange::new(3, 2, 7, 4));
    }

    #[test]
    fn selection_type_from_extent() {
        assert_eq!(
            CellRange::new(1, 3, LAST_ROW, 3).selection_type(LAST_ROW, LAST_COLUMN),
            SelectionType::ColumnRange
        );
        assert_eq!(
            CellRange::new(2, 1, 4, LAST_COLUMN).selection_type(LAST_ROW, LAST_COLUMN),
            SelectionType::RowRange
        );
        assert_eq!(
            CellRange::new(1, 1, LAST_ROW, LAST_COLUMN).selection_type(LAST_ROW, LAST_COLUMN),
            SelectionType::All
        );
        assert_eq!(
            CellRange::new(2, 2, 3, 3).selection_type(LAST_ROW, LAST_COLUMN),
            SelectionType::CellRange
        );
    }

    #[test]
    fn display_as_a1_range() {
        assert_eq!(CellRange::new(5, 4, 3, 2).to_string(), "B3:D5");
        assert_eq!(CellRange::new(1, 1, 1, 1).to_string(), "A1");
    }
}
