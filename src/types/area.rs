use serde::{Deserialize, Serialize};

use super::{CellRange, SheetId};

/// Which side of the selection an autofill drag is growing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtendDirection {
    RowsDown,
    RowsUp,
    ColumnsRight,
    ColumnsLeft,
}

impl ExtendDirection {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::RowsDown | Self::RowsUp)
    }
}

/// The region proposed for autofill while the handle is being dragged.
///
/// Always shares an edge with the selection on the side named by
/// `direction`; bounds are inclusive and already normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendToArea {
    pub direction: ExtendDirection,
    pub row_start: u32,
    pub row_end: u32,
    pub column_start: u32,
    pub column_end: u32,
}

impl ExtendToArea {
    pub fn range(&self) -> CellRange {
        CellRange::new(self.row_start, self.column_start, self.row_end, self.column_end)
    }

    /// Row or column the fill runs to, in the units `autoFillRows` /
    /// `autoFillColumns` expect.
    pub fn fill_target(&self) -> u32 {
        match self.direction {
            ExtendDirection::RowsDown => self.row_end,
            ExtendDirection::RowsUp => self.row_start,
            ExtendDirection::ColumnsRight => self.column_end,
            ExtendDirection::ColumnsLeft => self.column_start,
        }
    }
}

/// Source rectangle handed to the model's autofill calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillArea {
    pub sheet: SheetId,
    pub row: u32,
    pub column: u32,
    pub width: u32,
    pub height: u32,
}

impl FillArea {
    /// Build from a (possibly un-normalized) selection.
    pub fn from_range(sheet: SheetId, range: CellRange) -> Self {
        let n = range.normalized();
        Self {
            sheet,
            row: n.row_start,
            column: n.column_start,
            width: range.width(),
            height: range.height(),
        }
    }

    pub fn range(&self) -> CellRange {
        CellRange::new(
            self.row,
            self.column,
            self.row + self.height - 1,
            self.column + self.width - 1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_target_matches_direction() {
        let mut area = ExtendToArea {
            direction: ExtendDirection::RowsDown,
            row_start: 6,
            row_end: 7,
            column_start: 2,
            column_end: 4,
        };
        assert_eq!(area.fill_target(), 7);
        area.direction = ExtendDirection::RowsUp;
        assert_eq!(area.fill_target(), 6);
        area.direction = ExtendDirection::ColumnsLeft;
        assert_eq!(area.fill_target(), 2);
    }

    #[test]
    fn fill_area_from_reversed_range() {
        let area = FillArea::from_range(0, CellRange::new(5, 4, 3, 2));
        assert_eq!(
            area,
            FillArea {
                sheet: 0,
                row: 3,
                column: 2,
                width: 3,
                height: 3
            }
        );
        assert_eq!(area.range(), CellRange::new(3, 2, 5, 4));
    }
}
