use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell_ref::column_name;

/// Largest addressable row (Excel's 1,048,576).
pub const LAST_ROW: u32 = 1_048_576;

/// Largest addressable column (Excel's XFD).
pub const LAST_COLUMN: u32 = 16_384;

/// Identifier of a sheet inside the workbook held by the external model.
pub type SheetId = u32;

/// A 1-based (row, column) cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub column: u32,
}

impl CellCoord {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Clamp both components into `[1, last_row] x [1, last_column]`.
    #[must_use]
    pub fn clamped(self, last_row: u32, last_column: u32) -> Self {
        Self {
            row: self.row.clamp(1, last_row.max(1)),
            column: self.column.clamp(1, last_column.max(1)),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name(self.column), self.row)
    }
}

/// A rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Center point, used when round-tripping a rect back into a cell.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_zero_and_overflow() {
        let c = CellCoord::new(0, LAST_COLUMN + 10).clamped(LAST_ROW, LAST_COLUMN);
        assert_eq!(c, CellCoord::new(1, LAST_COLUMN));
    }

    #[test]
    fn display_uses_a1_notation() {
        assert_eq!(CellCoord::new(3, 2).to_string(), "B3");
        assert_eq!(CellCoord::new(1, 28).to_string(), "AB1");
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(15.0, 12.0));
        assert_eq!(r.center(), (12.5, 12.5));
    }
}
