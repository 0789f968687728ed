//! Column/row resize drags.

use crate::error::{GridError, Result};
use crate::types::CellRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAxis {
    Column,
    Row,
}

/// A header-edge drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    pub axis: ResizeAxis,
    /// Column or row being resized.
    pub index: u32,
    /// Pointer position (x for columns, y for rows) at drag start.
    start: f64,
    /// Size of `index` at drag start.
    original: f64,
    /// Canvas position of the trailing edge at drag start.
    edge: f64,
    /// Current guide position.
    guide: f64,
}

impl ResizeDrag {
    pub fn begin(axis: ResizeAxis, index: u32, pointer: f64, original: f64, edge: f64) -> Self {
        Self {
            axis,
            index,
            start: pointer,
            original,
            edge,
            guide: edge,
        }
    }

    /// Move the guide with the pointer. The guide never passes the leading
    /// edge of the column/row.
    pub fn update(&mut self, pointer: f64) -> f64 {
        let leading = self.edge - self.original;
        self.guide = (self.edge + pointer - self.start).max(leading);
        self.guide
    }

    pub fn guide(&self) -> f64 {
        self.guide
    }

    /// Size to commit for a release at `pointer`, clamped up to `min`.
    ///
    /// # Errors
    /// [`GridError::InvalidSize`] if the drag would make the size negative
    /// or non-finite.
    pub fn new_size(&self, pointer: f64, min: f64) -> Result<f64> {
        let size = self.original + (pointer - self.start);
        if !size.is_finite() || size < 0.0 {
            return Err(GridError::InvalidSize(size));
        }
        Ok(size.max(min))
    }

    /// Inclusive span the new size applies to: the whole selected span when
    /// `index` lies inside it, otherwise just `index`.
    pub fn span(&self, selection: CellRange) -> (u32, u32) {
        let sel = selection.normalized();
        match self.axis {
            ResizeAxis::Column if sel.contains_column(self.index) => {
                (sel.column_start, sel.column_end)
            }
            ResizeAxis::Row if sel.contains_row(self.index) => (sel.row_start, sel.row_end),
            _ => (self.index, self.index),
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

    #[test]
    fn size_follows_pointer_delta() {
        let drag = ResizeDrag::begin(ResizeAxis::Column, 3, 330.0, 100.0, 330.0);
        assert_eq!(drag.new_size(370.0, 0.0).unwrap(), 140.0);
        assert_eq!(drag.new_size(250.0, 0.0).unwrap(), 20.0);
        assert_eq!(drag.new_size(250.0, 30.0).unwrap(), 30.0);
    }

    #[test]
    fn negative_size_is_rejected() {
        let drag = ResizeDrag::begin(ResizeAxis::Row, 2, 100.0, 20.0, 100.0);
        assert!(matches!(
            drag.new_size(50.0, 0.0),
            Err(GridError::InvalidSize(s)) if s < 0.0
        ));
        assert!(drag.new_size(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn guide_stops_at_leading_edge() {
        let mut drag = ResizeDrag::begin(ResizeAxis::Column, 3, 330.0, 100.0, 330.0);
        assert_eq!(drag.update(350.0), 350.0);
        assert_eq!(drag.update(100.0), 230.0);
        assert_eq!(drag.guide(), 230.0);
    }

    #[test]
    fn span_covers_selection_when_inside() {
        let sel = CellRange::new(5, 4, 2, 2);
        let inside = ResizeDrag::begin(ResizeAxis::Column, 3, 0.0, 100.0, 0.0);
        assert_eq!(inside.span(sel), (2, 4));
        let outside = ResizeDrag::begin(ResizeAxis::Column, 6, 0.0, 100.0, 0.0);
        assert_eq!(outside.span(sel), (6, 6));
        let row = ResizeDrag::begin(ResizeAxis::Row, 5, 0.0, 20.0, 0.0);
        assert_eq!(row.span(sel), (2, 5));
    }
}
