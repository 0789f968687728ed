//! Cumulative row/column offsets for a sheet.
//!
//! Offsets are computed on demand from the model's sizes and cached, so a
//! lookup deep into a sheet costs one pass the first time and a binary search
//! afterwards. The cache must be dropped whenever sizes, frozen counts or the
//! active sheet change.

use crate::config::GridConfig;
use crate::model::SheetModel;
use crate::types::SheetId;

/// Offsets along one axis (rows or columns), 1-based.
#[derive(Debug, Clone)]
pub struct AxisLayout {
    /// `edges[i]` is the leading edge of index `i + 1`; `edges[0] == 0`.
    edges: Vec<f64>,
    /// Largest addressable index.
    last: u32,
}

impl AxisLayout {
    pub fn new(last: u32) -> Self {
        Self {
            edges: vec![0.0],
            last: last.max(1),
        }
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of indices whose trailing edge is known.
    fn resolved(&self) -> u32 {
        u32::try_from(self.edges.len() - 1).unwrap_or(u32::MAX)
    }

    fn push_next(&mut self, size: &impl Fn(u32) -> f64) {
        let next = self.resolved() + 1;
        let start = self.edges.last().copied().unwrap_or(0.0);
        let s = size(next);
        // Negative or NaN sizes from the model collapse to hidden
        let s = if s.is_finite() && s > 0.0 { s } else { 0.0 };
        self.edges.push(start + s);
    }

    fn resolve_through(&mut self, index: u32, size: &impl Fn(u32) -> f64) {
        let target = index.min(self.last);
        while self.resolved() < target {
            self.push_next(size);
        }
    }

    /// Leading edge of `index` (clamped to `[1, last]`).
    pub fn start(&mut self, index: u32, size: &impl Fn(u32) -> f64) -> f64 {
        let index = index.clamp(1, self.last);
        self.resolve_through(index - 1, size);
        self.edges.get(index as usize - 1).copied().unwrap_or(0.0)
    }

    /// Trailing edge of `index` (clamped to `[1, last]`).
    pub fn end(&mut self, index: u32, size: &impl Fn(u32) -> f64) -> f64 {
        let index = index.clamp(1, self.last);
        self.resolve_through(index, size);
        self.edges.get(index as usize).copied().unwrap_or(0.0)
    }

    /// Index covering `offset`. Offsets before the start map to 1 and offsets
    /// past the last index map to `last`.
    pub fn index_at(&mut self, offset: f64, size: &impl Fn(u32) -> f64) -> u32 {
        if offset.is_nan() || offset <= 0.0 {
            return 1;
        }
        while self.resolved() < self.last
            && self.edges.last().copied().unwrap_or(0.0) <= offset
        {
            self.push_next(size);
        }
        // edges[0] == 0 <= offset, so the count is at least 1
        let count = self.edges.partition_point(|edge| *edge <= offset);
        u32::try_from(count).unwrap_or(u32::MAX).clamp(1, self.last)
    }
}

/// Layout of the active sheet: header bands, frozen panes and cumulative
/// offsets for both axes.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub sheet: SheetId,
    pub rows: AxisLayout,
    pub columns: AxisLayout,
    /// Number of frozen rows (0 = no frozen rows)
    pub frozen_rows: u32,
    /// Number of frozen columns (0 = no frozen columns)
    pub frozen_columns: u32,
    /// Width of row headers in pixels (0 if headers not shown)
    pub row_header_width: f64,
    /// Height of column headers in pixels (0 if headers not shown)
    pub column_header_height: f64,
}

impl SheetLayout {
    pub fn new(sheet: SheetId, frozen_rows: u32, frozen_columns: u32, config: &GridConfig) -> Self {
        Self {
            sheet,
            rows: AxisLayout::new(config.last_row),
            columns: AxisLayout::new(config.last_column),
            frozen_rows: frozen_rows.min(config.last_row),
            frozen_columns: frozen_columns.min(config.last_column),
            row_header_width: config.row_header_width,
            column_header_height: config.column_header_height,
        }
    }

    /// Fresh layout for the model's active sheet.
    pub fn from_model<M: SheetModel + ?Sized>(model: &M, config: &GridConfig) -> Self {
        let sheet = model.selected_view().sheet;
        Self::new(
            sheet,
            model.frozen_rows_count(sheet),
            model.frozen_columns_count(sheet),
            config,
        )
    }

    /// True while the cached offsets still describe the model's active sheet.
    pub fn is_current<M: SheetModel + ?Sized>(&self, model: &M) -> bool {
        let sheet = model.selected_view().sheet;
        sheet == self.sheet
            && model.frozen_rows_count(sheet) == self.frozen_rows
            && model.frozen_columns_count(sheet) == self.frozen_columns
    }

    pub fn column_start<M: SheetModel + ?Sized>(&mut self, model: &M, column: u32) -> f64 {
        let sheet = self.sheet;
        self.columns
            .start(column, &|c| model.column_width(sheet, c))
    }

    pub fn column_end<M: SheetModel + ?Sized>(&mut self, model: &M, column: u32) -> f64 {
        let sheet = self.sheet;
        self.columns.end(column, &|c| model.column_width(sheet, c))
    }

    pub fn row_start<M: SheetModel + ?Sized>(&mut self, model: &M, row: u32) -> f64 {
        let sheet = self.sheet;
        self.rows.start(row, &|r| model.row_height(sheet, r))
    }

    pub fn row_end<M: SheetModel + ?Sized>(&mut self, model: &M, row: u32) -> f64 {
        let sheet = self.sheet;
        self.rows.end(row, &|r| model.row_height(sheet, r))
    }

    /// Find column at sheet x offset.
    pub fn column_at_x<M: SheetModel + ?Sized>(&mut self, model: &M, x: f64) -> u32 {
        let sheet = self.sheet;
        self.columns
            .index_at(x, &|c| model.column_width(sheet, c))
    }

    /// Find row at sheet y offset.
    pub fn row_at_y<M: SheetModel + ?Sized>(&mut self, model: &M, y: f64) -> u32 {
        let sheet = self.sheet;
        self.rows.index_at(y, &|r| model.row_height(sheet, r))
    }

    /// Get the total width of frozen columns (returns 0 if no frozen columns)
    pub fn frozen_columns_width<M: SheetModel + ?Sized>(&mut self, model: &M) -> f64 {
        if self.frozen_columns == 0 {
            return 0.0;
        }
        let frozen = self.frozen_columns;
        self.column_end(model, frozen)
    }

    /// Get the total height of frozen rows (returns 0 if no frozen rows)
    pub fn frozen_rows_height<M: SheetModel + ?Sized>(&mut self, model: &M) -> f64 {
        if self.frozen_rows == 0 {
            return 0.0;
        }
        let frozen = self.frozen_rows;
        self.row_end(model, frozen)
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

    fn uniform(_: u32) -> f64 {
        10.0
    }

    #[test]
    fn test_axis_edges() {
        let mut axis = AxisLayout::new(100);
        assert_eq!(axis.start(1, &uniform), 0.0);
        assert_eq!(axis.end(1, &uniform), 10.0);
        assert_eq!(axis.start(5, &uniform), 40.0);
        assert_eq!(axis.end(100, &uniform), 1000.0);
    }

    #[test]
    fn test_index_at() {
        let mut axis = AxisLayout::new(100);
        assert_eq!(axis.index_at(0.0, &uniform), 1);
        assert_eq!(axis.index_at(-50.0, &uniform), 1);
        assert_eq!(axis.index_at(9.9, &uniform), 1);
        assert_eq!(axis.index_at(10.0, &uniform), 2);
        assert_eq!(axis.index_at(995.0, &uniform), 100);
        assert_eq!(axis.index_at(1e9, &uniform), 100);
    }

    #[test]
    fn test_hidden_indices_are_skipped() {
        let size = |i: u32| if i == 2 || i == 3 { 0.0 } else { 10.0 };
        let mut axis = AxisLayout::new(10);
        assert_eq!(axis.index_at(10.0, &size), 4);
        assert_eq!(axis.start(4, &size), 10.0);
    }

    #[test]
    fn test_negative_sizes_collapse() {
        let size = |i: u32| if i == 1 { -30.0 } else { 10.0 };
        let mut axis = AxisLayout::new(10);
        assert_eq!(axis.end(1, &size), 0.0);
        assert_eq!(axis.end(2, &size), 10.0);
    }

    #[test]
    fn test_variable_widths_from_model() {
        let mut model = MemoryModel::with_default_sizes(50.0, 20.0);
        model.set_columns_width(0, 2, 2, 200.0);
        let mut layout = SheetLayout::from_model(&model, &GridConfig::default());
        assert_eq!(layout.column_start(&model, 3), 250.0);
        assert_eq!(layout.column_at_x(&model, 249.0), 2);
        assert_eq!(layout.column_at_x(&model, 250.0), 3);
        assert_eq!(layout.row_start(&model, 11), 200.0);
    }

    #[test]
    fn test_frozen_extents() {
        let mut model = MemoryModel::with_default_sizes(50.0, 20.0);
        model.set_frozen_rows_count(0, 2);
        model.set_frozen_columns_count(0, 3);
        let mut layout = SheetLayout::from_model(&model, &GridConfig::default());
        assert_eq!(layout.frozen_rows_height(&model), 40.0);
        assert_eq!(layout.frozen_columns_width(&model), 150.0);
        assert!(layout.is_current(&model));
        model.set_frozen_rows_count(0, 0);
        assert!(!layout.is_current(&model));
    }

    #[test]
    fn test_deep_offset_resolves_lazily() {
        let model = MemoryModel::with_default_sizes(100.0, 20.0);
        let mut layout = SheetLayout::from_model(&model, &GridConfig::default());
        // 500k px down at 20px rows
        assert_eq!(layout.row_at_y(&model, 500_000.0), 25_001);
        assert_eq!(layout.row_start(&model, 25_001), 500_000.0);
    }
}
