//! The boundary to the workbook/calculation model.
//!
//! The engine never stores cell content, sizes or frozen counts itself: it
//! queries them through [`SheetModel`] and requests mutations through it.
//! Mutations are fire-and-forget; whatever the model does with a request it
//! cannot honor is the model's business.

mod memory;

pub use memory::{MemoryModel, ModelCall};

use crate::types::{CellRange, FillArea, SelectedView, SheetId};

/// Styles picked up by the format painter. Opaque to the engine; only the
/// model knows their shape.
pub type CopiedStyles = serde_json::Value;

pub trait SheetModel {
    /// Active sheet, anchor cell and selected range.
    fn selected_view(&self) -> SelectedView;

    /// Collapse the selection to one cell, which becomes the anchor.
    fn set_selected_cell(&mut self, row: u32, column: u32);

    /// Set the selected rectangle. Corners may come in any order.
    fn set_selected_range(&mut self, range: CellRange);

    /// Live drag-selection progress: the range now spans anchor..(row, column).
    fn on_area_selecting(&mut self, row: u32, column: u32);

    fn column_width(&self, sheet: SheetId, column: u32) -> f64;

    fn set_columns_width(&mut self, sheet: SheetId, column_start: u32, column_end: u32, width: f64);

    fn row_height(&self, sheet: SheetId, row: u32) -> f64;

    fn set_rows_height(&mut self, sheet: SheetId, row_start: u32, row_end: u32, height: f64);

    /// Persisted horizontal scroll offset of the active sheet.
    fn scroll_x(&self) -> f64;

    /// Persisted vertical scroll offset of the active sheet.
    fn scroll_y(&self) -> f64;

    /// Store the scroll offset of the active sheet.
    fn set_scroll_position(&mut self, left: f64, top: f64);

    /// Fill from `area` up or down to `to_row`.
    fn auto_fill_rows(&mut self, area: FillArea, to_row: u32);

    /// Fill from `area` left or right to `to_column`.
    fn auto_fill_columns(&mut self, area: FillArea, to_column: u32);

    fn frozen_rows_count(&self, sheet: SheetId) -> u32;

    fn frozen_columns_count(&self, sheet: SheetId) -> u32;

    fn set_frozen_rows_count(&mut self, sheet: SheetId, count: u32);

    fn set_frozen_columns_count(&mut self, sheet: SheetId, count: u32);

    fn insert_row(&mut self, sheet: SheetId, row: u32);

    fn insert_column(&mut self, sheet: SheetId, column: u32);

    fn delete_row(&mut self, sheet: SheetId, row: u32);

    fn delete_column(&mut self, sheet: SheetId, column: u32);

    /// Apply format-painter styles to the selected range.
    fn paste_styles(&mut self, styles: &CopiedStyles);

    /// Text the editor should start with (formula or displayed input).
    fn cell_content(&self, sheet: SheetId, row: u32, column: u32) -> String;
}
