//! In-memory [`SheetModel`] used by native hosts and tests.
//!
//! Stores sparse sizes and cell text per sheet and records every mutation
//! request so callers can check exactly what the engine asked for.

use std::collections::{BTreeMap, HashMap};

use super::{CopiedStyles, SheetModel};
use crate::types::{CellCoord, CellRange, FillArea, SelectedView, SheetId};

/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 24.0;

/// A mutation request received by [`MemoryModel`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModelCall {
    SetSelectedCell(u32, u32),
    SetSelectedRange(CellRange),
    AreaSelecting(u32, u32),
    SetColumnsWidth {
        sheet: SheetId,
        column_start: u32,
        column_end: u32,
        width: f64,
    },
    SetRowsHeight {
        sheet: SheetId,
        row_start: u32,
        row_end: u32,
        height: f64,
    },
    SetScroll(f64, f64),
    AutoFillRows(FillArea, u32),
    AutoFillColumns(FillArea, u32),
    SetFrozenRows(SheetId, u32),
    SetFrozenColumns(SheetId, u32),
    InsertRow(SheetId, u32),
    InsertColumn(SheetId, u32),
    DeleteRow(SheetId, u32),
    DeleteColumn(SheetId, u32),
    PasteStyles(CopiedStyles),
}

#[derive(Debug, Clone)]
struct MemorySheet {
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    frozen_rows: u32,
    frozen_columns: u32,
    cells: HashMap<(u32, u32), String>,
    scroll: (f64, f64),
    anchor: CellCoord,
    range: CellRange,
}

impl Default for MemorySheet {
    fn default() -> Self {
        Self {
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            frozen_rows: 0,
            frozen_columns: 0,
            cells: HashMap::new(),
            scroll: (0.0, 0.0),
            anchor: CellCoord::new(1, 1),
            range: CellRange::new(1, 1, 1, 1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemoryModel {
    sheets: Vec<MemorySheet>,
    selected_sheet: SheetId,
    default_column_width: f64,
    default_row_height: f64,
    calls: Vec<ModelCall>,
}

impl Default for MemoryModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryModel {
    /// One empty sheet with default sizes.
    pub fn new() -> Self {
        Self::with_default_sizes(DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT)
    }

    pub fn with_default_sizes(column_width: f64, row_height: f64) -> Self {
        Self {
            sheets: vec![MemorySheet::default()],
            selected_sheet: 0,
            default_column_width: column_width,
            default_row_height: row_height,
            calls: Vec::new(),
        }
    }

    /// Append an empty sheet and return its id.
    pub fn add_sheet(&mut self) -> SheetId {
        self.sheets.push(MemorySheet::default());
        SheetId::try_from(self.sheets.len() - 1).unwrap_or(SheetId::MAX)
    }

    /// Switch the active sheet. Unknown ids are ignored.
    pub fn set_selected_sheet(&mut self, sheet: SheetId) {
        if (sheet as usize) < self.sheets.len() {
            self.selected_sheet = sheet;
        }
    }

    pub fn set_cell(&mut self, sheet: SheetId, row: u32, column: u32, text: &str) {
        if let Some(s) = self.sheet_mut(sheet) {
            if text.is_empty() {
                s.cells.remove(&(row, column));
            } else {
                s.cells.insert((row, column), text.to_string());
            }
        }
    }

    /// Mutation requests received so far, oldest first.
    pub fn calls(&self) -> &[ModelCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn sheet(&self, sheet: SheetId) -> Option<&MemorySheet> {
        self.sheets.get(sheet as usize)
    }

    fn sheet_mut(&mut self, sheet: SheetId) -> Option<&mut MemorySheet> {
        self.sheets.get_mut(sheet as usize)
    }

    fn active_mut(&mut self) -> Option<&mut MemorySheet> {
        let sheet = self.selected_sheet;
        self.sheet_mut(sheet)
    }
}

/// Shift every key at or past `at` by one, up (`insert`) or down.
fn shift_keys<V>(map: &mut BTreeMap<u32, V>, at: u32, insert: bool) {
    let moved: Vec<(u32, V)> = {
        let keys: Vec<u32> = map.range(at..).map(|(k, _)| *k).collect();
        keys.into_iter()
            .filter_map(|k| map.remove(&k).map(|v| (k, v)))
            .collect()
    };
    for (k, v) in moved {
        if insert {
            map.insert(k + 1, v);
        } else if k != at {
            map.insert(k - 1, v);
        }
    }
}

fn shift_cells(
    cells: &mut HashMap<(u32, u32), String>,
    at: u32,
    insert: bool,
    axis: impl Fn(&(u32, u32)) -> u32,
    rebuild: impl Fn((u32, u32), u32) -> (u32, u32),
) {
    let old = std::mem::take(cells);
    for (key, value) in old {
        let index = axis(&key);
        if index < at {
            cells.insert(key, value);
        } else if insert {
            cells.insert(rebuild(key, index + 1), value);
        } else if index > at {
            cells.insert(rebuild(key, index - 1), value);
        }
    }
}

impl SheetModel for MemoryModel {
    fn selected_view(&self) -> SelectedView {
        let (anchor, range) = self
            .sheet(self.selected_sheet)
            .map(|s| (s.anchor, s.range))
            .unwrap_or((CellCoord::new(1, 1), CellRange::new(1, 1, 1, 1)));
        SelectedView {
            sheet: self.selected_sheet,
            row: anchor.row,
            column: anchor.column,
            range,
        }
    }

    fn set_selected_cell(&mut self, row: u32, column: u32) {
        self.calls.push(ModelCall::SetSelectedCell(row, column));
        if let Some(s) = self.active_mut() {
            s.anchor = CellCoord::new(row, column);
            s.range = CellRange::single(s.anchor);
        }
    }

    fn set_selected_range(&mut self, range: CellRange) {
        self.calls.push(ModelCall::SetSelectedRange(range));
        if let Some(s) = self.active_mut() {
            s.range = range;
        }
    }

    fn on_area_selecting(&mut self, row: u32, column: u32) {
        self.calls.push(ModelCall::AreaSelecting(row, column));
        if let Some(s) = self.active_mut() {
            s.range = CellRange::new(s.anchor.row, s.anchor.column, row, column);
        }
    }

    fn column_width(&self, sheet: SheetId, column: u32) -> f64 {
        self.sheet(sheet)
            .and_then(|s| s.column_widths.get(&column).copied())
            .unwrap_or(self.default_column_width)
    }

    fn set_columns_width(
        &mut self,
        sheet: SheetId,
        column_start: u32,
        column_end: u32,
        width: f64,
    ) {
        self.calls.push(ModelCall::SetColumnsWidth {
            sheet,
            column_start,
            column_end,
            width,
        });
        if let Some(s) = self.sheet_mut(sheet) {
            for column in column_start..=column_end {
                s.column_widths.insert(column, width);
            }
        }
    }

    fn row_height(&self, sheet: SheetId, row: u32) -> f64 {
        self.sheet(sheet)
            .and_then(|s| s.row_heights.get(&row).copied())
            .unwrap_or(self.default_row_height)
    }

    fn set_rows_height(&mut self, sheet: SheetId, row_start: u32, row_end: u32, height: f64) {
        self.calls.push(ModelCall::SetRowsHeight {
            sheet,
            row_start,
            row_end,
            height,
        });
        if let Some(s) = self.sheet_mut(sheet) {
            for row in row_start..=row_end {
                s.row_heights.insert(row, height);
            }
        }
    }

    fn scroll_x(&self) -> f64 {
        self.sheet(self.selected_sheet).map_or(0.0, |s| s.scroll.0)
    }

    fn scroll_y(&self) -> f64 {
        self.sheet(self.selected_sheet).map_or(0.0, |s| s.scroll.1)
    }

    fn set_scroll_position(&mut self, left: f64, top: f64) {
        self.calls.push(ModelCall::SetScroll(left, top));
        if let Some(s) = self.active_mut() {
            s.scroll = (left.max(0.0), top.max(0.0));
        }
    }

    fn auto_fill_rows(&mut self, area: FillArea, to_row: u32) {
        self.calls.push(ModelCall::AutoFillRows(area, to_row));
        let Some(s) = self.sheet_mut(area.sheet) else {
            return;
        };
        let targets: Vec<u32> = if to_row >= area.row + area.height {
            (area.row + area.height..=to_row).collect()
        } else if to_row < area.row {
            (to_row..area.row).collect()
        } else {
            return;
        };
        let height = i64::from(area.height);
        for row in targets {
            let offset = (i64::from(row) - i64::from(area.row)).rem_euclid(height);
            let source_row = area.row + u32::try_from(offset).unwrap_or(0);
            for column in area.column..area.column + area.width {
                match s.cells.get(&(source_row, column)).cloned() {
                    Some(text) => s.cells.insert((row, column), text),
                    None => s.cells.remove(&(row, column)),
                };
            }
        }
    }

    fn auto_fill_columns(&mut self, area: FillArea, to_column: u32) {
        self.calls.push(ModelCall::AutoFillColumns(area, to_column));
        let Some(s) = self.sheet_mut(area.sheet) else {
            return;
        };
        let targets: Vec<u32> = if to_column >= area.column + area.width {
            (area.column + area.width..=to_column).collect()
        } else if to_column < area.column {
            (to_column..area.column).collect()
        } else {
            return;
        };
        let width = i64::from(area.width);
        for column in targets {
            let offset = (i64::from(column) - i64::from(area.column)).rem_euclid(width);
            let source_column = area.column + u32::try_from(offset).unwrap_or(0);
            for row in area.row..area.row + area.height {
                match s.cells.get(&(row, source_column)).cloned() {
                    Some(text) => s.cells.insert((row, column), text),
                    None => s.cells.remove(&(row, column)),
                };
            }
        }
    }

    fn frozen_rows_count(&self, sheet: SheetId) -> u32 {
        self.sheet(sheet).map_or(0, |s| s.frozen_rows)
    }

    fn frozen_columns_count(&self, sheet: SheetId) -> u32 {
        self.sheet(sheet).map_or(0, |s| s.frozen_columns)
    }

    fn set_frozen_rows_count(&mut self, sheet: SheetId, count: u32) {
        self.calls.push(ModelCall::SetFrozenRows(sheet, count));
        if let Some(s) = self.sheet_mut(sheet) {
            s.frozen_rows = count;
        }
    }

    fn set_frozen_columns_count(&mut self, sheet: SheetId, count: u32) {
        self.calls.push(ModelCall::SetFrozenColumns(sheet, count));
        if let Some(s) = self.sheet_mut(sheet) {
            s.frozen_columns = count;
        }
    }

    fn insert_row(&mut self, sheet: SheetId, row: u32) {
        self.calls.push(ModelCall::InsertRow(sheet, row));
        if let Some(s) = self.sheet_mut(sheet) {
            shift_keys(&mut s.row_heights, row, true);
            shift_cells(&mut s.cells, row, true, |k| k.0, |k, r| (r, k.1));
        }
    }

    fn insert_column(&mut self, sheet: SheetId, column: u32) {
        self.calls.push(ModelCall::InsertColumn(sheet, column));
        if let Some(s) = self.sheet_mut(sheet) {
            shift_keys(&mut s.column_widths, column, true);
            shift_cells(&mut s.cells, column, true, |k| k.1, |k, c| (k.0, c));
        }
    }

    fn delete_row(&mut self, sheet: SheetId, row: u32) {
        self.calls.push(ModelCall::DeleteRow(sheet, row));
        if let Some(s) = self.sheet_mut(sheet) {
            shift_keys(&mut s.row_heights, row, false);
            shift_cells(&mut s.cells, row, false, |k| k.0, |k, r| (r, k.1));
        }
    }

    fn delete_column(&mut self, sheet: SheetId, column: u32) {
        self.calls.push(ModelCall::DeleteColumn(sheet, column));
        if let Some(s) = self.sheet_mut(sheet) {
            shift_keys(&mut s.column_widths, column, false);
            shift_cells(&mut s.cells, column, false, |k| k.1, |k, c| (k.0, c));
        }
    }

    fn paste_styles(&mut self, styles: &CopiedStyles) {
        self.calls.push(ModelCall::PasteStyles(styles.clone()));
    }

    fn cell_content(&self, sheet: SheetId, row: u32, column: u32) -> String {
        self.sheet(sheet)
            .and_then(|s| s.cells.get(&(row, column)).cloned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn fills_rows_down_by_repeating_source() {
        let mut model = MemoryModel::new();
        model.set_cell(0, 1, 1, "a");
        model.set_cell(0, 2, 1, "b");
        let area = FillArea {
            sheet: 0,
            row: 1,
            column: 1,
            width: 1,
            height: 2,
        };
        model.auto_fill_rows(area, 5);
        let got: Vec<String> = (1..=5).map(|r| model.cell_content(0, r, 1)).collect();
        assert_eq!(got, ["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn fills_columns_left() {
        let mut model = MemoryModel::new();
        model.set_cell(0, 1, 4, "x");
        model.set_cell(0, 1, 5, "y");
        let area = FillArea {
            sheet: 0,
            row: 1,
            column: 4,
            width: 2,
            height: 1,
        };
        model.auto_fill_columns(area, 2);
        assert_eq!(model.cell_content(0, 1, 3), "y");
        assert_eq!(model.cell_content(0, 1, 2), "x");
    }

    #[test]
    fn insert_and_delete_row_shift_content_and_heights() {
        let mut model = MemoryModel::new();
        model.set_cell(0, 3, 1, "three");
        model.set_rows_height(0, 3, 3, 40.0);
        model.insert_row(0, 2);
        assert_eq!(model.cell_content(0, 4, 1), "three");
        assert_eq!(model.row_height(0, 4), 40.0);
        assert_eq!(model.row_height(0, 3), DEFAULT_ROW_HEIGHT);
        model.delete_row(0, 2);
        assert_eq!(model.cell_content(0, 3, 1), "three");
        assert_eq!(model.row_height(0, 3), 40.0);
    }

    #[test]
    fn delete_column_drops_its_cells() {
        let mut model = MemoryModel::new();
        model.set_cell(0, 1, 2, "gone");
        model.set_cell(0, 1, 3, "kept");
        model.delete_column(0, 2);
        assert_eq!(model.cell_content(0, 1, 2), "kept");
        assert_eq!(model.cell_content(0, 1, 3), "");
    }

    #[test]
    fn area_selecting_spans_from_anchor() {
        let mut model = MemoryModel::new();
        model.set_selected_cell(5, 5);
        model.on_area_selecting(2, 7);
        let view = model.selected_view();
        assert_eq!(view.anchor(), CellCoord::new(5, 5));
        assert_eq!(view.range, CellRange::new(5, 5, 2, 7));
    }

    #[test]
    fn sheets_keep_separate_scroll() {
        let mut model = MemoryModel::new();
        let second = model.add_sheet();
        model.set_scroll_position(300.0, 900.0);
        model.set_selected_sheet(second);
        assert_eq!(model.scroll_x(), 0.0);
        model.set_selected_sheet(0);
        assert_eq!(model.scroll_y(), 900.0);
    }
}
