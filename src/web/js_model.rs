//! [`SheetModel`] backed by a JavaScript workbook object.
//!
//! The object is expected to expose the usual workbook methods:
//! `getSelectedView()`, `setSelectedCell(row, column)`,
//! `setSelectedRange(r0, c0, r1, c1)`, `onAreaSelecting(row, column)`,
//! `getColumnWidth(sheet, column)`, `setColumnsWidth(sheet, c0, c1, width)`,
//! `getRowHeight(sheet, row)`, `setRowsHeight(sheet, r0, r1, height)`,
//! `getScrollX()`, `getScrollY()`, `setScrollX(left)`, `setScrollY(top)`,
//! `autoFillRows(area, row)`, `autoFillColumns(area, column)`,
//! `getFrozenRowsCount(sheet)`, `getFrozenColumnsCount(sheet)`,
//! `setFrozenRowsCount(sheet, n)`, `setFrozenColumnsCount(sheet, n)`,
//! `insertRow`, `insertColumn`, `deleteRow`, `deleteColumn` (all
//! `(sheet, index)`), `onPasteStyles(styles)`,
//! `getCellContent(sheet, row, column)` and
//! `setWindowWidth(width)` / `setWindowHeight(height)`.
//!
//! Failed calls are logged and read as zero / empty.

use js_sys::{Array, Function, Reflect};
use serde::{Deserialize, Serialize};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{GridError, Result};
use crate::model::{CopiedStyles, SheetModel};
use crate::types::{CellRange, FillArea, SelectedView, SheetId};

/// `getSelectedView()` result; `range` is `[r0, c0, r1, c1]`.
#[derive(Deserialize)]
struct JsSelectedView {
    sheet: SheetId,
    row: u32,
    column: u32,
    range: [u32; 4],
}

pub struct JsModel {
    inner: JsValue,
}

impl JsModel {
    pub fn new(inner: JsValue) -> Self {
        Self { inner }
    }

    /// Forward the viewport size (`setWindowWidth` / `setWindowHeight`).
    pub fn set_window_size(&mut self, width: f64, height: f64) {
        self.invoke("setWindowWidth", &[JsValue::from_f64(width)]);
        self.invoke("setWindowHeight", &[JsValue::from_f64(height)]);
    }

    fn call(&self, method: &str, args: &[JsValue]) -> Result<JsValue> {
        let function = Reflect::get(&self.inner, &JsValue::from_str(method))
            .map_err(|_| GridError::Js(format!("model.{method} is missing")))?
            .dyn_into::<Function>()
            .map_err(|_| GridError::Js(format!("model.{method} is not a function")))?;
        let args: Array = args.iter().collect();
        function
            .apply(&self.inner, &args)
            .map_err(|err| GridError::Js(format!("model.{method} threw {err:?}")))
    }

    fn invoke(&self, method: &str, args: &[JsValue]) {
        if let Err(err) = self.call(method, args) {
            warn!(%err, "model call failed");
        }
    }

    fn number(&self, method: &str, args: &[JsValue]) -> f64 {
        match self.call(method, args) {
            Ok(value) => value.as_f64().unwrap_or(0.0),
            Err(err) => {
                warn!(%err, "model query failed");
                0.0
            }
        }
    }

    fn count(&self, method: &str, args: &[JsValue]) -> u32 {
        self.call(method, args)
            .ok()
            .and_then(|value| serde_wasm_bindgen::from_value(value).ok())
            .unwrap_or(0)
    }
}

fn int(value: u32) -> JsValue {
    JsValue::from(value)
}

impl SheetModel for JsModel {
    fn selected_view(&self) -> SelectedView {
        let view = self
            .call("getSelectedView", &[])
            .and_then(|value| {
                serde_wasm_bindgen::from_value::<JsSelectedView>(value)
                    .map_err(|err| GridError::Js(err.to_string()))
            });
        match view {
            Ok(view) => SelectedView {
                sheet: view.sheet,
                row: view.row,
                column: view.column,
                range: CellRange::from_array(view.range),
            },
            Err(err) => {
                warn!(%err, "cannot read selected view");
                SelectedView {
                    sheet: 0,
                    row: 1,
                    column: 1,
                    range: CellRange::new(1, 1, 1, 1),
                }
            }
        }
    }

    fn set_selected_cell(&mut self, row: u32, column: u32) {
        self.invoke("setSelectedCell", &[int(row), int(column)]);
    }

    fn set_selected_range(&mut self, range: CellRange) {
        let [r0, c0, r1, c1] = range.to_array();
        self.invoke("setSelectedRange", &[int(r0), int(c0), int(r1), int(c1)]);
    }

    fn on_area_selecting(&mut self, row: u32, column: u32) {
        self.invoke("onAreaSelecting", &[int(row), int(column)]);
    }

    fn column_width(&self, sheet: SheetId, column: u32) -> f64 {
        self.number("getColumnWidth", &[int(sheet), int(column)])
    }

    fn set_columns_width(
        &mut self,
        sheet: SheetId,
        column_start: u32,
        column_end: u32,
        width: f64,
    ) {
        self.invoke(
            "setColumnsWidth",
            &[int(sheet), int(column_start), int(column_end), JsValue::from_f64(width)],
        );
    }

    fn row_height(&self, sheet: SheetId, row: u32) -> f64 {
        self.number("getRowHeight", &[int(sheet), int(row)])
    }

    fn set_rows_height(&mut self, sheet: SheetId, row_start: u32, row_end: u32, height: f64) {
        self.invoke(
            "setRowsHeight",
            &[int(sheet), int(row_start), int(row_end), JsValue::from_f64(height)],
        );
    }

    fn scroll_x(&self) -> f64 {
        self.number("getScrollX", &[])
    }

    fn scroll_y(&self) -> f64 {
        self.number("getScrollY", &[])
    }

    fn set_scroll_position(&mut self, left: f64, top: f64) {
        self.invoke("setScrollX", &[JsValue::from_f64(left)]);
        self.invoke("setScrollY", &[JsValue::from_f64(top)]);
    }

    fn auto_fill_rows(&mut self, area: FillArea, to_row: u32) {
        match serde_wasm_bindgen::to_value(&area) {
            Ok(area) => self.invoke("autoFillRows", &[area, int(to_row)]),
            Err(err) => warn!(%err, "cannot convert fill area"),
        }
    }

    fn auto_fill_columns(&mut self, area: FillArea, to_column: u32) {
        match serde_wasm_bindgen::to_value(&area) {
            Ok(area) => self.invoke("autoFillColumns", &[area, int(to_column)]),
            Err(err) => warn!(%err, "cannot convert fill area"),
        }
    }

    fn frozen_rows_count(&self, sheet: SheetId) -> u32 {
        self.count("getFrozenRowsCount", &[int(sheet)])
    }

    fn frozen_columns_count(&self, sheet: SheetId) -> u32 {
        self.count("getFrozenColumnsCount", &[int(sheet)])
    }

    fn set_frozen_rows_count(&mut self, sheet: SheetId, count: u32) {
        self.invoke("setFrozenRowsCount", &[int(sheet), int(count)]);
    }

    fn set_frozen_columns_count(&mut self, sheet: SheetId, count: u32) {
        self.invoke("setFrozenColumnsCount", &[int(sheet), int(count)]);
    }

    fn insert_row(&mut self, sheet: SheetId, row: u32) {
        self.invoke("insertRow", &[int(sheet), int(row)]);
    }

    fn insert_column(&mut self, sheet: SheetId, column: u32) {
        self.invoke("insertColumn", &[int(sheet), int(column)]);
    }

    fn delete_row(&mut self, sheet: SheetId, row: u32) {
        self.invoke("deleteRow", &[int(sheet), int(row)]);
    }

    fn delete_column(&mut self, sheet: SheetId, column: u32) {
        self.invoke("deleteColumn", &[int(sheet), int(column)]);
    }

    fn paste_styles(&mut self, styles: &CopiedStyles) {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        match styles.serialize(&serializer) {
            Ok(styles) => self.invoke("onPasteStyles", &[styles]),
            Err(err) => warn!(%err, "cannot convert copied styles"),
        }
    }

    fn cell_content(&self, sheet: SheetId, row: u32, column: u32) -> String {
        self.call("getCellContent", &[int(sheet), int(row), int(column)])
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }
}
