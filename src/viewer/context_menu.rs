//! Cell context menu actions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::SheetModel;
use crate::types::SelectedView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextMenuAction {
    InsertRowAbove,
    InsertRowBelow,
    InsertColumnLeft,
    InsertColumnRight,
    /// Freeze columns up to and including the selected column.
    FreezeColumns,
    /// Freeze rows up to and including the selected row.
    FreezeRows,
    UnfreezeColumns,
    UnfreezeRows,
    DeleteRow,
    DeleteColumn,
}

impl ContextMenuAction {
    /// Apply the action at the selected cell of `view`.
    pub fn apply<M: SheetModel + ?Sized>(self, model: &mut M, view: &SelectedView) {
        let SelectedView {
            sheet, row, column, ..
        } = *view;
        debug!(sheet, row, column, action = ?self, "context menu action");
        match self {
            Self::InsertRowAbove => model.insert_row(sheet, row),
            Self::InsertRowBelow => model.insert_row(sheet, row.saturating_add(1)),
            Self::InsertColumnLeft => model.insert_column(sheet, column),
            Self::InsertColumnRight => model.insert_column(sheet, column.saturating_add(1)),
            Self::FreezeColumns => model.set_frozen_columns_count(sheet, column),
            Self::FreezeRows => model.set_frozen_rows_count(sheet, row),
            Self::UnfreezeColumns => model.set_frozen_columns_count(sheet, 0),
            Self::UnfreezeRows => model.set_frozen_rows_count(sheet, 0),
            Self::DeleteRow => model.delete_row(sheet, row),
            Self::DeleteColumn => model.delete_column(sheet, column),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{MemoryModel, ModelCall};

    #[test]
    fn actions_target_selected_cell() {
        let mut model = MemoryModel::new();
        model.set_selected_cell(4, 3);
        let view = model.selected_view();
        model.clear_calls();
        for action in [
            ContextMenuAction::InsertRowBelow,
            ContextMenuAction::InsertColumnLeft,
            ContextMenuAction::FreezeRows,
            ContextMenuAction::UnfreezeColumns,
            ContextMenuAction::DeleteColumn,
        ] {
            action.apply(&mut model, &view);
        }
        assert_eq!(
            model.calls(),
            &[
                ModelCall::InsertRow(0, 5),
                ModelCall::InsertColumn(0, 3),
                ModelCall::SetFrozenRows(0, 4),
                ModelCall::SetFrozenColumns(0, 0),
                ModelCall::DeleteColumn(0, 3),
            ]
        );
    }

    #[test]
    fn parses_camel_case_names() {
        let action: ContextMenuAction = serde_json::from_str("\"insertRowAbove\"").unwrap();
        assert_eq!(action, ContextMenuAction::InsertRowAbove);
    }
}
