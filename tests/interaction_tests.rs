//! Pointer interaction tests driven through `GridView` with canvas pixels.
//!
//! Every test uses 30px row headers, 20px column headers, 100px columns and
//! 20px rows, so column `c` spans `30 + 100 * (c - 1) .. 30 + 100 * c` and
//! row `r` spans `20 + 20 * (r - 1) .. 20 + 20 * r`.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use test_case::test_case;
use xlgrid::model::ModelCall;
use xlgrid::viewer::Cursor;
use xlgrid::{
    CellRange, ContextMenuAction, Effect, ExtendDirection, FillArea, GridConfig, GridView,
    MemoryModel, SheetModel, LAST_COLUMN, LAST_ROW,
};

fn grid() -> GridView<MemoryModel> {
    let config = GridConfig {
        row_header_width: 30.0,
        column_header_height: 20.0,
        ..GridConfig::default()
    };
    GridView::new(MemoryModel::with_default_sizes(100.0, 20.0), config).unwrap()
}

/// Canvas point at the middle of cell `(row, column)`.
fn center(row: u32, column: u32) -> (f64, f64) {
    (
        30.0 + 100.0 * f64::from(column) - 50.0,
        20.0 + 20.0 * f64::from(row) - 10.0,
    )
}

fn drag_cells(grid: &mut GridView<MemoryModel>, from: (u32, u32), to: (u32, u32)) {
    let (x, y) = center(from.0, from.1);
    grid.on_pointer_down(x, y, false);
    let (x, y) = center(to.0, to.1);
    grid.on_pointer_move(x, y);
    grid.on_pointer_up(x, y);
}

#[test]
fn click_selects_cell() {
    let mut grid = grid();
    let (x, y) = center(5, 3);
    grid.on_pointer_down(x, y, false);
    grid.on_pointer_up(x, y);
    let view = grid.model().selected_view();
    assert_eq!((view.row, view.column), (5, 3));
    assert_eq!(view.range, CellRange::new(5, 3, 5, 3));
}

#[test]
fn shift_click_extends_from_anchor() {
    let mut grid = grid();
    let (x, y) = center(2, 2);
    grid.on_pointer_down(x, y, false);
    grid.on_pointer_up(x, y);
    let (x, y) = center(6, 4);
    grid.on_pointer_down(x, y, true);
    let up = grid.on_pointer_up(x, y);
    let view = grid.model().selected_view();
    assert_eq!((view.row, view.column), (2, 2));
    assert_eq!(view.range, CellRange::new(2, 2, 6, 4));
    assert!(up.contains(&Effect::AreaSelected {
        range: CellRange::new(2, 2, 6, 4)
    }));
}

#[test]
fn drag_far_past_canvas_stays_in_bounds() {
    let mut grid = grid();
    grid.resize(430.0, 220.0);
    let (x, y) = center(1, 1);
    grid.on_pointer_down(x, y, false);
    grid.on_pointer_move(10_000.0, 10_000.0);
    let range = grid.model().selected_view().range;
    assert!(range.row_end >= 10);
    assert!(range.column_end >= 4);
    assert!(range.row_end <= LAST_ROW && range.column_end <= LAST_COLUMN);
}

#[test]
fn corner_header_selects_everything() {
    let mut grid = grid();
    grid.on_pointer_down(10.0, 10.0, false);
    assert_eq!(
        grid.model().selected_view().range,
        CellRange::new(1, 1, LAST_ROW, LAST_COLUMN)
    );
    assert!(!grid.is_dragging());
}

#[test]
fn column_header_drag_selects_columns() {
    let mut grid = grid();
    grid.on_pointer_down(180.0, 10.0, false);
    grid.on_pointer_move(380.0, 10.0);
    grid.on_pointer_up(380.0, 10.0);
    let view = grid.model().selected_view();
    assert_eq!((view.row, view.column), (1, 2));
    assert_eq!(view.range, CellRange::new(1, 2, LAST_ROW, 4));
}

#[test]
fn shift_row_header_unions_with_range() {
    let mut grid = grid();
    drag_cells(&mut grid, (3, 2), (4, 3));
    // row 8 header
    grid.on_pointer_down(15.0, 170.0, true);
    grid.on_pointer_up(15.0, 170.0);
    assert_eq!(
        grid.model().selected_view().range,
        CellRange::new(3, 1, 8, LAST_COLUMN)
    );
}

#[test]
fn shift_column_header_union_survives_pointer_jitter() {
    let mut grid = grid();
    // column B header
    grid.on_pointer_down(180.0, 10.0, false);
    grid.on_pointer_up(180.0, 10.0);
    // shift on column E, then a 1px move before release
    grid.on_pointer_down(480.0, 10.0, true);
    grid.on_pointer_move(481.0, 10.0);
    grid.on_pointer_up(481.0, 10.0);
    assert_eq!(
        grid.model().selected_view().range,
        CellRange::new(1, 2, LAST_ROW, 5)
    );
}

#[test]
fn shift_row_header_union_survives_pointer_jitter() {
    let mut grid = grid();
    // row 3 header
    grid.on_pointer_down(15.0, 70.0, false);
    grid.on_pointer_up(15.0, 70.0);
    // shift on row 8, then drag on to row 9
    grid.on_pointer_down(15.0, 170.0, true);
    grid.on_pointer_move(15.0, 171.0);
    assert_eq!(
        grid.model().selected_view().range,
        CellRange::new(3, 1, 8, LAST_COLUMN)
    );
    grid.on_pointer_move(15.0, 190.0);
    grid.on_pointer_up(15.0, 190.0);
    assert_eq!(
        grid.model().selected_view().range,
        CellRange::new(3, 1, 9, LAST_COLUMN)
    );
}

#[test]
fn format_painter_pastes_on_area_selected() {
    let mut grid = grid();
    let styles = serde_json::json!([{ "font": { "b": true } }]);
    let armed = grid.set_copy_styles(Some(styles.clone()));
    assert_eq!(
        armed,
        vec![Effect::SetCursor {
            cursor: Cursor::Copy
        }]
    );
    // hovering cells keeps the painter cursor
    let (x, y) = center(2, 2);
    assert!(grid.on_pointer_move(x, y).is_empty());

    grid.on_pointer_down(x, y, false);
    let (x, y) = center(3, 3);
    grid.on_pointer_move(x, y);
    let up = grid.on_pointer_up(x, y);
    assert!(grid
        .model()
        .calls()
        .contains(&ModelCall::PasteStyles(styles)));
    assert!(up.contains(&Effect::SetCursor {
        cursor: Cursor::Default
    }));
    assert!(up.contains(&Effect::AreaSelected {
        range: CellRange::new(2, 2, 3, 3)
    }));
    assert_eq!(grid.copy_styles(), None);
}

#[test]
fn format_painter_with_nothing_copied_only_disarms() {
    let mut grid = grid();
    grid.set_copy_styles(Some(serde_json::json!([])));
    let (x, y) = center(4, 4);
    grid.on_pointer_down(x, y, false);
    let up = grid.on_pointer_up(x, y);
    assert!(!grid
        .model()
        .calls()
        .iter()
        .any(|call| matches!(call, ModelCall::PasteStyles(_))));
    assert!(up.contains(&Effect::SetCursor {
        cursor: Cursor::Default
    }));
    assert_eq!(grid.copy_styles(), None);
}

#[test]
fn host_width_change_is_seen_after_invalidate() {
    let mut grid = grid();
    // column C
    grid.on_pointer_down(250.0, 50.0, false);
    grid.on_pointer_up(250.0, 50.0);
    assert_eq!(grid.model().selected_view().column, 3);

    grid.model_mut().set_columns_width(0, 1, 1, 300.0);
    grid.invalidate_layout();
    grid.on_pointer_down(250.0, 50.0, false);
    grid.on_pointer_up(250.0, 50.0);
    assert_eq!(grid.model().selected_view().column, 1);
}

// Selection B2:C3; handle sits on C3's bottom-right corner at (330, 80).
#[test_case((6, 3), ExtendDirection::RowsDown, CellRange::new(4, 2, 6, 3) ; "below")]
#[test_case((1, 2), ExtendDirection::RowsUp, CellRange::new(1, 2, 1, 3) ; "above")]
#[test_case((3, 5), ExtendDirection::ColumnsRight, CellRange::new(2, 4, 3, 5) ; "right")]
#[test_case((2, 1), ExtendDirection::ColumnsLeft, CellRange::new(2, 1, 3, 1) ; "left")]
fn extend_drag_proposes_adjacent_area(
    target: (u32, u32),
    direction: ExtendDirection,
    expected: CellRange,
) {
    let mut grid = grid();
    drag_cells(&mut grid, (2, 2), (3, 3));
    grid.on_pointer_down(330.0, 80.0, false);
    assert!(grid.is_dragging());
    assert_eq!(grid.extend_area(), None);

    let (x, y) = center(target.0, target.1);
    grid.on_pointer_move(x, y);
    let area = grid.extend_area().unwrap();
    assert_eq!(area.direction, direction);
    assert_eq!(area.range(), expected);

    let frame = grid.frame();
    assert_eq!(frame.extend_to, Some(area));
    assert!(!frame.overlay.extend_outline.is_empty());
}

#[test]
fn extend_drag_back_inside_clears_area() {
    let mut grid = grid();
    drag_cells(&mut grid, (2, 2), (3, 3));
    grid.on_pointer_down(330.0, 80.0, false);
    let (x, y) = center(6, 2);
    grid.on_pointer_move(x, y);
    assert!(grid.extend_area().is_some());
    let (x, y) = center(3, 2);
    grid.on_pointer_move(x, y);
    assert_eq!(grid.extend_area(), None);

    grid.model_mut().clear_calls();
    let up = grid.on_pointer_up(x, y);
    assert!(grid.model().calls().is_empty());
    assert_eq!(up, vec![Effect::Render]);
}

#[test]
fn extend_commit_fills_rows_and_grows_selection() {
    let mut grid = grid();
    grid.model_mut().set_cell(0, 2, 2, "a");
    grid.model_mut().set_cell(0, 3, 2, "b");
    drag_cells(&mut grid, (2, 2), (3, 3));
    grid.model_mut().clear_calls();

    grid.on_pointer_down(330.0, 80.0, false);
    let (x, y) = center(6, 3);
    grid.on_pointer_move(x, y);
    let up = grid.on_pointer_up(x, y);

    let source = FillArea {
        sheet: 0,
        row: 2,
        column: 2,
        width: 2,
        height: 2,
    };
    assert_eq!(
        grid.model().calls(),
        &[
            ModelCall::AutoFillRows(source, 6),
            ModelCall::SetSelectedRange(CellRange::new(2, 2, 6, 3)),
        ]
    );
    assert!(up.contains(&Effect::ExtendToCompleted {
        source: CellRange::new(2, 2, 3, 3),
        target: CellRange::new(4, 2, 6, 3),
    }));
    assert_eq!(up.last(), Some(&Effect::Render));
    for (row, text) in [(4, "a"), (5, "b"), (6, "a")] {
        assert_eq!(grid.model().cell_content(0, row, 2), text);
    }
    assert!(grid.extend_area().is_none());
}

#[test]
fn extend_commit_fills_columns_left() {
    let mut grid = grid();
    drag_cells(&mut grid, (2, 3), (3, 4));
    grid.model_mut().clear_calls();
    grid.on_handle_pointer_down();
    let (x, y) = center(3, 1);
    grid.on_pointer_move(x, y);
    grid.on_pointer_up(x, y);
    let source = FillArea {
        sheet: 0,
        row: 2,
        column: 3,
        width: 2,
        height: 2,
    };
    assert_eq!(
        grid.model().calls(),
        &[
            ModelCall::AutoFillColumns(source, 1),
            ModelCall::SetSelectedRange(CellRange::new(2, 1, 3, 4)),
        ]
    );
}

#[test]
fn pointer_cancel_drops_extend_without_commit() {
    let mut grid = grid();
    drag_cells(&mut grid, (2, 2), (3, 3));
    grid.on_handle_pointer_down();
    let (x, y) = center(8, 2);
    grid.on_pointer_move(x, y);
    grid.model_mut().clear_calls();
    assert_eq!(grid.on_pointer_cancel(), vec![Effect::Render]);
    assert!(grid.model().calls().is_empty());
    assert!(!grid.is_dragging());
}

#[test]
fn resize_outside_selection_changes_one_column() {
    let mut grid = grid();
    let down = grid.on_pointer_down(330.0, 10.0, false);
    assert!(down.contains(&Effect::ShowColumnGuide { x: 330.0 }));
    assert_eq!(
        grid.on_pointer_move(380.0, 10.0),
        vec![Effect::ShowColumnGuide { x: 380.0 }, Effect::Render]
    );
    let up = grid.on_pointer_up(380.0, 10.0);
    assert_eq!(
        up,
        vec![
            Effect::HideGuides,
            Effect::ColumnWidthChanged {
                sheet: 0,
                column_start: 3,
                column_end: 3,
                width: 150.0,
            },
            Effect::Render,
        ]
    );
    assert_eq!(grid.model().column_width(0, 3), 150.0);
    assert_eq!(grid.model().column_width(0, 2), 100.0);
}

#[test]
fn resize_inside_selection_changes_whole_span() {
    let mut grid = grid();
    grid.on_pointer_down(180.0, 10.0, false);
    grid.on_pointer_move(380.0, 10.0);
    grid.on_pointer_up(380.0, 10.0);
    grid.model_mut().clear_calls();

    grid.on_pointer_down(330.0, 10.0, false);
    grid.on_pointer_up(310.0, 10.0);
    assert_eq!(
        grid.model().calls(),
        &[ModelCall::SetColumnsWidth {
            sheet: 0,
            column_start: 2,
            column_end: 4,
            width: 80.0,
        }]
    );
    for column in 2..=4 {
        assert_eq!(grid.model().column_width(0, column), 80.0);
    }
}

#[test]
fn row_resize_moves_later_rows() {
    let mut grid = grid();
    // bottom edge of row 2 in the row header
    grid.on_pointer_down(15.0, 60.0, false);
    grid.on_pointer_move(15.0, 90.0);
    grid.on_pointer_up(15.0, 90.0);
    assert_eq!(grid.model().row_height(0, 2), 50.0);
    let (_, y) = center(3, 1);
    grid.on_pointer_down(180.0, y + 30.0, false);
    assert_eq!(grid.model().selected_view().row, 3);
}

#[test]
fn resize_past_leading_edge_is_ignored() {
    let mut grid = grid();
    grid.on_pointer_down(330.0, 10.0, false);
    assert_eq!(
        grid.on_pointer_move(100.0, 10.0),
        vec![Effect::ShowColumnGuide { x: 230.0 }, Effect::Render]
    );
    grid.model_mut().clear_calls();
    let up = grid.on_pointer_up(100.0, 10.0);
    assert_eq!(up, vec![Effect::HideGuides, Effect::Render]);
    assert!(grid.model().calls().is_empty());
    assert_eq!(grid.model().column_width(0, 3), 100.0);
}

#[test]
fn hover_over_row_edge_sets_row_cursor() {
    let mut grid = grid();
    assert_eq!(
        grid.on_pointer_move(15.0, 41.0),
        vec![Effect::SetCursor {
            cursor: Cursor::RowResize
        }]
    );
    assert_eq!(grid.cursor(), Cursor::RowResize);
}

#[test]
fn context_menu_reports_selected_cell() {
    let mut grid = grid();
    let (x, y) = center(4, 28);
    grid.on_pointer_down(x, y, false);
    grid.on_pointer_up(x, y);
    let fx = grid.on_context_menu(12.0, 34.0);
    assert_eq!(
        fx,
        vec![Effect::OpenContextMenu {
            row: 4,
            column: 28,
            column_label: "AB".to_string(),
            x: 12.0,
            y: 34.0,
        }]
    );
    assert_eq!(grid.model().selected_view().row, 4);
}

#[test]
fn freeze_rows_from_context_menu_pins_them() {
    let mut grid = grid();
    let (x, y) = center(3, 2);
    grid.on_pointer_down(x, y, false);
    grid.on_pointer_up(x, y);
    grid.apply_context_action(ContextMenuAction::FreezeRows);
    assert_eq!(grid.model().frozen_rows_count(0), 3);

    grid.model_mut().set_scroll_position(0.0, 200.0);
    grid.sync_viewport();
    let frame = grid.frame();
    assert_eq!(frame.rows.frozen, 3);
    assert_eq!(frame.rows.first, 14);

    // Frozen rows keep their place while scrolled
    let (x, y) = center(2, 2);
    grid.on_pointer_down(x, y, false);
    assert_eq!(grid.model().selected_view().row, 2);
}

#[test]
fn double_click_on_header_does_not_edit() {
    let mut grid = grid();
    assert!(grid.on_double_click(180.0, 10.0).is_empty());
    assert!(grid.editing_cell().is_none());
}

#[test]
fn pointer_down_closes_editor() {
    let mut grid = grid();
    let (x, y) = center(2, 2);
    grid.on_double_click(x, y);
    assert!(grid.editing_cell().is_some());
    let fx = grid.on_pointer_down(x, y, false);
    assert_eq!(fx.first(), Some(&Effect::EndEdit));
    assert!(grid.editing_cell().is_none());
}
