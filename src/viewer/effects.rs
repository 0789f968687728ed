//! Side effects requested by the engine.
//!
//! Every interaction entry point returns a list of [`Effect`]s instead of
//! touching the DOM. The host (or the web binding) applies them in order.

use serde::Serialize;

use crate::types::{CellRange, EditingCell, SheetId};

/// Pointer cursor shown over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    #[default]
    Default,
    ColResize,
    RowResize,
    /// Format painter armed.
    Copy,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ColResize => "col-resize",
            Self::RowResize => "row-resize",
            Self::Copy => "copy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Repaint the visible region.
    Render,
    /// Write the scroll container's offsets. The resulting scroll event is
    /// recognized and not treated as a user scroll.
    #[serde(rename_all = "camelCase")]
    ScrollContainer { left: f64, top: f64 },
    /// Resize the spacer that gives the scroll container its virtual extent.
    #[serde(rename_all = "camelCase")]
    ResizeSpacer { width: f64, height: f64 },
    #[serde(rename_all = "camelCase")]
    ShowColumnGuide { x: f64 },
    #[serde(rename_all = "camelCase")]
    ShowRowGuide { y: f64 },
    HideGuides,
    SetCursor { cursor: Cursor },
    #[serde(rename_all = "camelCase")]
    OpenContextMenu {
        row: u32,
        column: u32,
        column_label: String,
        x: f64,
        y: f64,
    },
    BeginEdit { cell: EditingCell },
    EndEdit,
    #[serde(rename_all = "camelCase")]
    ColumnWidthChanged {
        sheet: SheetId,
        column_start: u32,
        column_end: u32,
        width: f64,
    },
    #[serde(rename_all = "camelCase")]
    RowHeightChanged {
        sheet: SheetId,
        row_start: u32,
        row_end: u32,
        height: f64,
    },
    /// A drag selection finished.
    AreaSelected { range: CellRange },
    /// An autofill drag was committed.
    ExtendToCompleted { source: CellRange, target: CellRange },
}

/// Collects effects for one interaction step.
///
/// A render request is recorded once and emitted last, so a step never
/// produces more than one [`Effect::Render`].
#[derive(Debug, Default)]
pub struct Effects {
    list: Vec<Effect>,
    render: bool,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        if matches!(effect, Effect::Render) {
            self.render = true;
        } else {
            self.list.push(effect);
        }
    }

    pub fn request_render(&mut self) {
        self.render = true;
    }

    pub fn into_vec(self) -> Vec<Effect> {
        let mut list = self.list;
        if self.render {
            list.push(Effect::Render);
        }
        list
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn render_is_deduplicated_and_last() {
        let mut fx = Effects::new();
        fx.request_render();
        fx.push(Effect::HideGuides);
        fx.push(Effect::Render);
        fx.request_render();
        assert_eq!(fx.into_vec(), vec![Effect::HideGuides, Effect::Render]);
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Effect::ScrollContainer {
            left: 10.0,
            top: 20.0,
        })
        .unwrap();
        assert_eq!(json["type"], "scrollContainer");
        assert_eq!(json["top"], 20.0);
        let cursor = serde_json::to_value(Effect::SetCursor {
            cursor: Cursor::ColResize,
        })
        .unwrap();
        assert_eq!(cursor["cursor"], "col-resize");
    }
}
