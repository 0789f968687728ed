use serde::Serialize;

use super::SheetId;

/// Which input owns keyboard focus while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorFocus {
    #[default]
    Cell,
    FormulaBar,
}

/// How arrow keys behave inside the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    /// Arrows commit the edit and move the selection.
    #[default]
    Accept,
    /// Arrows move the caret.
    Edit,
}

/// Seed for the in-cell editor, produced on double-click.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingCell {
    pub sheet: SheetId,
    pub row: u32,
    pub column: u32,
    pub text: String,
    /// Caret positions in UTF-16 code units, as JS string offsets count.
    pub cursor_start: usize,
    pub cursor_end: usize,
    pub focus: EditorFocus,
    pub mode: EditorMode,
    pub editor_width: f64,
    pub editor_height: f64,
}

impl EditingCell {
    /// Start editing with the caret after the last character.
    pub fn at_end(
        sheet: SheetId,
        row: u32,
        column: u32,
        text: String,
        editor_width: f64,
        editor_height: f64,
    ) -> Self {
        let end = text.encode_utf16().count();
        Self {
            sheet,
            row,
            column,
            text,
            cursor_start: end,
            cursor_end: end,
            focus: EditorFocus::Cell,
            mode: EditorMode::Accept,
            editor_width,
            editor_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_counts_utf16_units_not_bytes() {
        let e = EditingCell::at_end(0, 1, 1, "héllo".to_string(), 100.0, 20.0);
        assert_eq!(e.cursor_start, 5);
        assert_eq!(e.cursor_end, 5);
        assert_eq!(e.mode, EditorMode::Accept);
    }

    #[test]
    fn caret_after_astral_characters() {
        // the emoji is a surrogate pair in JS strings
        let e = EditingCell::at_end(0, 1, 1, "Total 😀".to_string(), 100.0, 20.0);
        assert_eq!(e.cursor_start, 8);
        assert_eq!(e.cursor_end, 8);
    }
}
