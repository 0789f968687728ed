//! Grid view configuration.
//!
//! Everything here is fixed for the lifetime of a sheet view. Hosts can pass
//! a JSON object (or a JS object on wasm) with any subset of the fields.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::{LAST_COLUMN, LAST_ROW};

/// Default width of the row header band in pixels.
pub const DEFAULT_ROW_HEADER_WIDTH: f64 = 30.0;

/// Default height of the column header band in pixels.
pub const DEFAULT_COLUMN_HEADER_HEIGHT: f64 = 23.0;

/// Virtual scroll area kept ahead of the current horizontal offset.
pub const DEFAULT_SCROLL_MARGIN_X: f64 = 100_000.0;

/// Virtual scroll area kept ahead of the current vertical offset.
pub const DEFAULT_SCROLL_MARGIN_Y: f64 = 500_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Largest addressable row.
    pub last_row: u32,
    /// Largest addressable column.
    pub last_column: u32,
    /// Width of the row header band (0 hides it).
    pub row_header_width: f64,
    /// Height of the column header band (0 hides it).
    pub column_header_height: f64,
    /// Side of the square autofill handle at the selection's bottom-right corner.
    pub selection_handle_size: f64,
    /// Extra pixels around the handle that still count as a hit.
    pub handle_hit_slop: f64,
    /// Width of the grab zone straddling a header edge.
    pub resize_handle_width: f64,
    /// Horizontal virtual-scroll margin.
    pub scroll_margin_x: f64,
    /// Vertical virtual-scroll margin.
    pub scroll_margin_y: f64,
    /// Smallest width a resize drag may commit.
    pub min_column_width: f64,
    /// Smallest height a resize drag may commit.
    pub min_row_height: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            last_row: LAST_ROW,
            last_column: LAST_COLUMN,
            row_header_width: DEFAULT_ROW_HEADER_WIDTH,
            column_header_height: DEFAULT_COLUMN_HEADER_HEIGHT,
            selection_handle_size: 5.0,
            handle_hit_slop: 4.0,
            resize_handle_width: 6.0,
            scroll_margin_x: DEFAULT_SCROLL_MARGIN_X,
            scroll_margin_y: DEFAULT_SCROLL_MARGIN_Y,
            min_column_width: 0.0,
            min_row_height: 0.0,
        }
    }
}

impl GridConfig {
    /// Parse from JSON, filling unspecified fields with defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or fails [`GridConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot work with.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.last_row == 0 {
            return Err(GridError::Config("lastRow must be at least 1".into()));
        }
        if self.last_column == 0 {
            return Err(GridError::Config("lastColumn must be at least 1".into()));
        }
        let non_negative = [
            ("rowHeaderWidth", self.row_header_width),
            ("columnHeaderHeight", self.column_header_height),
            ("selectionHandleSize", self.selection_handle_size),
            ("handleHitSlop", self.handle_hit_slop),
            ("resizeHandleWidth", self.resize_handle_width),
            ("minColumnWidth", self.min_column_width),
            ("minRowHeight", self.min_row_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::Config(format!("{name} must be >= 0, got {value}")));
            }
        }
        for (name, value) in [
            ("scrollMarginX", self.scroll_margin_x),
            ("scrollMarginY", self.scroll_margin_y),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::Config(format!("{name} must be > 0, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GridConfig::from_json(r#"{"lastRow": 1000, "rowHeaderWidth": 40}"#).unwrap();
        assert_eq!(config.last_row, 1000);
        assert_eq!(config.last_column, LAST_COLUMN);
        assert_eq!(config.row_header_width, 40.0);
        assert_eq!(config.scroll_margin_y, DEFAULT_SCROLL_MARGIN_Y);
    }

    #[test]
    fn rejects_zero_bounds() {
        let err = GridConfig::from_json(r#"{"lastColumn": 0}"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn rejects_non_positive_margin() {
        let config = GridConfig {
            scroll_margin_x: 0.0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(
            GridConfig::from_json("{lastRow"),
            Err(GridError::Json(_))
        ));
    }
}
