//! xlgrid - spreadsheet viewport interaction engine
//!
//! Turns pointer and scroll input over a spreadsheet canvas into selection,
//! autofill, resize and scroll changes against an external workbook model:
//! - Pixel <-> cell mapping across frozen panes and variable sizes
//! - Cell, row, column and whole-sheet selection
//! - Autofill ("extend to") drags with directional commit
//! - Column/row resize with selection-span semantics
//! - Model <-> DOM scroll synchronization without feedback loops
//!
//! The engine draws nothing. It hands a [`render::RenderFrame`] to a
//! [`render::SheetRenderer`] and returns [`viewer::Effect`]s for the host.
//!
//! # Usage (Rust)
//!
//! ```
//! use xlgrid::{GridConfig, GridView, MemoryModel};
//!
//! let mut grid = GridView::new(MemoryModel::new(), GridConfig::default()).unwrap();
//! let effects = grid.on_pointer_down(200.0, 60.0, false);
//! assert!(!effects.is_empty());
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { WorksheetView } from 'xlgrid';
//! await init();
//! const view = new WorksheetView(model, container, config, (frame) => draw(frame), onEvent);
//! view.renderSheet();
//! ```

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod types;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use config::GridConfig;
pub use error::{GridError, Result};
pub use model::{CopiedStyles, MemoryModel, SheetModel};
pub use viewer::{ContextMenuAction, Effect, GridView};

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
