//! Layout engine for cell positions and the coordinate mapper.
//!
//! This module handles:
//! - Cumulative column/row offsets, resolved lazily from the model's sizes
//! - Viewport state (scroll offset, canvas size, visible spans)
//! - Pointer pixel <-> cell mapping across frozen panes

mod sheet_layout;
mod viewport;

pub use sheet_layout::{AxisLayout, SheetLayout};
pub use viewport::{Viewport, VisibleSpan};
