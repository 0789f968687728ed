//! Data types shared by the layout, viewer and render modules.

mod area;
mod cell;
mod editing;
mod selection;

pub use area::*;
pub use cell::*;
pub use editing::*;
pub use selection::*;
