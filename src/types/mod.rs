//! Data types for the grid.

mod cell;
mod column;
mod filter;
mod row;
mod selection;

pub use cell::*;
pub use column::*;
pub use filter::*;
pub use row::*;
pub use selection::*;
