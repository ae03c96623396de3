//! Command implementations

pub mod base;
pub mod list;
pub mod pr;

pub use base::{Command, CommandContext};
pub use list::ListCommand;
pub use pr::PrCommand;
