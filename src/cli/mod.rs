//! Command-line interface module.

mod args;
pub mod extract;
pub mod rehydrate;
pub mod render;

pub use args::{Cli, Commands};
