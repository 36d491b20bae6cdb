//! Rendering helpers shared by the console output.

mod color;
mod console;

pub use color::{Color, colorize};
pub use console::ConsoleFormat;
