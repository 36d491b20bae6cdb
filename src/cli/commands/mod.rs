//! One module per subcommand.

mod demo;
mod log;

pub use demo::cmd_demo;
pub use log::cmd_log;
