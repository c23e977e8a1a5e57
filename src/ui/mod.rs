//! User interface
//!
//! CLI parsing, terminal rendering of reports and views, and shell
//! completion generation.

pub mod cli;
pub mod color;
pub mod completion;
pub mod output;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use completion::print_completions;
