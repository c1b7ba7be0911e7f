//! CLI module - argument parsing and the interactive menu

mod args;
pub mod interactive;
pub mod prompts;

pub use args::Cli;
pub use interactive::run_interactive;
pub use prompts::*;
