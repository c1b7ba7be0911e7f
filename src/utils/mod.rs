//! Utilities - file formats, system checks, formatting, terminal output

pub mod formats;
pub mod humanize;
pub mod progress;
pub mod styling;
pub mod system;

pub use formats::*;
pub use humanize::*;
pub use progress::*;
pub use styling::*;
pub use system::*;
