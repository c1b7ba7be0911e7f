//! Report module - listings, media info and conversion summaries

pub mod listing;
pub mod summary;

pub use listing::*;
pub use summary::*;
