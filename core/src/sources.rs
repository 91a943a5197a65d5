//! # Input Sources
//!
//! Thin readers for the files a run consumes. Each has a `parse_*` function
//! working on in-memory text and a `load_*` wrapper reading from disk.

pub mod discovery;
pub mod ignore;
pub mod vendors;
