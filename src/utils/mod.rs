//! Cross-cutting utilities.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization.

pub mod logging;
