//! echoz-render
//!
//! Turns numeric context into report prose: placeholder substitution, value
//! formatting, report assembly, and the request pipeline that ties scoring
//! and rendering together.

pub mod context;
pub mod engine;
pub mod error;
pub mod format;
pub mod markers;
pub mod placeholder;
pub mod report;
