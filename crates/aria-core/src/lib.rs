#![forbid(unsafe_code)]

//! Core: canonical input events, signal cells, dispatch tables, and typeahead.

pub mod dispatch;
pub mod event;
pub mod logging;
pub mod signal;
pub mod typeahead;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
