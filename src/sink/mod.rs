//! Sink Adapter module
//!
//! The boundary to the tabular store that receives finished rows:
//! append one row, append a batch, read everything, clear.
//!
//! # Backends
//!
//! - [`MemorySink`] keeps rows in memory (dry runs, tests)
//! - [`JsonFileSink`] persists the table as a JSON document with atomic rewrites

mod json;
mod memory;
mod types;

// Re-export public API
pub use json::{JsonFileSink, STORE_VERSION};
pub use memory::MemorySink;
pub use types::{sheet_stats, Result, RowSink, SheetStats, SinkError};
