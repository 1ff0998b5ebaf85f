#[macro_use]
extern crate log;

pub mod config;
pub mod diagnostics;
pub mod query;
pub mod server;
pub mod store;

pub use diagnostics::{Diagnostics, LogDiagnostics, MemoryDiagnostics};
pub use query::QueryService;
pub use store::{Record, RecordCollection, RecordStore};
