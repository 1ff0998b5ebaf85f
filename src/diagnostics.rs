//! Diagnostics sinks for the record store and query service.
//!
//! Neither the store nor the query service log on their own. Both are given a
//! [`Diagnostics`] implementation at construction and report everything they
//! observe through it.
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// the source was read and decoded
    Loaded { path: PathBuf, records: usize },
    MissingSource { path: PathBuf },
    ReadFailure { path: PathBuf, message: String },
    DecodeFailure { path: PathBuf, message: String },
    /// the document decoded but is not an array of objects
    UnexpectedShape { path: PathBuf, found: &'static str },
    UnknownUser { user: String },
    PasswordMismatch { user: String },
    Authenticated { user: String },
}

impl From<&store::Error> for Event {
    fn from(err: &store::Error) -> Self {
        match err {
            store::Error::MissingSource(path) => Event::MissingSource { path: path.clone() },
            store::Error::ReadFailure { path, source } => Event::ReadFailure {
                path: path.clone(),
                message: source.to_string(),
            },
            store::Error::DecodeFailure { path, message } => Event::DecodeFailure {
                path: path.clone(),
                message: message.clone(),
            },
        }
    }
}

pub trait Diagnostics: Send + Sync + 'static {
    fn report(&self, event: Event);
}

/// LogDiagnostics forwards every event to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, event: Event) {
        match event {
            Event::Loaded { path, records } => {
                trace!("loaded {} record(s) from '{}'", records, path.display())
            }
            Event::MissingSource { path } => {
                debug!("record source '{}' does not exist", path.display())
            }
            Event::ReadFailure { path, message } => {
                error!("failed to read record source '{}': {}", path.display(), message)
            }
            Event::DecodeFailure { path, message } => {
                error!(
                    "failed to decode record source '{}': {}",
                    path.display(),
                    message
                )
            }
            Event::UnexpectedShape { path, found } => {
                warn!(
                    "record source '{}' holds {} instead of an array of objects, ignoring it",
                    path.display(),
                    found
                )
            }
            Event::UnknownUser { user } => info!("login rejected: unknown user '{}'", user),
            Event::PasswordMismatch { user } => {
                info!("login rejected: wrong password for user '{}'", user)
            }
            Event::Authenticated { user } => debug!("user '{}' authenticated", user),
        }
    }
}

/// MemoryDiagnostics keeps every reported event in order
#[derive(Debug, Default, Clone)]
pub struct MemoryDiagnostics {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn report(&self, event: Event) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
