mod record;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::fs;

use crate::diagnostics::{Diagnostics, Event};
pub use record::{Record, RecordCollection};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("record source '{0}' does not exist")]
    MissingSource(PathBuf),
    #[error("failed to read record source '{path}': {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode record source '{path}': {message}")]
    DecodeFailure { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// RecordStore reads the nurse records from a JSON document on disk.
///
/// Nothing is cached, every load opens and decodes the file again.
#[derive(Clone)]
pub struct RecordStore {
    path: PathBuf,
    diagnostics: Arc<dyn Diagnostics>,
}

impl RecordStore {
    pub fn new<P: Into<PathBuf>, D: Diagnostics>(path: P, diagnostics: D) -> Self {
        Self {
            path: path.into(),
            diagnostics: Arc::new(diagnostics),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the collection, resolving a missing, unreadable or corrupt
    /// source to an empty collection.
    pub async fn load(&self) -> RecordCollection {
        self.try_load().await.unwrap_or_default()
    }

    /// Loads the collection, returning the store error when the source is
    /// missing, unreadable or not valid JSON. A document that decodes to
    /// anything other than an array of objects is still an empty collection.
    pub async fn try_load(&self) -> Result<RecordCollection> {
        match self.read().await {
            Ok(records) => {
                self.diagnostics.report(Event::Loaded {
                    path: self.path.clone(),
                    records: records.len(),
                });
                Ok(records)
            }
            Err(err) => {
                self.diagnostics.report(Event::from(&err));
                Err(err)
            }
        }
    }

    async fn read(&self) -> Result<RecordCollection> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::MissingSource(self.path.clone()));
            }
            Err(err) => {
                // a directory exists but is not a file
                if let Ok(meta) = fs::metadata(&self.path).await {
                    if meta.is_dir() {
                        return Err(Error::MissingSource(self.path.clone()));
                    }
                }
                return Err(Error::ReadFailure {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        let value: Value =
            serde_json::from_slice(&content).map_err(|err| Error::DecodeFailure {
                path: self.path.clone(),
                message: err.to_string(),
            })?;

        match collect(value) {
            Ok(records) => Ok(records),
            Err(found) => {
                self.diagnostics.report(Event::UnexpectedShape {
                    path: self.path.clone(),
                    found,
                });
                Ok(RecordCollection::new())
            }
        }
    }
}

/// Converts a decoded document into records. On a shape mismatch the kind of
/// the offending value is returned.
fn collect(value: Value) -> std::result::Result<RecordCollection, &'static str> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(kind(&other)),
    };

    items
        .iter()
        .map(|item| match item {
            Value::Object(object) => Ok(Record::from_object(object)),
            other => Err(kind(other)),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
