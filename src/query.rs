use std::sync::Arc;

use crate::diagnostics::{Diagnostics, Event};
use crate::store::{self, Record, RecordCollection, RecordStore};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("record not found")]
    NotFound,
    #[error("user and password are required")]
    InvalidInput,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("record store is unavailable: {0}")]
    StoreUnavailable(#[from] store::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// QueryService answers lookups and credential checks. The collection is
/// loaded from the store on every call.
#[derive(Clone)]
pub struct QueryService {
    store: RecordStore,
    diagnostics: Arc<dyn Diagnostics>,
}

impl QueryService {
    pub fn new<D: Diagnostics>(store: RecordStore, diagnostics: D) -> Self {
        Self {
            store,
            diagnostics: Arc::new(diagnostics),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// First record whose `name` matches, ignoring ASCII case.
    pub async fn find_by_name(&self, name: &str) -> Result<Record> {
        self.find(name, |record| record.name.as_deref()).await
    }

    /// First record whose `user` matches, ignoring ASCII case.
    pub async fn find_by_user(&self, user: &str) -> Result<Record> {
        self.find(user, |record| record.user.as_deref()).await
    }

    pub async fn list_all(&self) -> RecordCollection {
        self.store.load().await
    }

    /// Checks a user and plaintext password against the store and returns the
    /// first record matching both exactly.
    ///
    /// An unknown user and a wrong password both end in
    /// [`Error::InvalidCredentials`]. A store that cannot be loaded ends in
    /// [`Error::StoreUnavailable`].
    pub async fn authenticate(&self, user: &str, password: &str) -> Result<Record> {
        if user.is_empty() || password.is_empty() {
            return Err(Error::InvalidInput);
        }

        let records = self.store.try_load().await?;

        let mut known = false;
        for record in records {
            if record.user.as_deref() != Some(user) {
                continue;
            }
            if record.pw.as_deref() == Some(password) {
                self.diagnostics.report(Event::Authenticated { user: user.into() });
                return Ok(record);
            }
            known = true;
        }

        let event = if known {
            Event::PasswordMismatch { user: user.into() }
        } else {
            Event::UnknownUser { user: user.into() }
        };
        self.diagnostics.report(event);

        Err(Error::InvalidCredentials)
    }

    async fn find<F>(&self, needle: &str, key: F) -> Result<Record>
    where
        F: Fn(&Record) -> Option<&str>,
    {
        self.store
            .load()
            .await
            .into_iter()
            .find(|record| key(record).map_or(false, |value| value.eq_ignore_ascii_case(needle)))
            .ok_or(Error::NotFound)
    }
}
