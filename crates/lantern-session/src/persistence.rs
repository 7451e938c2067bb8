//! Persistence gateway: the seam between the store and session storage.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::Result;
use crate::record::SessionRecord;

/// Capability set a storage backend must provide.
///
/// The store issues a single retrieve when a request starts and a single
/// create or update when it ends. Everything else — connection handling,
/// expiry sweeps, cross-request concurrency control — is the backend's
/// business. Failures are surfaced to the caller unchanged; the store
/// never retries or falls back silently.
pub trait SessionGateway {
    /// Load the record identified by `id`.
    ///
    /// Return `Ok(None)` when no record exists under this id.
    fn retrieve(&self, id: &str) -> Result<Option<SessionRecord>>;

    /// Persist a record that has never been stored before.
    fn create(&self, record: &SessionRecord) -> Result<()>;

    /// Overwrite the stored copy of an existing record.
    fn update(&self, record: &SessionRecord) -> Result<()>;
}

impl<G: SessionGateway + ?Sized> SessionGateway for &G {
    fn retrieve(&self, id: &str) -> Result<Option<SessionRecord>> {
        (**self).retrieve(id)
    }

    fn create(&self, record: &SessionRecord) -> Result<()> {
        (**self).create(record)
    }

    fn update(&self, record: &SessionRecord) -> Result<()> {
        (**self).update(record)
    }
}

/// In-memory gateway backed by a JSON-encoded map.
///
/// Records round-trip through their serialized form, the same as they
/// would against a real backend. Intended for tests and single-process
/// setups.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl SessionGateway for MemoryGateway {
    fn retrieve(&self, id: &str) -> Result<Option<SessionRecord>> {
        match self.records.lock().get(id) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn create(&self, record: &SessionRecord) -> Result<()> {
        let raw = serde_json::to_string(record)?;
        self.records.lock().insert(record.id.clone(), raw);
        Ok(())
    }

    // A map backend makes no create/update distinction; last write wins.
    fn update(&self, record: &SessionRecord) -> Result<()> {
        self.create(record)
    }
}
