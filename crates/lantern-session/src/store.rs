//! Request-scoped session store.

use std::ops::{Index, IndexMut};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::id::generate_session_id;
use crate::persistence::SessionGateway;
use crate::record::{SessionData, SessionRecord};
use crate::validate::is_invalid;

static NULL: Value = Value::Null;

/// Session store servicing a single in-flight request.
///
/// Owns the one active [`SessionRecord`] for that request:
/// [`start`](Self::start) loads and validates it (or builds a fresh one),
/// application code reads and writes the payload through the accessors,
/// and [`save`](Self::save) ages the flash data and hands the record to
/// the persistence gateway.
///
/// `start` doubles as the constructor, so a not-yet-started store cannot
/// exist and no accessor needs to guard against one. A store is never
/// shared: each request obtains its own instance, and cross-request
/// coordination on the persisted record is the gateway's concern.
pub struct SessionStore<G: SessionGateway> {
    gateway: G,
    config: StoreConfig,
    session: SessionRecord,
    exists: bool,
}

impl<G: SessionGateway> SessionStore<G> {
    /// Begin a session for one request.
    ///
    /// When `token` names a stored, non-stale record, that record is
    /// adopted verbatim. Otherwise — no token, nothing stored under it,
    /// or the record sat idle past the configured lifetime — a fresh
    /// record with a newly generated id takes its place. Nothing is
    /// written back until [`save`](Self::save).
    ///
    /// # Errors
    /// Gateway retrieval failures propagate unchanged. An invalid or
    /// missing record is not an error.
    pub fn start(gateway: G, config: StoreConfig, token: Option<&str>) -> Result<Self> {
        let retrieved = match token {
            Some(token) if !token.is_empty() => gateway.retrieve(token)?,
            _ => None,
        };

        let usable = !is_invalid(retrieved.as_ref(), config.lifetime, Utc::now());
        let (session, exists) = match retrieved {
            Some(record) if usable => {
                trace!(session_id = %record.id, "adopted session from gateway");
                (record, true)
            }
            _ => {
                let record = SessionRecord::fresh();
                debug!(session_id = %record.id, "created fresh session");
                (record, false)
            }
        };

        Ok(Self {
            gateway,
            config,
            session,
            exists,
        })
    }

    /// Read a value: flash generations first, then the top-level payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.session.data.get(key)
    }

    /// Read a value, falling back to `default` on a miss.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Read a value, producing the default lazily — the producer runs
    /// only on a miss.
    pub fn get_or_else(&self, key: &str, default: impl FnOnce() -> Value) -> Value {
        self.get(key).cloned().unwrap_or_else(default)
    }

    /// Store a value at the top level of the payload.
    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.session.data.insert(key, value);
    }

    /// Whether [`get`](Self::get) would return a value for `key`.
    pub fn has(&self, key: &str) -> bool {
        self.session.data.contains(key)
    }

    /// Remove a top-level value. Flash entries are untouched; they age
    /// out on their own.
    pub fn forget(&mut self, key: &str) {
        self.session.data.remove(key);
    }

    /// Flash a value: readable during this request and the next one only.
    pub fn flash(&mut self, key: impl Into<String>, value: Value) {
        self.session.data.flash.flash(key, value);
    }

    /// Keep everything the previous request flashed visible for one more
    /// request.
    pub fn reflash(&mut self) {
        self.session.data.flash.reflash();
    }

    /// Keep the named previous-request flash values visible for one more
    /// request.
    pub fn keep<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.session.data.flash.keep(keys);
    }

    /// Discard the whole payload, flash generations included. The record
    /// keeps its id and continues to exist.
    pub fn flush(&mut self) {
        self.session.data = SessionData::default();
    }

    /// Give the session a new id, invalidating the old one.
    ///
    /// The payload is preserved, but the record is treated as never
    /// persisted afterward: the next [`save`](Self::save) issues a
    /// create, and a client that knew the previous id can no longer
    /// resume the session.
    pub fn regenerate(&mut self) {
        self.session.id = generate_session_id();
        self.exists = false;
        debug!(session_id = %self.session.id, "regenerated session id");
    }

    /// Age the flash data, stamp the activity time, and hand the record
    /// to the gateway.
    ///
    /// Issues a create for records built during this request (or
    /// regenerated), an update for adopted ones. Gateway failures
    /// propagate unchanged.
    pub fn save(&mut self) -> Result<()> {
        self.session.data.flash.age();
        self.session.last_activity = Some(Utc::now().timestamp());

        if self.exists {
            self.gateway.update(&self.session)?;
        } else {
            self.gateway.create(&self.session)?;
        }
        self.exists = true;

        debug!(session_id = %self.session.id, "saved session");
        Ok(())
    }

    /// Whether the record came from the gateway (or has reached it since).
    pub fn session_exists(&self) -> bool {
        self.exists
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying record.
    pub fn session(&self) -> &SessionRecord {
        &self.session
    }

    /// Replace the underlying record. For test doubles and framework glue.
    pub fn set_session(&mut self, record: SessionRecord) {
        self.session = record;
    }

    /// Consume the store, handing back the gateway and the record.
    pub fn into_parts(self) -> (G, SessionRecord) {
        (self.gateway, self.session)
    }
}

/// Read sugar over [`get`](SessionStore::get): misses resolve to
/// [`Value::Null`], the `serde_json` indexing convention.
impl<G: SessionGateway> Index<&str> for SessionStore<G> {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Write sugar over [`put`](SessionStore::put): indexing a missing key
/// inserts a `Null` top-level slot to assign into.
impl<G: SessionGateway> IndexMut<&str> for SessionStore<G> {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.session.data.entry(key)
    }
}
