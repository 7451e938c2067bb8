//! Request-scoped session state with flash data support.
//!
//! This crate loads the session record named by a client-supplied token,
//! validates it, exposes its key-value payload for the lifetime of one
//! request, and hands the record back to a persistence gateway when the
//! request ends:
//! - token validation and expiry, with fresh-session fallback
//! - double-buffered "flash" data that survives exactly one extra request
//! - session-id regeneration against fixation attacks
//! - a pluggable retrieve/create/update persistence seam
//!
//! # Example
//!
//! ```rust
//! use lantern_session::{MemoryGateway, SessionStore, StoreConfig};
//! use serde_json::json;
//!
//! # fn main() -> lantern_session::Result<()> {
//! let gateway = MemoryGateway::new();
//!
//! let mut store = SessionStore::start(&gateway, StoreConfig::default(), None)?;
//! store.put("user_id", json!(42));
//! store.flash("status", json!("profile saved"));
//! store.save()?;
//!
//! let token = store.session().id.clone();
//! let next = SessionStore::start(&gateway, StoreConfig::default(), Some(&token))?;
//! assert_eq!(next.get("status"), Some(&json!("profile saved")));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod flash;
mod id;
mod persistence;
mod record;
mod store;
mod validate;

pub use config::{DEFAULT_LIFETIME, StoreConfig};
pub use error::{Error, Result};
pub use flash::FlashBuffer;
pub use id::{SESSION_ID_LEN, generate_session_id};
pub use persistence::{MemoryGateway, SessionGateway};
pub use record::{SessionData, SessionRecord};
pub use store::SessionStore;
pub use validate::is_invalid;
