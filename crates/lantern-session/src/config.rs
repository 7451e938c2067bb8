//! Configuration for the session store.

use std::time::Duration;

/// Default maximum idle lifetime before a retrieved session is stale.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(120 * 60);

/// Configuration for a [`SessionStore`](crate::SessionStore).
///
/// The lifetime is resolved by the caller (framework config, environment,
/// whatever applies); the store only consumes the final value.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum idle age of a retrieved record. Records whose last
    /// activity is further in the past are replaced with a fresh session.
    pub lifetime: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lifetime: DEFAULT_LIFETIME,
        }
    }
}

impl StoreConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum idle lifetime.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}
