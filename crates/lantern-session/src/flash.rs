//! Two-generation flash data buffer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Double-buffered flash storage inside a session payload.
///
/// A value flashed during one request stays readable for that request and
/// the next one, then disappears. Instead of timestamping each key, the
/// buffer holds two generations: `new` collects writes from the current
/// request, `old` holds what the previous request wrote. [`age`](Self::age)
/// shifts the generations — it is the only place they move, and it runs
/// once per request at save time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashBuffer {
    /// Values flashed during the previous request, readable this request.
    #[serde(default)]
    pub(crate) old: Map<String, Value>,

    /// Values flashed during this request, also readable next request.
    #[serde(default)]
    pub(crate) new: Map<String, Value>,
}

impl FlashBuffer {
    /// Look up a flashed value, checking `new` before `old` so that
    /// values written this request are immediately visible.
    pub fn read(&self, key: &str) -> Option<&Value> {
        self.new.get(key).or_else(|| self.old.get(key))
    }

    /// Whether either generation holds `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.new.contains_key(key) || self.old.contains_key(key)
    }

    /// Flash a value into the current generation.
    pub fn flash(&mut self, key: impl Into<String>, value: Value) {
        self.new.insert(key.into(), value);
    }

    /// Copy every previous-generation entry forward, extending the
    /// visibility of all currently flashed values by one more request.
    pub fn reflash(&mut self) {
        self.new.extend(self.old.clone());
    }

    /// Copy only the named previous-generation entries forward.
    pub fn keep<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if let Some(value) = self.old.get(key) {
                self.new.insert(key.to_string(), value.clone());
            }
        }
    }

    /// Shift the generations: the current one becomes the previous one,
    /// and a new empty generation starts collecting writes.
    ///
    /// Must run exactly once per request, after application code is done
    /// mutating the session.
    pub fn age(&mut self) {
        self.old = std::mem::take(&mut self.new);
    }

    /// Drop both generations.
    pub fn clear(&mut self) {
        self.old.clear();
        self.new.clear();
    }

    /// Whether both generations are empty.
    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }
}
