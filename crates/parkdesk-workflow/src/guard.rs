// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duplicate-submission guard.
//!
//! A key is held from the moment a submission starts until its guard is
//! dropped, whether the submission succeeded, failed, or was cancelled.

use std::fmt::Display;
use std::sync::Arc;

use dashmap::DashSet;

/// Set of keys with a submission currently waiting on the backend.
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    keys: Arc<DashSet<String>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`, or returns `None` if another submission holds it.
    pub fn try_acquire(&self, key: impl Display) -> Option<InFlightGuard> {
        let key = key.to_string();
        if self.keys.insert(key.clone()) {
            Some(InFlightGuard {
                keys: Arc::clone(&self.keys),
                key,
            })
        } else {
            None
        }
    }

    pub fn is_held(&self, key: impl Display) -> bool {
        self.keys.contains(&key.to_string())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<DashSet<String>>,
    key: String,
}

impl InFlightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_of_same_key_fails() {
        let in_flight = InFlight::new();
        let _guard = in_flight.try_acquire("ABC123").unwrap();
        assert!(in_flight.try_acquire("ABC123").is_none());
        assert!(in_flight.is_held("ABC123"));
    }

    #[test]
    fn distinct_keys_do_not_block_each_other() {
        let in_flight = InFlight::new();
        let _a = in_flight.try_acquire(1u64).unwrap();
        let _b = in_flight.try_acquire(2u64).unwrap();
        assert_eq!(in_flight.len(), 2);
    }

    #[test]
    fn dropping_guard_releases_key() {
        let in_flight = InFlight::new();
        {
            let guard = in_flight.try_acquire("ABC123").unwrap();
            assert_eq!(guard.key(), "ABC123");
        }
        assert!(in_flight.is_empty());
        assert!(in_flight.try_acquire("ABC123").is_some());
    }
}
