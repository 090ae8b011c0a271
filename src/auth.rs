//! API key issuance and validation.
//!
//! Keys are opaque 128-bit hex strings valid for 30 minutes. Expiry is
//! enforced lazily: every validation call first sweeps strictly-expired
//! keys from the active set. There is no background timer; an expired key
//! only disappears from storage the next time any validation runs, but it
//! is never accepted either way.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::rngs::OsRng;
use rand::RngCore;

/// Each key is valid for 30 minutes from issuance.
const KEY_EXPIRATION_MINUTES: i64 = 30;

/// A freshly issued key and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedKey {
    pub api_key: String,
    pub expires_at: DateTime<Utc>,
}

/// Active key set. Issuance is unlimited and never invalidates other keys;
/// keys are only ever removed by the sweep.
#[derive(Default)]
pub struct TokenAuthority {
    active: DashMap<String, DateTime<Utc>>,
}

impl TokenAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new key expiring 30 minutes from now.
    pub fn issue(&self) -> IssuedKey {
        self.issue_at(Utc::now())
    }

    /// Sweep expired keys, then check `key` against the active set.
    pub fn validate(&self, key: &str) -> bool {
        self.validate_at(key, Utc::now())
    }

    /// Number of keys currently stored, including any expired keys that no
    /// validation call has swept yet.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    fn issue_at(&self, now: DateTime<Utc>) -> IssuedKey {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        let api_key = hex::encode(bytes);
        let expires_at = now + Duration::minutes(KEY_EXPIRATION_MINUTES);
        self.active.insert(api_key.clone(), expires_at);
        tracing::debug!("issued API key ({} active)", self.active.len());
        IssuedKey { api_key, expires_at }
    }

    fn validate_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.sweep(now);
        self.active.contains_key(key)
    }

    /// Drop every key whose expiry is strictly in the past. A key expiring
    /// exactly at `now` survives.
    fn sweep(&self, now: DateTime<Utc>) {
        self.active.retain(|_, expires_at| *expires_at >= now);
    }
}
