//! Cache entry model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One cached, previously rendered template payload.
///
/// Timestamps serialize as ISO-8601 strings; the entry is the exact shape of
/// its on-disk `<key>.json` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Content-derived identifier
    pub key: String,
    /// Rendered template data
    pub payload: serde_json::Value,
    /// Complexity level the payload was generated for
    pub complexity_level: u8,
    /// Template type label
    pub template_type: String,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
    /// When the entry was last read
    pub last_accessed: DateTime<Utc>,
    /// Number of reads since creation
    pub access_count: u64,
    /// Serialized payload size in bytes
    pub size_bytes: u64,
    /// Maximum age before the entry is logically expired
    pub ttl_seconds: u64,
}

impl CacheEntry {
    /// Create a fresh entry; `size_bytes` is the serialized payload size.
    pub fn new(
        key: impl Into<String>,
        payload: serde_json::Value,
        complexity_level: u8,
        template_type: impl Into<String>,
        size_bytes: u64,
        ttl_seconds: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            key: key.into(),
            payload,
            complexity_level,
            template_type: template_type.into(),
            created_at: now,
            last_accessed: now,
            access_count: 1,
            size_bytes,
            ttl_seconds,
        }
    }

    /// The instant at which this entry expires. A TTL too large for timestamp
    /// arithmetic saturates to the far future, so the entry never expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        Duration::try_seconds(ttl)
            .and_then(|d| self.created_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the entry is expired at `now`. A zero-second TTL is always
    /// expired, even on the read immediately following the write.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// Whether the entry is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Age of the entry since creation.
    pub fn age(&self) -> Duration {
        Utc::now() - self.created_at
    }

    /// Record a read: bump the access count and refresh `last_accessed`.
    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
        self.access_count += 1;
    }
}
