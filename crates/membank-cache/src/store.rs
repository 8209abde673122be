//! Disk-backed template cache with TTL expiry and strict LRU eviction
//!
//! One JSON file per entry, named `<key>.json`, inside a configurable cache
//! directory. An in-memory index mirrors the directory; expired or corrupt
//! files are deleted when encountered and treated as misses. Aggregate
//! counters live in a `stats.json` metadata file rewritten on every
//! structural change.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::entry::CacheEntry;
use crate::error::Result;
use crate::metrics::{CacheReport, CacheStats};

const STATS_FILE: &str = "stats.json";

/// Derive a cache key from the request that produced a payload. Callers are
/// responsible for supplying a description stable enough to produce hits for
/// semantically identical requests.
pub fn generate_key(complexity_level: u8, template_type: &str, description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{complexity_level}:{template_type}:{description}").as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Cache configuration. Constructed once per process and passed to
/// [`TemplateCache::open`] explicitly; there are no implicit global paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding entry files and the metadata file
    pub cache_dir: PathBuf,
    /// Maximum total serialized size of live entries
    pub max_size_bytes: u64,
    /// TTL applied when `put` is called without an explicit TTL
    pub default_ttl_seconds: u64,
}

impl CacheConfig {
    /// Configuration rooted at `cache_dir` with default bounds.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    /// Override the size bound.
    pub fn with_max_size_bytes(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    /// Override the default TTL.
    pub fn with_default_ttl_seconds(mut self, default_ttl_seconds: u64) -> Self {
        self.default_ttl_seconds = default_ttl_seconds;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".template_cache"),
            max_size_bytes: 100 * 1024 * 1024,
            default_ttl_seconds: 86_400,
        }
    }
}

/// On-disk shape of the metadata file.
#[derive(Debug, Serialize, Deserialize)]
struct StatsFile {
    stats: CacheStats,
    entries_by_level: BTreeMap<u8, usize>,
    entries_by_type: BTreeMap<String, usize>,
    updated_at: DateTime<Utc>,
}

/// Whole-cache backup document for export/import.
#[derive(Debug, Serialize, Deserialize)]
struct CacheExport {
    entries: BTreeMap<String, CacheEntry>,
    stats: CacheStats,
    exported_at: DateTime<Utc>,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

enum Lookup {
    Absent,
    Expired,
    Live,
}

/// TTL- and size-bounded key/value store for rendered template payloads.
///
/// The cache exclusively owns its entries; `get` hands back a copy of the
/// payload, never a reference into the internal store. Storage failures are
/// logged and surface as misses, never as errors to the caller.
pub struct TemplateCache {
    config: CacheConfig,
    inner: RwLock<CacheInner>,
}

impl TemplateCache {
    /// Open a cache rooted at the configured directory, loading every
    /// non-expired entry file into the in-memory index. Expired or corrupt
    /// files are deleted during the scan.
    pub async fn open(config: CacheConfig) -> Result<Self> {
        fs::create_dir_all(&config.cache_dir).await?;

        let mut stats = Self::load_stats(&config).await;
        let mut entries = HashMap::new();

        let mut dir = fs::read_dir(&config.cache_dir).await?;
        while let Some(dirent) = dir.next_entry().await? {
            let path = dirent.path();
            let is_entry_file = path.extension().map_or(false, |ext| ext == "json")
                && path.file_name().map_or(false, |n| n != STATS_FILE);
            if !is_entry_file {
                continue;
            }

            let text = match fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable cache entry");
                    continue;
                }
            };

            match serde_json::from_str::<CacheEntry>(&text) {
                Ok(entry) if !entry.is_expired() => {
                    entries.insert(entry.key.clone(), entry);
                }
                Ok(entry) => {
                    debug!(key = %entry.key, "dropping expired cache entry at startup");
                    let _ = fs::remove_file(&path).await;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "deleting corrupt cache entry");
                    let _ = fs::remove_file(&path).await;
                }
            }
        }

        stats.total_entries = entries.len();
        stats.total_size_bytes = entries.values().map(|e| e.size_bytes).sum();

        Ok(Self {
            config,
            inner: RwLock::new(CacheInner { entries, stats }),
        })
    }

    /// Cache configuration in effect.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Fetch a payload copy by key. Misses on absent keys and on entries whose
    /// age exceeds their TTL; expired entries are removed on the read path.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut inner = self.inner.write().await;

        let lookup = match inner.entries.get(key) {
            None => Lookup::Absent,
            Some(entry) if entry.is_expired() => Lookup::Expired,
            Some(_) => Lookup::Live,
        };

        match lookup {
            Lookup::Absent => {
                inner.stats.miss_count += 1;
                None
            }
            Lookup::Expired => {
                debug!(key, "cache entry expired on read");
                self.remove_entry(&mut inner, key).await;
                inner.stats.miss_count += 1;
                self.persist_stats(&inner).await;
                None
            }
            Lookup::Live => {
                let snapshot = match inner.entries.get_mut(key) {
                    Some(entry) => {
                        entry.touch();
                        entry.clone()
                    }
                    None => return None,
                };
                inner.stats.hit_count += 1;
                self.write_entry(&snapshot).await;
                Some(snapshot.payload)
            }
        }
    }

    /// Store a payload under `key`, evicting least-recently-used entries until
    /// it fits the size bound. Returns false when the payload could not be
    /// cached; that is never fatal to the caller.
    pub async fn put(
        &self,
        key: &str,
        payload: serde_json::Value,
        complexity_level: u8,
        template_type: &str,
        ttl_seconds: Option<u64>,
    ) -> bool {
        let size_bytes = match serde_json::to_string(&payload) {
            Ok(serialized) => serialized.len() as u64,
            Err(e) => {
                warn!(key, error = %e, "payload not serializable, skipping cache");
                return false;
            }
        };

        if size_bytes > self.config.max_size_bytes {
            warn!(key, size_bytes, "payload exceeds cache size bound, skipping cache");
            return false;
        }

        let mut inner = self.inner.write().await;

        // Replacing an existing entry is not an eviction.
        if inner.entries.contains_key(key) {
            self.remove_entry(&mut inner, key).await;
        }

        while inner.stats.total_size_bytes + size_bytes > self.config.max_size_bytes {
            let victim = inner
                .entries
                .values()
                .min_by_key(|e| e.last_accessed)
                .map(|e| e.key.clone());
            match victim {
                Some(victim_key) => {
                    debug!(key = %victim_key, "evicting least recently used entry");
                    self.remove_entry(&mut inner, &victim_key).await;
                    inner.stats.eviction_count += 1;
                }
                None => break,
            }
        }

        let ttl = ttl_seconds.unwrap_or(self.config.default_ttl_seconds);
        let entry = CacheEntry::new(key, payload, complexity_level, template_type, size_bytes, ttl);

        if !self.write_entry(&entry).await {
            return false;
        }

        inner.entries.insert(key.to_string(), entry);
        inner.stats.total_entries += 1;
        inner.stats.total_size_bytes += size_bytes;
        self.persist_stats(&inner).await;
        true
    }

    /// Remove one entry. Returns true when the key was present.
    pub async fn invalidate(&self, key: &str) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.entries.contains_key(key) {
            return false;
        }
        self.remove_entry(&mut inner, key).await;
        self.persist_stats(&inner).await;
        true
    }

    /// Remove every entry whose key contains `pattern`. Returns the number of
    /// entries removed.
    pub async fn invalidate_by_pattern(&self, pattern: &str) -> usize {
        let mut inner = self.inner.write().await;
        let matching: Vec<String> = inner
            .entries
            .keys()
            .filter(|k| k.contains(pattern))
            .cloned()
            .collect();
        for key in &matching {
            self.remove_entry(&mut inner, key).await;
        }
        if !matching.is_empty() {
            self.persist_stats(&inner).await;
        }
        matching.len()
    }

    /// Sweep expired entries. Returns the number removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let expired: Vec<String> = inner
            .entries
            .values()
            .filter(|e| e.is_expired_at(now))
            .map(|e| e.key.clone())
            .collect();
        for key in &expired {
            self.remove_entry(&mut inner, key).await;
        }
        inner.stats.last_cleanup = Some(now);
        self.persist_stats(&inner).await;
        expired.len()
    }

    /// Remove all entries. Lookup counters survive; size totals reset.
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let keys: Vec<String> = inner.entries.keys().cloned().collect();
        for key in &keys {
            self.remove_entry(&mut inner, key).await;
        }
        self.persist_stats(&inner).await;
        keys.len()
    }

    /// Snapshot of aggregate counters.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats.clone()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    /// Detailed view: totals, hit rate, entry ages, and breakdowns by
    /// complexity level and template type.
    pub async fn report(&self) -> CacheReport {
        let inner = self.inner.read().await;

        let ages: Vec<i64> = inner
            .entries
            .values()
            .map(|e| e.age().num_seconds())
            .collect();

        let mut entries_by_level = BTreeMap::new();
        let mut entries_by_type = BTreeMap::new();
        for entry in inner.entries.values() {
            *entries_by_level.entry(entry.complexity_level).or_insert(0) += 1;
            *entries_by_type
                .entry(entry.template_type.clone())
                .or_insert(0) += 1;
        }

        CacheReport {
            total_entries: inner.stats.total_entries,
            total_size_bytes: inner.stats.total_size_bytes,
            max_size_bytes: self.config.max_size_bytes,
            hit_rate: inner.stats.hit_rate(),
            oldest_entry_age_seconds: ages.iter().max().copied(),
            newest_entry_age_seconds: ages.iter().min().copied(),
            entries_by_level,
            entries_by_type,
        }
    }

    /// Export every live entry plus the aggregate counters to a single JSON
    /// document, for backup or migration between cache directories.
    pub async fn export(&self, path: impl AsRef<std::path::Path>) -> Result<usize> {
        let inner = self.inner.read().await;
        let export = CacheExport {
            entries: inner
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            stats: inner.stats.clone(),
            exported_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&export)?;
        fs::write(path.as_ref(), json).await?;
        Ok(export.entries.len())
    }

    /// Replace the cache contents with a previously exported document.
    /// Expired entries in the document are skipped. Returns the number of
    /// entries imported.
    pub async fn import(&self, path: impl AsRef<std::path::Path>) -> Result<usize> {
        let text = fs::read_to_string(path.as_ref()).await?;
        let export: CacheExport = serde_json::from_str(&text)?;

        let mut inner = self.inner.write().await;
        let existing: Vec<String> = inner.entries.keys().cloned().collect();
        for key in &existing {
            self.remove_entry(&mut inner, key).await;
        }

        inner.stats = export.stats;
        let mut imported = 0;
        for (key, entry) in export.entries {
            if entry.is_expired() {
                continue;
            }
            if self.write_entry(&entry).await {
                inner.entries.insert(key, entry);
                imported += 1;
            }
        }

        inner.stats.total_entries = inner.entries.len();
        inner.stats.total_size_bytes = inner.entries.values().map(|e| e.size_bytes).sum();
        self.persist_stats(&inner).await;
        Ok(imported)
    }

    // Internal helpers. All take the already-locked index; none re-lock.

    // Filename-safe keys map to themselves; anything else maps to its digest
    // so two distinct keys can never share an entry file.
    fn entry_path(&self, key: &str) -> PathBuf {
        let filename_safe = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        let safe_key = if filename_safe {
            key.to_string()
        } else {
            let mut hasher = Sha256::new();
            hasher.update(key.as_bytes());
            hasher
                .finalize()
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect()
        };
        self.config.cache_dir.join(format!("{safe_key}.json"))
    }

    async fn remove_entry(&self, inner: &mut CacheInner, key: &str) {
        if let Some(entry) = inner.entries.remove(key) {
            inner.stats.total_entries = inner.stats.total_entries.saturating_sub(1);
            inner.stats.total_size_bytes =
                inner.stats.total_size_bytes.saturating_sub(entry.size_bytes);
            let path = self.entry_path(key);
            if let Err(e) = fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(key, error = %e, "failed to delete cache entry file");
                }
            }
        }
    }

    async fn write_entry(&self, entry: &CacheEntry) -> bool {
        let path = self.entry_path(&entry.key);
        let json = match serde_json::to_string_pretty(entry) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %entry.key, error = %e, "failed to serialize cache entry");
                return false;
            }
        };
        match fs::write(&path, json).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %entry.key, error = %e, "failed to write cache entry file");
                false
            }
        }
    }

    async fn persist_stats(&self, inner: &CacheInner) {
        let mut entries_by_level = BTreeMap::new();
        let mut entries_by_type = BTreeMap::new();
        for entry in inner.entries.values() {
            *entries_by_level.entry(entry.complexity_level).or_insert(0) += 1;
            *entries_by_type
                .entry(entry.template_type.clone())
                .or_insert(0usize) += 1;
        }
        let file = StatsFile {
            stats: inner.stats.clone(),
            entries_by_level,
            entries_by_type,
            updated_at: Utc::now(),
        };
        let path = self.config.cache_dir.join(STATS_FILE);
        match serde_json::to_string_pretty(&file) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json).await {
                    warn!(error = %e, "failed to write cache metadata file");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize cache metadata"),
        }
    }

    async fn load_stats(config: &CacheConfig) -> CacheStats {
        let path = config.cache_dir.join(STATS_FILE);
        match fs::read_to_string(&path).await {
            Ok(text) => match serde_json::from_str::<StatsFile>(&text) {
                Ok(file) => file.stats,
                Err(e) => {
                    warn!(error = %e, "ignoring corrupt cache metadata file");
                    CacheStats::default()
                }
            },
            Err(_) => CacheStats::default(),
        }
    }
}
