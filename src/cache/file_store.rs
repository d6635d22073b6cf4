use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cache::store::ObjectStore;
use crate::cache::ttl::CacheTtl;
use crate::helpers::time::{from_system_time, now_utc};
use crate::utils::constants::{STORE_VERSION, VERSION_SENTINEL};

/// Disk-backed store: one file per entry, named `<prefix>-<key>.<suffix>`.
///
/// The prefix scopes `clear()` to this store's own entries, so several
/// stores can share one location. A `version` sentinel file guards cached
/// payloads across deployments: a mismatch at construction wipes the
/// namespace once, before any entry is trusted.
pub struct FileStore {
    location: PathBuf,
    prefix: String,
    suffix: &'static str,
    ttl: CacheTtl,
}

impl FileStore {
    pub fn new(
        location: impl Into<PathBuf>,
        prefix: &str,
        suffix: &'static str,
        ttl: CacheTtl,
    ) -> Self {
        let store = Self {
            location: location.into(),
            prefix: prefix.to_owned(),
            suffix,
            ttl,
        };
        store.check_version();
        store
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.location
            .join(format!("{}-{}.{}", self.prefix, key, self.suffix))
    }

    /// Create the backing directory if missing. Deferred until the first
    /// write, so a read-only consumer never touches the filesystem.
    fn ensure_location(&self) -> io::Result<()> {
        if self.location.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.location)
    }

    /// Entry age check against the configured TTL. `created_at` is the
    /// file's modification time, set by the write that produced it.
    fn expired(&self, path: &Path) -> bool {
        if self.ttl.is_unbounded() {
            return false;
        }
        let created_at = match fs::metadata(path).and_then(|meta| meta.modified()) {
            Ok(modified) => from_system_time(modified),
            // unreadable entry: let the read path report absence
            Err(_) => return false,
        };
        self.ttl.expired(created_at, now_utc())
    }

    /// Compare the on-disk sentinel against this build's version string;
    /// on mismatch wipe the namespace and rewrite the sentinel. Runs once
    /// per store lifetime, at construction.
    fn check_version(&self) {
        let sentinel = self.location.join(VERSION_SENTINEL);
        match fs::read_to_string(&sentinel) {
            Ok(version) if version == STORE_VERSION => return,
            Ok(version) => info!(
                "cache version '{}' does not match '{}', invalidating namespace '{}'",
                version.trim(),
                STORE_VERSION,
                self.prefix
            ),
            Err(err) => debug!("no readable version sentinel at {:?}: {}", sentinel, err),
        }
        self.clear();
        if let Err(err) = self
            .ensure_location()
            .and_then(|_| fs::write(&sentinel, STORE_VERSION))
        {
            debug!("version sentinel write failed: {}", err);
        }
    }
}

impl ObjectStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(key);
        if self.expired(&path) {
            debug!("cache entry {:?} expired, purged", path);
            let _ = fs::remove_file(&path);
            return None;
        }
        fs::read(&path).ok()
    }

    fn put(&self, key: &str, payload: Vec<u8>) -> Vec<u8> {
        let path = self.entry_path(key);
        if let Err(err) = self
            .ensure_location()
            .and_then(|_| fs::write(&path, &payload))
        {
            // cache writes are best-effort, the caller keeps its payload
            debug!("cache write {:?} failed: {}", path, err);
        }
        payload
    }

    fn purge(&self, key: &str) {
        let _ = fs::remove_file(self.entry_path(key));
    }

    fn clear(&self) {
        let scoped = format!("{}-", self.prefix);
        let entries = match fs::read_dir(&self.location) {
            Ok(entries) => entries,
            Err(_) => return,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let in_namespace = entry
                .file_name()
                .to_str()
                .map(|name| name.starts_with(&scoped))
                .unwrap_or(false);
            if in_namespace {
                debug!("cache clear removes {:?}", path);
                let _ = fs::remove_file(&path);
            }
        }
    }
}
