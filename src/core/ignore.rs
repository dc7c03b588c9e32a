//! mtime-invalidated cache of the disabled-intent list backed by
//! `<workspace_root>/.intentignore`.
//!
//! One bare intent id per line; `#`-prefixed lines and blank lines are
//! dropped. A missing file is an empty list, never an error. The cache is
//! per-process and keyed on `(workspace_root, mtime)`, mirroring the
//! teacher's in-process caching style (`core::pool`'s connection reuse).

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

struct CacheEntry {
    mtime: Option<SystemTime>,
    ids: Vec<String>,
}

static CACHE: Mutex<Option<FxHashMap<PathBuf, CacheEntry>>> = Mutex::new(None);

fn ignore_file(workspace_root: &Path) -> PathBuf {
    workspace_root.join(".intentignore")
}

fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

/// Is `intent_id` disabled for this workspace? Refreshes the cache when the
/// backing file's mtime has changed since the last read.
pub fn is_ignored(workspace_root: &Path, intent_id: &str) -> bool {
    let path = ignore_file(workspace_root);
    let current_mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();

    let mut guard = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    let map = guard.get_or_insert_with(FxHashMap::default);

    let needs_refresh = match map.get(&path) {
        Some(entry) => entry.mtime != current_mtime,
        None => true,
    };

    if needs_refresh {
        let ids = std::fs::read_to_string(&path)
            .map(|content| parse(&content))
            .unwrap_or_default();
        map.insert(
            path.clone(),
            CacheEntry {
                mtime: current_mtime,
                ids,
            },
        );
    }

    map.get(&path)
        .map(|entry| entry.ids.iter().any(|id| id == intent_id))
        .unwrap_or(false)
}
