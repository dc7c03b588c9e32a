//! Per-task map of read-time content fingerprints, the basis of the
//! optimistic lock.
//!
//! Scoped to one task's lifetime (owned by [`crate::core::task::Task`]),
//! empty at task start, cleared at task end — never a process-wide cache
//! like the ignore-list cache.

use crate::core::hash;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct HashTracker {
    snapshot: FxHashMap<String, String>,
}

impl HashTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the fingerprint of `content` as the last-observed state of
    /// `path`. Call on every read *and* every successful write.
    pub fn store(&mut self, path: &str, content: &str) {
        self.snapshot.insert(path.to_string(), hash::hash(content));
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.snapshot.get(path).map(|s| s.as_str())
    }

    /// Has `path` changed since the last recorded read/write? A path with
    /// no prior hash is deliberately "unchanged" — first writes to a file
    /// this task has never touched must never be blocked.
    pub fn unchanged(&self, path: &str, current_content: &str) -> bool {
        match self.snapshot.get(path) {
            None => true,
            Some(prior) => *prior == hash::hash(current_content),
        }
    }

    pub fn clear(&mut self, path: &str) {
        self.snapshot.remove(path);
    }

    pub fn clear_all(&mut self) {
        self.snapshot.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_path_is_unchanged() {
        let tracker = HashTracker::new();
        assert!(tracker.unchanged("src/a.ts", "anything"));
    }

    #[test]
    fn matching_content_is_unchanged() {
        let mut tracker = HashTracker::new();
        tracker.store("src/a.ts", "v1");
        assert!(tracker.unchanged("src/a.ts", "v1"));
    }

    #[test]
    fn diverged_content_is_stale() {
        let mut tracker = HashTracker::new();
        tracker.store("src/a.ts", "v1");
        assert!(!tracker.unchanged("src/a.ts", "v2"));
    }

    #[test]
    fn clear_forgets_single_path() {
        let mut tracker = HashTracker::new();
        tracker.store("src/a.ts", "v1");
        tracker.clear("src/a.ts");
        assert!(tracker.get("src/a.ts").is_none());
        assert!(tracker.unchanged("src/a.ts", "anything"));
    }

    #[test]
    fn clear_all_empties_snapshot() {
        let mut tracker = HashTracker::new();
        tracker.store("a", "1");
        tracker.store("b", "2");
        tracker.clear_all();
        assert!(tracker.get("a").is_none());
        assert!(tracker.get("b").is_none());
    }
}
