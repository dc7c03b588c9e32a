//! Append-only JSON-line writer with directory creation, plus the
//! `TraceRecord` wire type.
//!
//! Grounded directly in the teacher's `core::trace::append_trace`: open
//! with `create(true).append(true)`, `writeln!` one JSON object, never
//! rewrite or truncate.

use crate::core::classify::MutationClass;
use crate::core::error::GateError;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::Path;

/// VCS context attached to a trace record when a probe succeeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VcsContext {
    pub revision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// A content-hash pair. `ranges.content_hash` exists for future spatial
/// indexing and must stay identical to the record's top-level
/// `content_hash` today.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ranges {
    pub content_hash: String,
}

/// One immutable append-only ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceRecord {
    pub req_id: String,
    pub intent_id: String,
    pub file: String,
    pub timestamp: String,
    pub mutation_class: MutationClass,
    pub content_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_identifier: Option<String>,
    pub related: Vec<String>,
    pub ranges: Ranges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs: Option<VcsContext>,
}

impl TraceRecord {
    /// Build a record with `ranges.content_hash` pinned equal to
    /// `content_hash`.
    pub fn new(
        req_id: String,
        intent_id: String,
        file: String,
        timestamp: String,
        mutation_class: MutationClass,
        content_hash: String,
        model_identifier: Option<String>,
        vcs: Option<VcsContext>,
    ) -> Self {
        let ranges = Ranges { content_hash: content_hash.clone() };
        Self {
            related: vec![req_id.clone()],
            req_id,
            intent_id,
            file,
            timestamp,
            mutation_class,
            content_hash,
            model_identifier,
            ranges,
            vcs,
        }
    }
}

fn ledger_path(workspace_root: &Path) -> std::path::PathBuf {
    workspace_root.join(".orchestration").join("agent_trace.jsonl")
}

/// Append `record` as one canonical JSON line. Creates
/// `.orchestration/` if absent. Never rewrites or compacts existing lines.
pub fn append(workspace_root: &Path, record: &TraceRecord) -> Result<(), GateError> {
    let path = ledger_path(workspace_root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    let json = serde_json::to_string(record)?;
    writeln!(file, "{}", json)?;
    Ok(())
}

/// Read every well-formed record in the ledger. Malformed lines are
/// skipped with a diagnostic. A missing ledger file yields an empty list,
/// not an error.
pub fn read_all(workspace_root: &Path) -> Vec<TraceRecord> {
    let path = ledger_path(workspace_root);
    let file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };

    std::io::BufReader::new(file)
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.ok()?;
            if line.trim().is_empty() {
                return None;
            }
            match serde_json::from_str::<TraceRecord>(&line) {
                Ok(record) => Some(record),
                Err(e) => {
                    eprintln!("warning: skipping malformed trace record at line {}: {}", idx + 1, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(req_id: &str, intent_id: &str) -> TraceRecord {
        TraceRecord::new(
            req_id.to_string(),
            intent_id.to_string(),
            "src/a.ts".to_string(),
            "2025-01-15T10:30:00.000Z".to_string(),
            MutationClass::Evolution,
            "ab".repeat(32),
            None,
            None,
        )
    }

    #[test]
    fn mutation_class_serializes_to_documented_wire_name() {
        let record = sample("t-1", "INT-1");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"mutation_class\":\"INTENT_EVOLUTION\""));
    }

    #[test]
    fn content_hash_equals_ranges_content_hash() {
        let record = sample("t-1", "INT-1");
        assert_eq!(record.content_hash, record.ranges.content_hash);
    }

    #[test]
    fn append_creates_parent_directory() {
        let dir = tempdir().unwrap();
        assert!(!dir.path().join(".orchestration").exists());
        append(dir.path(), &sample("t-1", "INT-1")).unwrap();
        assert!(dir.path().join(".orchestration").join("agent_trace.jsonl").exists());
    }

    #[test]
    fn append_is_line_delimited_and_parseable() {
        let dir = tempdir().unwrap();
        append(dir.path(), &sample("t-1", "INT-1")).unwrap();
        append(dir.path(), &sample("t-2", "INT-1")).unwrap();
        let records = read_all(dir.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].req_id, "t-1");
        assert_eq!(records[1].req_id, "t-2");
    }

    #[test]
    fn missing_ledger_yields_empty_list() {
        let dir = tempdir().unwrap();
        assert!(read_all(dir.path()).is_empty());
    }

    #[test]
    fn malformed_line_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".orchestration").join("agent_trace.jsonl");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json\n").unwrap();
        append(dir.path(), &sample("t-1", "INT-1")).unwrap();
        let records = read_all(dir.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].req_id, "t-1");
    }

    #[test]
    fn never_rewrites_prior_lines() {
        let dir = tempdir().unwrap();
        append(dir.path(), &sample("t-1", "INT-1")).unwrap();
        let path = dir.path().join(".orchestration").join("agent_trace.jsonl");
        let before = std::fs::read_to_string(&path).unwrap();
        append(dir.path(), &sample("t-2", "INT-1")).unwrap();
        let after = std::fs::read_to_string(&path).unwrap();
        assert!(after.starts_with(&before));
    }
}
