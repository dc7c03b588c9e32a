//! Canonical error type for infrastructure faults.
//!
//! `GateError` covers infrastructure faults: I/O, manifest parsing,
//! ledger writes, VCS probe plumbing. Policy denials are never
//! represented here — they travel as `ToolError` payloads on the tool's
//! own result channel, so a denial never looks like a crash to the
//! caller.

use std::io;
use thiserror::Error;

/// Infrastructure-level error. Every variant here is a fault to log and
/// fall open on, never a reason to deny a tool call outright.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("manifest parse error: {0}")]
    ManifestParse(#[from] serde_yaml::Error),

    #[error("ledger record error: {0}")]
    LedgerRecord(#[from] serde_json::Error),

    #[error("path error: {0}")]
    Path(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("hook fault: {0}")]
    Hook(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_error_display() {
        let err = GateError::Path("escapes workspace root".to_string());
        assert_eq!(format!("{}", err), "path error: escapes workspace root");
    }

    #[test]
    fn not_found_display() {
        let err = GateError::NotFound("INT-999".to_string());
        assert_eq!(format!("{}", err), "not found: INT-999");
    }
}
