//! Path-prefix / suffix-wildcard containment check.
//!
//! Grounded in the teacher's `core::gatekeeper` glob matching (block-path
//! enforcement), simplified down to one rule: no general glob engine, just
//! a trailing `/*` or `/**` suffix strip.

/// Normalize a path to forward slashes, the wire format used everywhere in
/// the trace ledger and manifest.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Strip a trailing `/*` or `/**` from a single scope pattern, yielding the
/// base path the pattern actually constrains.
fn base_of(pattern: &str) -> &str {
    if let Some(stripped) = pattern.strip_suffix("/**") {
        stripped
    } else if let Some(stripped) = pattern.strip_suffix("/*") {
        stripped
    } else {
        pattern
    }
}

/// Is `relative_path` within any pattern in `owned_scope`?
///
/// An empty `owned_scope` means "no constraint declared" — callers must
/// treat that as "skip the check", not "deny all" (see DESIGN.md).
pub fn is_within(relative_path: &str, owned_scope: &[String]) -> bool {
    if owned_scope.is_empty() {
        return true;
    }

    let path = normalize(relative_path);

    owned_scope.iter().any(|pattern| {
        let normalized_pattern = normalize(pattern);
        let base = base_of(&normalized_pattern);
        if base.is_empty() {
            return false;
        }
        path == base || path.starts_with(&format!("{}/", base))
    })
}
