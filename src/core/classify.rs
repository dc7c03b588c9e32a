//! A cheap, language-agnostic structural-diff heuristic that labels a
//! write `Refactor` or `Evolution`.
//!
//! This is deliberately not an AST diff: function/class/import sets are
//! pulled out with regexes, the way the teacher's `core::gatekeeper` pulls
//! dangerous-pattern matches out of source text with a fixed regex table
//! rather than a parser.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::sync::LazyLock;

/// `Refactor`/`Evolution` on a Rust call site, but `AST_REFACTOR` /
/// `INTENT_EVOLUTION` on the wire — a custom (de)serializer keeps the two
/// vocabularies straight without a `#[serde(rename)]` per variant fighting
/// the natural Rust-side enum name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationClass {
    /// Structure preserved.
    Refactor,
    /// Structure changed.
    Evolution,
}

impl MutationClass {
    pub fn wire_name(self) -> &'static str {
        match self {
            MutationClass::Refactor => "AST_REFACTOR",
            MutationClass::Evolution => "INTENT_EVOLUTION",
        }
    }

    pub fn from_wire_name(s: &str) -> Option<Self> {
        match s {
            "AST_REFACTOR" => Some(MutationClass::Refactor),
            "INTENT_EVOLUTION" => Some(MutationClass::Evolution),
            _ => None,
        }
    }
}

impl Serialize for MutationClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for MutationClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MutationClass::from_wire_name(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown mutation_class: {}", s)))
    }
}

static FUNC_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:export\s+)?(?:async\s+)?(?:pub(?:\([^)]*\))?\s+)?(?:fn|function|def)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

static CLASS_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:export\s+)?(?:pub(?:\([^)]*\))?\s+)?(?:class|struct|interface|trait)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:import\s+.*?from\s+['"]([^'"]+)['"]|import\s+['"]([^'"]+)['"]|use\s+([A-Za-z0-9_:]+)|from\s+([A-Za-z0-9_.]+)\s+import)"#).unwrap()
});

fn extract_set(re: &Regex, content: &str, group: usize) -> HashSet<String> {
    re.captures_iter(content)
        .filter_map(|c| c.get(group).map(|m| m.as_str().to_string()))
        .collect()
}

fn function_names(content: &str) -> HashSet<String> {
    extract_set(&FUNC_NAME_RE, content, 1)
}

fn class_names(content: &str) -> HashSet<String> {
    extract_set(&CLASS_NAME_RE, content, 1)
}

fn import_specifiers(content: &str) -> HashSet<String> {
    IMPORT_RE
        .captures_iter(content)
        .filter_map(|c| (1..=4).find_map(|i| c.get(i)).map(|m| m.as_str().to_string()))
        .collect()
}

/// Jaccard similarity of two sets; an empty/undefined pair of sets is
/// treated as fully similar rather than fully dissimilar.
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 { 1.0 } else { intersection as f64 / union as f64 }
}

fn content_change_ratio(old: &str, new: &str) -> f64 {
    let old_lines: Vec<&str> = old.lines().map(|l| l.trim()).collect();
    let new_lines: Vec<&str> = new.lines().map(|l| l.trim()).collect();
    let max_len = old_lines.len().max(new_lines.len());
    if max_len == 0 {
        return 0.0;
    }
    let differing = (0..max_len)
        .filter(|&i| old_lines.get(i) != new_lines.get(i))
        .count();
    differing as f64 / max_len as f64
}

/// Classify a write. `old_content` absent means a new file. `hint` is the
/// agent's own declared class, consulted only as a last resort once every
/// other signal is inconclusive.
pub fn classify(
    old_content: Option<&str>,
    new_content: &str,
    hint: Option<MutationClass>,
) -> MutationClass {
    let old = match old_content {
        None => return MutationClass::Evolution, // new file
        Some(old) => old,
    };

    if old == new_content {
        return MutationClass::Refactor; // no-op write
    }

    let old_funcs = function_names(old);
    let new_funcs = function_names(new_content);
    let old_classes = class_names(old);
    let new_classes = class_names(new_content);
    let old_imports = import_specifiers(old);
    let new_imports = import_specifiers(new_content);

    let s_funcs = jaccard(&old_funcs, &new_funcs);
    let s_classes = jaccard(&old_classes, &new_classes);
    let s_imports = jaccard(&old_imports, &new_imports);
    let similarity = 0.4 * s_funcs + 0.4 * s_classes + 0.2 * s_imports;

    let change_ratio = content_change_ratio(old, new_content);

    if similarity > 0.8 && change_ratio < 0.3 {
        return MutationClass::Refactor; // structure intact, little text moved
    }

    let func_changed = old_funcs.symmetric_difference(&new_funcs).next().is_some();
    let class_changed = old_classes.symmetric_difference(&new_classes).next().is_some();
    if func_changed || class_changed {
        return MutationClass::Evolution; // a function or class appeared/vanished
    }

    let old_line_count = old.lines().count().max(1);
    let delta_lines = (new_content.lines().count() as i64 - old.lines().count() as i64).abs();
    if delta_lines as f64 / old_line_count as f64 > 0.2 || delta_lines > 50 {
        return MutationClass::Evolution; // line count moved too much
    }

    if similarity < 0.5 {
        return MutationClass::Evolution; // structural sets diverged too far
    }

    if change_ratio > 0.5 {
        return MutationClass::Evolution; // most lines differ even if structure matches
    }

    // Ambiguous: defer to the agent's declared class if the signals are
    // at least leaning toward a refactor; otherwise default to refactor.
    if let Some(hint) = hint {
        if similarity > 0.6 && change_ratio < 0.4 {
            return hint;
        }
    }
    MutationClass::Refactor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_file_is_evolution() {
        assert_eq!(classify(None, "fn foo() {}", None), MutationClass::Evolution);
    }

    #[test]
    fn identical_content_is_refactor() {
        let src = "fn foo() {\n    1\n}\n";
        assert_eq!(classify(Some(src), src, None), MutationClass::Refactor);
    }

    #[test]
    fn idempotence_of_classification() {
        let src = "fn foo() { bar(); }\nfn baz() {}\n";
        assert_eq!(classify(Some(src), src, Some(MutationClass::Evolution)), MutationClass::Refactor);
    }

    #[test]
    fn whitespace_only_rename_is_refactor() {
        // Same function, one line change, nothing added/removed.
        let old = "fn foo() {\n    let x = 1;\n    x\n}\n";
        let new = "fn foo() {\n    let   x = 1;\n    x\n}\n";
        assert_eq!(classify(Some(old), new, None), MutationClass::Refactor);
    }

    #[test]
    fn adding_a_function_is_evolution() {
        // One function becomes two.
        let old = "fn foo() {\n    1\n}\n";
        let new = "fn foo() {\n    1\n}\n\nfn bar() {\n    2\n}\n";
        assert_eq!(classify(Some(old), new, None), MutationClass::Evolution);
    }

    #[test]
    fn removing_a_function_is_evolution() {
        let old = "fn foo() {}\nfn bar() {}\n";
        let new = "fn foo() {}\n";
        assert_eq!(classify(Some(old), new, None), MutationClass::Evolution);
    }

    #[test]
    fn large_line_delta_is_evolution() {
        let old = "fn foo() {}\n";
        let new_lines: Vec<String> = (0..80).map(|i| format!("// line {}", i)).collect();
        let new = format!("fn foo() {{}}\n{}\n", new_lines.join("\n"));
        assert_eq!(classify(Some(old), &new, None), MutationClass::Evolution);
    }

    #[test]
    fn wire_names_round_trip() {
        assert_eq!(MutationClass::from_wire_name(MutationClass::Refactor.wire_name()), Some(MutationClass::Refactor));
        assert_eq!(MutationClass::from_wire_name(MutationClass::Evolution.wire_name()), Some(MutationClass::Evolution));
        assert_eq!(MutationClass::from_wire_name("garbage"), None);
    }
}
