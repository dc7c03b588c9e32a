//! Parses the intent manifest and prior ledger, producing a per-intent
//! context view rendered for the agent's prompt.
//!
//! The manifest is read fresh on every call — no long-lived cache, since
//! it may be edited mid-session — unlike the mtime-cached ignore list.
//! Missing files degrade silently to "no constraint" / "no history",
//! matching the teacher's own tolerance for absent optional config
//! (`core::workspace`'s Dockerfile probing, `core::trace`'s
//! missing-ledger-is-empty-list behavior).

use crate::core::ledger::{self, TraceRecord};
use serde::Deserialize;
use std::path::Path;

/// One entry in `.orchestration/active_intents.yaml`.
#[derive(Debug, Clone, Deserialize)]
struct ManifestEntry {
    #[serde(alias = "intent_id")]
    id: String,
    constraints: Option<String>,
    scope: Option<String>,
    #[serde(alias = "ownedScope", default)]
    owned_scope: Option<OwnedScope>,
}

/// `owned_scope` may be written as a single string or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OwnedScope {
    One(String),
    Many(Vec<String>),
}

impl OwnedScope {
    fn into_vec(self) -> Vec<String> {
        match self {
            OwnedScope::One(s) => vec![s],
            OwnedScope::Many(v) => v,
        }
    }
}

/// The manifest may be a bare list, or `{intents: [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Manifest {
    List(Vec<ManifestEntry>),
    Wrapped { intents: Vec<ManifestEntry> },
}

impl Manifest {
    fn entries(self) -> Vec<ManifestEntry> {
        match self {
            Manifest::List(entries) => entries,
            Manifest::Wrapped { intents } => intents,
        }
    }
}

/// A declared, enforceable unit of agent work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub id: String,
    pub constraints: Option<String>,
    pub scope: Option<String>,
    pub owned_scope: Vec<String>,
}

/// Derived, ephemeral view handed to the agent.
#[derive(Debug, Clone)]
pub struct ContextView {
    pub intent_id: String,
    pub constraints: Option<String>,
    pub scope: Option<String>,
    pub owned_scope: Vec<String>,
    pub traces: Vec<TraceRecord>,
    pub rendered: String,
}

fn manifest_path(workspace_root: &Path) -> std::path::PathBuf {
    workspace_root.join(".orchestration").join("active_intents.yaml")
}

fn read_manifest(workspace_root: &Path) -> Vec<ManifestEntry> {
    let path = manifest_path(workspace_root);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };
    match serde_yaml::from_str::<Manifest>(&content) {
        Ok(manifest) => manifest.entries(),
        Err(e) => {
            eprintln!("warning: failed to parse intent manifest {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Look up a single intent's declared constraints/scope by id. Returns
/// `None` when the manifest is missing/empty or the id isn't declared.
pub fn find_intent(workspace_root: &Path, intent_id: &str) -> Option<Intent> {
    read_manifest(workspace_root)
        .into_iter()
        .find(|entry| entry.id == intent_id)
        .map(|entry| Intent {
            id: entry.id,
            constraints: entry.constraints,
            scope: entry.scope,
            owned_scope: entry.owned_scope.map(OwnedScope::into_vec).unwrap_or_default(),
        })
}

/// XML-escape text content for the `<intent_context>` document.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn render(intent: &Intent, traces: &[TraceRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("<intent_context id=\"{}\">\n", xml_escape(&intent.id)));
    if let Some(constraints) = &intent.constraints {
        out.push_str(&format!("  <constraints>{}</constraints>\n", xml_escape(constraints)));
    }
    if let Some(scope) = &intent.scope {
        out.push_str(&format!("  <scope>{}</scope>\n", xml_escape(scope)));
    }
    for record in traces {
        out.push_str(&format!(
            "  <agent_trace req_id=\"{}\" file=\"{}\" mutation_class=\"{}\" timestamp=\"{}\">{}</agent_trace>\n",
            xml_escape(&record.req_id),
            xml_escape(&record.file),
            record.mutation_class.wire_name(),
            xml_escape(&record.timestamp),
            xml_escape(&record.content_hash),
        ));
    }
    out.push_str("</intent_context>");
    out
}

/// Load the context view for `intent_id`: its manifest entry plus the
/// subset of ledger records attributed to it. `None` if the intent isn't
/// declared in the manifest.
pub fn load(workspace_root: &Path, intent_id: &str) -> Option<ContextView> {
    let intent = find_intent(workspace_root, intent_id)?;
    let traces: Vec<TraceRecord> = ledger::read_all(workspace_root)
        .into_iter()
        .filter(|record| record.intent_id == intent_id)
        .collect();
    let rendered = render(&intent, &traces);

    Some(ContextView {
        intent_id: intent.id,
        constraints: intent.constraints,
        scope: intent.scope,
        owned_scope: intent.owned_scope,
        traces,
        rendered,
    })
}
