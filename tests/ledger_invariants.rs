//! Universally quantified invariants and boundary behaviors.

use intentgate::core::auth::{Decision, ScriptedSurface, UnavailableSurface};
use intentgate::core::classify::{self, MutationClass};
use intentgate::core::hook::HookRegistry;
use intentgate::core::intent;
use intentgate::core::ledger;
use intentgate::core::posthook::TracePostHook;
use intentgate::core::prehook::SecurityPreHook;
use intentgate::core::scope;
use intentgate::core::task::Task;
use intentgate::core::tool::Reason;
use intentgate::core::tools::{self, ToolOutcome};
use tempfile::tempdir;

fn write_manifest(root: &std::path::Path, yaml: &str) {
    let dir = root.join(".orchestration");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("active_intents.yaml"), yaml).unwrap();
}

#[test]
fn every_ledger_line_is_well_formed_json_with_required_fields() {
    let workspace = tempdir().unwrap();
    write_manifest(workspace.path(), "- id: INT-1\n");
    let mut registry = HookRegistry::new();
    registry.register_pre(Box::new(SecurityPreHook::new(Box::new(ScriptedSurface::new(vec![
        Some(Decision::Approve),
        Some(Decision::Approve),
    ])))));
    registry.register_post(Box::new(TracePostHook));
    let mut task = Task::new("task-inv");
    tools::select_active_intent(workspace.path(), &mut task, &registry, "INT-1").unwrap();
    tools::write_to_file(workspace.path(), &mut task, &registry, "a.ts", "one", None, None).unwrap();
    tools::write_to_file(workspace.path(), &mut task, &registry, "b.ts", "two", None, None).unwrap();

    let raw = std::fs::read_to_string(workspace.path().join(".orchestration/agent_trace.jsonl")).unwrap();
    for line in raw.lines() {
        let value: serde_json::Value = serde_json::from_str(line).expect("each line is well-formed JSON");
        assert!(value.get("req_id").is_some());
        assert!(value.get("intent_id").is_some());
        assert!(value.get("file").is_some());
        assert!(value.get("timestamp").is_some());
        assert!(value.get("mutation_class").is_some());
        assert!(value.get("content_hash").is_some());
        assert!(value.get("related").is_some());
        assert!(value.get("ranges").and_then(|r| r.get("content_hash")).is_some());
    }

    for record in ledger::read_all(workspace.path()) {
        assert_eq!(record.content_hash, record.ranges.content_hash);
    }
}

#[test]
fn classification_is_idempotent() {
    let content = "fn foo() { bar(); }\nfn baz() {}\n";
    assert_eq!(
        classify::classify(Some(content), content, Some(MutationClass::Evolution)),
        MutationClass::Refactor
    );
}

#[test]
fn rendered_intent_context_round_trips_id_constraints_and_scope() {
    let workspace = tempdir().unwrap();
    write_manifest(
        workspace.path(),
        "- id: \"INT-<1>\"\n  constraints: \"don't touch & break\"\n  scope: \"weather API\"\n",
    );
    let view = intent::load(workspace.path(), "INT-<1>").unwrap();
    assert!(view.rendered.contains("id=\"INT-&lt;1&gt;\""));
    assert!(view.rendered.contains("don&apos;t touch &amp; break"));
    assert!(view.rendered.contains("<scope>weather API</scope>"));
    assert!(!view.rendered.contains("INT-<1>"));
}

#[test]
fn missing_manifest_means_no_owned_scope_constraint() {
    let workspace = tempdir().unwrap();
    assert!(intent::load(workspace.path(), "INT-1").is_none());
    // A pre-hook consulting a missing manifest gets an empty owned_scope,
    // which the scope matcher treats as "no constraint".
    assert!(scope::is_within("anything/at/all.rs", &[]));
}

#[test]
fn missing_ledger_yields_empty_trace_list() {
    let workspace = tempdir().unwrap();
    write_manifest(workspace.path(), "- id: INT-1\n");
    let view = intent::load(workspace.path(), "INT-1").unwrap();
    assert!(view.traces.is_empty());
}

#[test]
fn double_star_pattern_matches_directory_and_descendants_but_not_siblings() {
    let owned = vec!["a/b/**".to_string()];
    assert!(scope::is_within("a/b", &owned));
    assert!(scope::is_within("a/b/c", &owned));
    assert!(scope::is_within("a/b/c/d", &owned));
    assert!(!scope::is_within("a/bc", &owned));
}

#[test]
fn authorization_surface_unavailable_fails_open_and_allows() {
    let workspace = tempdir().unwrap();
    write_manifest(workspace.path(), "- id: INT-1\n");
    let mut registry = HookRegistry::new();
    registry.register_pre(Box::new(SecurityPreHook::new(Box::new(UnavailableSurface))));
    let mut task = Task::new("task-auth");
    task.select_intent("INT-1");
    let outcome = tools::run_shell_command(workspace.path(), &mut task, &registry, "true").unwrap();
    assert!(matches!(outcome, ToolOutcome::Allowed(_)));
}

#[test]
fn missing_intent_id_blocks_destructive_tool_not_select_intent() {
    let workspace = tempdir().unwrap();
    write_manifest(workspace.path(), "- id: INT-1\n");
    let mut registry = HookRegistry::new();
    registry.register_pre(Box::new(SecurityPreHook::new(Box::new(UnavailableSurface))));
    let mut task = Task::new("task-missing");

    let blocked = tools::write_to_file(workspace.path(), &mut task, &registry, "a.ts", "x", None, None).unwrap();
    match blocked {
        ToolOutcome::Blocked(error) => assert_eq!(error.reason, Reason::MissingIntentId),
        ToolOutcome::Allowed(_) => panic!("expected missing_intent_id block"),
    }

    let selected = tools::select_active_intent(workspace.path(), &mut task, &registry, "INT-1").unwrap();
    assert!(matches!(selected, ToolOutcome::Allowed(_)));
}
