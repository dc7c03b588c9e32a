//! Mutation classification recorded in the ledger for a refactor vs. an
//! evolution of a pre-existing file.

use intentgate::core::auth::{Decision, ScriptedSurface};
use intentgate::core::hook::HookRegistry;
use intentgate::core::ledger;
use intentgate::core::posthook::TracePostHook;
use intentgate::core::prehook::SecurityPreHook;
use intentgate::core::task::Task;
use intentgate::core::tools::{self, ToolOutcome, ToolSuccess};
use tempfile::tempdir;

fn write_manifest(root: &std::path::Path, yaml: &str) {
    let dir = root.join(".orchestration");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("active_intents.yaml"), yaml).unwrap();
}

fn registry(approvals: usize) -> HookRegistry {
    let mut reg = HookRegistry::new();
    reg.register_pre(Box::new(SecurityPreHook::new(Box::new(ScriptedSurface::new(
        vec![Some(Decision::Approve); approvals],
    )))));
    reg.register_post(Box::new(TracePostHook));
    reg
}

#[test]
fn whitespace_only_change_classifies_as_refactor() {
    let workspace = tempdir().unwrap();
    write_manifest(workspace.path(), "- id: INT-1\n");
    let reg = registry(2);
    let mut task = Task::new("task-whitespace-refactor");
    tools::select_active_intent(workspace.path(), &mut task, &reg, "INT-1").unwrap();

    let old = "fn foo() {\n    let x = 1;\n    x\n}\n";
    let new = "fn foo() {\n    let   x = 1;\n    x\n}\n";

    tools::write_to_file(workspace.path(), &mut task, &reg, "src/a.rs", old, None, None).unwrap();
    let outcome = tools::write_to_file(workspace.path(), &mut task, &reg, "src/a.rs", new, None, None).unwrap();
    assert!(matches!(outcome, ToolOutcome::Allowed(ToolSuccess::Written)));

    // The classifier diffs against VCS HEAD, not the task's own prior
    // write — absent a git repository here, `old_content` is absent and
    // the second write is still correctly Evolution (new file from the
    // classifier's point of view). Assert against the classifier
    // directly for the refactor case instead.
    assert_eq!(
        intentgate::core::classify::classify(Some(old), new, None),
        intentgate::core::classify::MutationClass::Refactor
    );

    let records = ledger::read_all(workspace.path());
    assert_eq!(records.len(), 2);
}

#[test]
fn adding_a_function_classifies_as_evolution() {
    let old = "fn foo() {\n    1\n}\n";
    let new = "fn foo() {\n    1\n}\n\nfn bar() {\n    2\n}\n";
    assert_eq!(
        intentgate::core::classify::classify(Some(old), new, None),
        intentgate::core::classify::MutationClass::Evolution
    );
}

#[test]
fn new_file_write_is_always_recorded_as_evolution() {
    let workspace = tempdir().unwrap();
    write_manifest(workspace.path(), "- id: INT-1\n");
    let reg = registry(1);
    let mut task = Task::new("task-new-file-evolution");
    tools::select_active_intent(workspace.path(), &mut task, &reg, "INT-1").unwrap();

    tools::write_to_file(workspace.path(), &mut task, &reg, "src/new.rs", "fn bar() {}\n", None, None).unwrap();

    let records = ledger::read_all(workspace.path());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mutation_class.wire_name(), "INTENT_EVOLUTION");
}
