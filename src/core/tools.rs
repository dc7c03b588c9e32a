//! Sample tool bodies that exercise the hook pipeline end to end. The
//! concrete tool implementations themselves are an external collaborator
//! in a real host — these exist only so the core is runnable/demoable,
//! the way the teacher's CLI drives its own core directly.
//!
//! Each function here is what a host would register as a tool: it runs
//! the [`crate::core::hook::HookRegistry`] pre-hooks, performs (or skips)
//! its side effect, then runs the post-hooks. The optimistic lock is
//! implemented inside the write tool proper, not the post-hook — it lives
//! in [`write_to_file`].

use crate::core::classify::MutationClass;
use crate::core::error::GateError;
use crate::core::hook::HookRegistry;
use crate::core::intent::{self, ContextView};
use crate::core::ledger::{self, TraceRecord};
use crate::core::task::Task;
use crate::core::tool::{Reason, ToolCall, ToolError, SELECT_ACTIVE_INTENT_TOOL};
use std::path::Path;
use std::process::Command;

/// The non-error result of a tool call that was not blocked by a pre-hook.
#[derive(Debug)]
pub enum ToolSuccess {
    IntentSelected { intent_id: String },
    FileContent(String),
    Written,
    CommandRun { stdout: String, stderr: String, success: bool },
    ContextRendered(Option<String>),
    TraceRecords(Vec<TraceRecord>),
}

/// What a tool call produced: either it ran (possibly a no-op, e.g. an
/// unknown context), or a pre-hook blocked it with a structured,
/// agent-correctable reason.
#[derive(Debug)]
pub enum ToolOutcome {
    Allowed(ToolSuccess),
    Blocked(ToolError),
}

/// `select_active_intent` — drives the per-task intent state machine.
/// Validates the id against the manifest; an unknown id is
/// `intent_not_found`, not a silent no-op.
pub fn select_active_intent(
    workspace_root: &Path,
    task: &mut Task,
    registry: &HookRegistry,
    intent_id: &str,
) -> Result<ToolOutcome, GateError> {
    let call = ToolCall::new(SELECT_ACTIVE_INTENT_TOOL).with_intent_id(intent_id);
    if let Some(error) = registry.run_pre(workspace_root, &call, task) {
        return Ok(ToolOutcome::Blocked(error));
    }

    if intent::find_intent(workspace_root, intent_id).is_none() {
        return Ok(ToolOutcome::Blocked(
            ToolError::new(SELECT_ACTIVE_INTENT_TOOL, Reason::IntentNotFound, format!("{} is not declared in the intent manifest", intent_id))
                .with_intent_id(intent_id.to_string()),
        ));
    }

    task.select_intent(intent_id);
    registry.run_post(workspace_root, &call, task);
    Ok(ToolOutcome::Allowed(ToolSuccess::IntentSelected { intent_id: intent_id.to_string() }))
}

/// `read_file` — a `Safe` tool. Reads the file and records its fingerprint
/// in the task's hash tracker; callers must invoke `store` on every read.
pub fn read_file(workspace_root: &Path, task: &mut Task, registry: &HookRegistry, relative_path: &str) -> Result<ToolOutcome, GateError> {
    let call = ToolCall::new("read_file").with_path(relative_path);
    if let Some(error) = registry.run_pre(workspace_root, &call, task) {
        return Ok(ToolOutcome::Blocked(error));
    }

    let content = std::fs::read_to_string(workspace_root.join(relative_path))?;
    task.hashes.store(relative_path, &content);
    registry.run_post(workspace_root, &call, task);
    Ok(ToolOutcome::Allowed(ToolSuccess::FileContent(content)))
}

/// `write_to_file` — the destructive tool carrying the optimistic lock:
/// `Known(h) -(write, stale)-> Unknown`.
pub fn write_to_file(
    workspace_root: &Path,
    task: &mut Task,
    registry: &HookRegistry,
    relative_path: &str,
    new_content: &str,
    mutation_class_hint: Option<MutationClass>,
    model_identifier: Option<&str>,
) -> Result<ToolOutcome, GateError> {
    let mut call = ToolCall::new("write_to_file")
        .with_path(relative_path)
        .with_content(new_content);
    call.intent_id = task.active_intent_id().map(|s| s.to_string());
    if let Some(hint) = mutation_class_hint {
        call = call.with_mutation_class_hint(hint);
    }
    if let Some(model) = model_identifier {
        call.model_identifier = Some(model.to_string());
    }

    if let Some(error) = registry.run_pre(workspace_root, &call, task) {
        return Ok(ToolOutcome::Blocked(error));
    }

    let target = workspace_root.join(relative_path);
    if target.exists() {
        let on_disk = std::fs::read_to_string(&target)?;
        if !task.hashes.unchanged(relative_path, &on_disk) {
            task.hashes.clear(relative_path);
            return Ok(ToolOutcome::Blocked(
                ToolError::new("write_to_file", Reason::StaleFile, "file changed on disk since last read; re-read before retrying")
                    .with_file(relative_path.to_string()),
            ));
        }
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, new_content)?;
    task.hashes.store(relative_path, new_content);

    registry.run_post(workspace_root, &call, task);
    Ok(ToolOutcome::Allowed(ToolSuccess::Written))
}

/// `run_shell_command` — a `Destructive` tool with no trace-ledger
/// footprint of its own; the trace post-hook only triggers on a
/// write-file tool.
pub fn run_shell_command(
    workspace_root: &Path,
    task: &mut Task,
    registry: &HookRegistry,
    command: &str,
) -> Result<ToolOutcome, GateError> {
    let call = ToolCall::new("run_shell_command").with_command(command);
    if let Some(error) = registry.run_pre(workspace_root, &call, task) {
        return Ok(ToolOutcome::Blocked(error));
    }

    let output = Command::new("sh").arg("-c").arg(command).current_dir(workspace_root).output()?;
    registry.run_post(workspace_root, &call, task);
    Ok(ToolOutcome::Allowed(ToolSuccess::CommandRun {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    }))
}

/// `context show` — renders the `<intent_context>` document for an
/// intent, a `Safe` read-only query.
pub fn context_show(workspace_root: &Path, task: &mut Task, registry: &HookRegistry, intent_id: &str) -> Result<ToolOutcome, GateError> {
    let call = ToolCall::new("context_show").with_intent_id(intent_id);
    if let Some(error) = registry.run_pre(workspace_root, &call, task) {
        return Ok(ToolOutcome::Blocked(error));
    }

    let view: Option<ContextView> = intent::load(workspace_root, intent_id);
    Ok(ToolOutcome::Allowed(ToolSuccess::ContextRendered(view.map(|v| v.rendered))))
}

/// `trace show` — the last `limit` ledger records (or all, if `limit` is
/// `None`), a `Safe` read-only query.
pub fn trace_show(workspace_root: &Path, task: &mut Task, registry: &HookRegistry, limit: Option<usize>) -> Result<ToolOutcome, GateError> {
    let call = ToolCall::new("trace_show");
    if let Some(error) = registry.run_pre(workspace_root, &call, task) {
        return Ok(ToolOutcome::Blocked(error));
    }

    let mut records = ledger::read_all(workspace_root);
    if let Some(limit) = limit {
        let start = records.len().saturating_sub(limit);
        records = records.split_off(start);
    }
    Ok(ToolOutcome::Allowed(ToolSuccess::TraceRecords(records)))
}
