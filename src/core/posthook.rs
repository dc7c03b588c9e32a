//! Orchestrates the content hasher, VCS probe, and mutation classifier into
//! one append-only ledger write per successful mutation.
//!
//! Runs only after a write-file tool has already succeeded; its own
//! failures are logged and never propagated back to the tool-result
//! channel — the side effect already happened, and the filesystem, not the
//! ledger, is authoritative.

use crate::core::classify;
use crate::core::error::GateError;
use crate::core::hash;
use crate::core::hook::{HookContext, PostHook};
use crate::core::ledger::{self, TraceRecord, VcsContext};
use crate::core::vcs;

pub const HOOK_ID: &str = "trace-post-hook";
pub const WRITE_TOOL: &str = "write_to_file";

pub struct TracePostHook;

impl PostHook for TracePostHook {
    fn id(&self) -> &str {
        HOOK_ID
    }

    fn run(&self, ctx: &mut HookContext) -> Result<(), GateError> {
        if ctx.tool_call.tool != WRITE_TOOL {
            return Ok(());
        }

        // An intent_id must accompany the write.
        let intent_id = match &ctx.tool_call.intent_id {
            Some(id) => id.clone(),
            None => {
                eprintln!("warning: write_to_file succeeded with no intent_id; skipping trace");
                return Ok(());
            }
        };

        let path = match &ctx.tool_call.path {
            Some(path) => path.clone(),
            None => {
                eprintln!("warning: write_to_file succeeded with no path; skipping trace");
                return Ok(());
            }
        };

        let new_content = ctx.tool_call.content.clone().unwrap_or_default();

        // Previous committed version, absent is fine (new file).
        let old_content = vcs::head_content(ctx.workspace_root, &path);

        // Classify, with the agent's declared hint as a last resort.
        let mutation_class = classify::classify(old_content.as_deref(), &new_content, ctx.tool_call.mutation_class_hint);

        let revision = vcs::current_revision(ctx.workspace_root);
        let branch = vcs::current_branch(ctx.workspace_root);
        let vcs_context = revision.map(|revision| VcsContext { revision, branch });

        // Assemble the record.
        let content_hash = hash::hash(&new_content);
        let record = TraceRecord::new(
            ctx.task.task_id.clone(),
            intent_id,
            path,
            chrono::Utc::now().to_rfc3339(),
            mutation_class,
            content_hash,
            ctx.task.model_identifier.clone(),
            vcs_context,
        );

        // Append, never propagating failure.
        if let Err(e) = ledger::append(ctx.workspace_root, &record) {
            eprintln!("warning: failed to append trace record: {}", e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::MutationClass;
    use crate::core::task::Task;
    use crate::core::tool::ToolCall;
    use tempfile::tempdir;

    #[test]
    fn skips_non_write_tools() {
        let dir = tempdir().unwrap();
        let hook = TracePostHook;
        let mut task = Task::new("t-1");
        let call = ToolCall::new("read_file");
        let mut ctx = HookContext { workspace_root: dir.path(), tool_call: &call, task: &mut task };
        hook.run(&mut ctx).unwrap();
        assert!(ledger::read_all(dir.path()).is_empty());
    }

    #[test]
    fn skips_when_intent_id_missing() {
        let dir = tempdir().unwrap();
        let hook = TracePostHook;
        let mut task = Task::new("t-1");
        let call = ToolCall::new("write_to_file").with_path("a.ts").with_content("x");
        let mut ctx = HookContext { workspace_root: dir.path(), tool_call: &call, task: &mut task };
        hook.run(&mut ctx).unwrap();
        assert!(ledger::read_all(dir.path()).is_empty());
    }

    #[test]
    fn appends_one_record_for_a_new_file_write() {
        let dir = tempdir().unwrap();
        let hook = TracePostHook;
        let mut task = Task::new("t-42");
        let call = ToolCall::new("write_to_file")
            .with_intent_id("INT-1")
            .with_path("src/a.ts")
            .with_content("hello\n");
        let mut ctx = HookContext { workspace_root: dir.path(), tool_call: &call, task: &mut task };
        hook.run(&mut ctx).unwrap();

        let records = ledger::read_all(dir.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].req_id, "t-42");
        assert_eq!(records[0].intent_id, "INT-1");
        assert_eq!(records[0].related, vec!["t-42".to_string()]);
        assert_eq!(records[0].mutation_class, MutationClass::Evolution);
        assert_eq!(records[0].content_hash, hash::hash("hello\n"));
        assert_eq!(records[0].content_hash, records[0].ranges.content_hash);
    }
}
