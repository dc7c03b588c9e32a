//! Deterministic, ordered pre/post hook execution with fixed fail-safe
//! semantics.
//!
//! Grounded in the teacher's own dispatch-by-table pattern (`subsystems.rs`
//! drives a fixed, ordered list of registered subsystems); here the table
//! is two ordered `Vec`s rather than a single registry, because pre- and
//! post-execution have different short-circuit rules.

use crate::core::error::GateError;
use crate::core::task::Task;
use crate::core::tool::{ToolCall, ToolError};
use std::path::Path;

/// Everything a hook needs to make its decision: the call under mediation,
/// the task it belongs to, and the workspace it targets.
pub struct HookContext<'a> {
    pub workspace_root: &'a Path,
    pub tool_call: &'a ToolCall,
    pub task: &'a mut Task,
}

/// A pre-execution hook's verdict: allow the call through, or block it
/// with a structured error.
pub enum PreDecision {
    Allow,
    Block(ToolError),
}

/// A pre-hook gates a tool call before its body runs. Implementations may
/// return `Err` for an *internal* fault (I/O, parse failure, etc.) — the
/// registry treats that as "hook misbehaved", logs it, and moves on to the
/// next hook, never as a denial. A misbehaving hook must not deny all
/// tool execution.
pub trait PreHook {
    fn id(&self) -> &str;
    fn run(&self, ctx: &mut HookContext) -> Result<PreDecision, GateError>;
}

/// A post-hook runs after a tool call has already succeeded. Its failures
/// are logged and never propagated: the side effect already happened, and
/// tracing it is not allowed to undo that.
pub trait PostHook {
    fn id(&self) -> &str;
    fn run(&self, ctx: &mut HookContext) -> Result<(), GateError>;
}

/// The ordered pre/post hook lists, identified by hook id.
#[derive(Default)]
pub struct HookRegistry {
    pre: Vec<Box<dyn PreHook>>,
    post: Vec<Box<dyn PostHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pre-hook. Duplicate ids are a no-op with a warning, not
    /// an error.
    pub fn register_pre(&mut self, hook: Box<dyn PreHook>) {
        if self.pre.iter().any(|h| h.id() == hook.id()) {
            eprintln!("warning: pre-hook '{}' already registered, ignoring", hook.id());
            return;
        }
        self.pre.push(hook);
    }

    pub fn register_post(&mut self, hook: Box<dyn PostHook>) {
        if self.post.iter().any(|h| h.id() == hook.id()) {
            eprintln!("warning: post-hook '{}' already registered, ignoring", hook.id());
            return;
        }
        self.post.push(hook);
    }

    pub fn unregister_pre(&mut self, id: &str) {
        self.pre.retain(|h| h.id() != id);
    }

    pub fn unregister_post(&mut self, id: &str) {
        self.post.retain(|h| h.id() != id);
    }

    /// Run every pre-hook in registration order. Returns `Ok(None)` when
    /// every hook allowed the call; `Ok(Some(error))` on the first block,
    /// short-circuiting the remaining hooks.
    pub fn run_pre(&self, workspace_root: &Path, tool_call: &ToolCall, task: &mut Task) -> Option<ToolError> {
        let mut ctx = HookContext { workspace_root, tool_call, task };
        for hook in &self.pre {
            match hook.run(&mut ctx) {
                Ok(PreDecision::Allow) => continue,
                Ok(PreDecision::Block(error)) => return Some(error),
                Err(e) => {
                    eprintln!("warning: pre-hook '{}' faulted, continuing: {}", hook.id(), e);
                    continue;
                }
            }
        }
        None
    }

    /// Run every post-hook unconditionally; no hook's failure stops the
    /// next from running, and none propagate to the caller.
    pub fn run_post(&self, workspace_root: &Path, tool_call: &ToolCall, task: &mut Task) {
        let mut ctx = HookContext { workspace_root, tool_call, task };
        for hook in &self.post {
            if let Err(e) = hook.run(&mut ctx) {
                eprintln!("warning: post-hook '{}' faulted: {}", hook.id(), e);
            }
        }
    }
}
