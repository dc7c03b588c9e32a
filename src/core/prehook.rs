//! Orchestrates the ignore list, intent context loader, scope matcher,
//! and authorization prompt into the tool-call gate policy.
//!
//! Registered as the first (and, for now, only) pre-hook in the
//! [`crate::core::hook::HookRegistry`].

use crate::core::auth::{AuthorizationSurface, Decision};
use crate::core::error::GateError;
use crate::core::hook::{HookContext, PreDecision, PreHook};
use crate::core::intent;
use crate::core::scope;
use crate::core::tool::{Capability, Reason, ToolError, capability_of, SELECT_ACTIVE_INTENT_TOOL};
use crate::core::ignore;
use std::path::{Path, PathBuf};

pub const HOOK_ID: &str = "security-pre-hook";

pub struct SecurityPreHook {
    auth: Box<dyn AuthorizationSurface + Send + Sync>,
}

impl SecurityPreHook {
    pub fn new(auth: Box<dyn AuthorizationSurface + Send + Sync>) -> Self {
        Self { auth }
    }
}

/// Resolve `path` to a workspace-relative, forward-slash path. Absolute
/// paths are stripped of the workspace root prefix; already-relative paths
/// are normalized in place.
fn workspace_relative(workspace_root: &Path, path: &str) -> String {
    let as_path = Path::new(path);
    let relative: PathBuf = if as_path.is_absolute() {
        as_path.strip_prefix(workspace_root).map(|p| p.to_path_buf()).unwrap_or_else(|_| as_path.to_path_buf())
    } else {
        as_path.to_path_buf()
    };
    scope::normalize(&relative.to_string_lossy())
}

/// A human-readable description for the authorization prompt: the intent
/// id plus whatever tool-specific context is available.
fn describe(intent_id: &str, tool: &str, path: Option<&str>, command: Option<&str>) -> String {
    match (path, command) {
        (Some(path), _) => format!("[{}] {} {}", intent_id, tool, path),
        (None, Some(command)) => format!("[{}] {} `{}`", intent_id, tool, command),
        (None, None) => format!("[{}] {}", intent_id, tool),
    }
}

impl PreHook for SecurityPreHook {
    fn id(&self) -> &str {
        HOOK_ID
    }

    fn run(&self, ctx: &mut HookContext) -> Result<PreDecision, GateError> {
        let tool = ctx.tool_call.tool.clone();

        // Safe tools bypass the gate entirely.
        if capability_of(&tool) == Capability::Safe {
            return Ok(PreDecision::Allow);
        }

        // Destructive tools require an active intent, with the single
        // exception of the intent-selection tool itself.
        let active_intent_id = match ctx.task.active_intent_id() {
            Some(id) => id.to_string(),
            None => {
                if tool == SELECT_ACTIVE_INTENT_TOOL {
                    return Ok(PreDecision::Allow);
                }
                return Ok(PreDecision::Block(ToolError::new(
                    &tool,
                    Reason::MissingIntentId,
                    "no active intent: call select_active_intent before any destructive tool",
                )));
            }
        };

        // Ignore list.
        if ignore::is_ignored(ctx.workspace_root, &active_intent_id) {
            return Ok(PreDecision::Block(
                ToolError::new(&tool, Reason::IntentIgnored, format!("intent {} is on the ignore list", active_intent_id))
                    .with_intent_id(active_intent_id.clone()),
            ));
        }

        // Scope check, only when the tool targets a path and the intent
        // declares a non-empty owned scope. An empty scope means no
        // constraint, not deny-all.
        if let Some(path) = &ctx.tool_call.path {
            let owned_scope = intent::find_intent(ctx.workspace_root, &active_intent_id)
                .map(|i| i.owned_scope)
                .unwrap_or_default();
            if !owned_scope.is_empty() {
                let relative = workspace_relative(ctx.workspace_root, path);
                if !scope::is_within(&relative, &owned_scope) {
                    return Ok(PreDecision::Block(
                        ToolError::new(&tool, Reason::ScopeViolation, format!("{} is outside the owned scope of {}", relative, active_intent_id))
                            .with_intent_id(active_intent_id.clone())
                            .with_file(relative),
                    ));
                }
            }
        }

        // Ask the operator to confirm.
        let description = describe(
            &active_intent_id,
            &tool,
            ctx.tool_call.path.as_deref(),
            ctx.tool_call.command.as_deref(),
        );
        match self.auth.confirm(&description) {
            None => Ok(PreDecision::Allow), // fail open: prompt surface unavailable
            Some(Decision::Approve) => Ok(PreDecision::Allow),
            Some(Decision::Reject) => Ok(PreDecision::Block(
                ToolError::new(&tool, Reason::UserRejected, "operator rejected the tool call")
                    .with_intent_id(active_intent_id),
            )),
        }
    }
}
