//! Tool capability classification and the tool-call parameter/result
//! shapes the hook pipeline mediates.

use crate::core::classify::MutationClass;
use serde::{Deserialize, Serialize};

/// The name reserved for the one tool allowed to run before any intent is
/// selected.
pub const SELECT_ACTIVE_INTENT_TOOL: &str = "select_active_intent";

/// A tool's static side-effect classification. Unknown tools default to
/// `Destructive` — safe-by-default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Safe,
    Destructive,
}

/// Capability table maintained alongside tool registrations. A small fixed
/// table, not a general plugin registry — mirrors the teacher's const
/// `SUBSYSTEMS` table in `subsystems.rs`.
pub fn capability_of(tool: &str) -> Capability {
    match tool {
        "read_file" | "trace_show" | "context_show" => Capability::Safe,
        SELECT_ACTIVE_INTENT_TOOL | "write_to_file" | "run_shell_command" => {
            Capability::Destructive
        }
        _ => Capability::Destructive,
    }
}

/// The parameters of one tool invocation, as seen by the hook pipeline.
#[derive(Debug, Clone, Default)]
pub struct ToolCall {
    pub tool: String,
    pub intent_id: Option<String>,
    pub path: Option<String>,
    pub content: Option<String>,
    pub command: Option<String>,
    pub mutation_class_hint: Option<MutationClass>,
    pub model_identifier: Option<String>,
}

impl ToolCall {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into(), ..Default::default() }
    }

    pub fn with_intent_id(mut self, id: impl Into<String>) -> Self {
        self.intent_id = Some(id.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_mutation_class_hint(mut self, hint: MutationClass) -> Self {
        self.mutation_class_hint = Some(hint);
        self
    }
}

/// Reason codes for a blocked tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    MissingIntentId,
    IntentIgnored,
    ScopeViolation,
    UserRejected,
    IntentNotFound,
    StaleFile,
}

/// The structured error payload delivered to the agent on the tool's own
/// result channel — never surfaced as a Rust `Err`, so that a policy
/// denial can never be mistaken for an infrastructure fault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub tool: String,
    pub reason: Reason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub message: String,
}

impl ToolError {
    pub fn new(tool: &str, reason: Reason, message: impl Into<String>) -> Self {
        Self {
            kind: "tool_error",
            tool: tool.to_string(),
            reason,
            intent_id: None,
            file: None,
            message: message.into(),
        }
    }

    pub fn with_intent_id(mut self, id: impl Into<String>) -> Self {
        self.intent_id = Some(id.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}
