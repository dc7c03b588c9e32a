//! Per-task state: the intent state machine plus the file-hash tracker
//! instance that lives for exactly one task's lifetime.
//!
//! `NoIntent -> HasIntent(id)` and `HasIntent(id) -> HasIntent(id')` are the
//! only transitions; there is no way back to `NoIntent` short of starting a
//! new task, matching the teacher's own one-way `broker` session states.

use crate::core::hash_tracker::HashTracker;

/// One agent task's view of the intent state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentState {
    NoIntent,
    HasIntent(String),
}

/// The mutable state threaded through one task's tool calls: which intent
/// is active, and the read-time hash snapshot backing the optimistic lock.
/// Empty/`NoIntent` at construction, dropped (never persisted) at task end.
pub struct Task {
    pub task_id: String,
    pub model_identifier: Option<String>,
    state: IntentState,
    pub hashes: HashTracker,
}

impl Task {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            model_identifier: None,
            state: IntentState::NoIntent,
            hashes: HashTracker::new(),
        }
    }

    pub fn with_model_identifier(mut self, model_identifier: impl Into<String>) -> Self {
        self.model_identifier = Some(model_identifier.into());
        self
    }

    pub fn active_intent_id(&self) -> Option<&str> {
        match &self.state {
            IntentState::NoIntent => None,
            IntentState::HasIntent(id) => Some(id.as_str()),
        }
    }

    /// Drive `NoIntent -> HasIntent(id)` or re-select a different intent
    /// (`HasIntent(id) -> HasIntent(id')`). Validity of `id` against the
    /// manifest is the caller's responsibility — this is pure state, not
    /// policy.
    pub fn select_intent(&mut self, id: impl Into<String>) {
        self.state = IntentState::HasIntent(id.into());
    }

    pub fn state(&self) -> &IntentState {
        &self.state
    }
}
