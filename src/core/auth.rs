//! Modal human approval surface, abstracted behind a trait so the host
//! (CLI, editor, test harness) can supply whatever confirmation
//! capability it has.
//!
//! When no surface is registered, the default policy is fail-open: a
//! broken UI must not itself cause silent denial of service. Hosts that
//! need strict deny-on-unavailable can implement [`AuthorizationSurface`]
//! accordingly — the fail-open default lives in the security pre-hook,
//! not here.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// A host-supplied human-confirmation capability.
pub trait AuthorizationSurface {
    /// Present `description` to the operator and block for a decision.
    /// `None` means the surface itself is unavailable right now (not the
    /// same as a `Reject` — callers fail open on `None`).
    fn confirm(&self, description: &str) -> Option<Decision>;
}

/// CLI confirmation surface: reads a `y`/`n` line from stdin. The teacher's
/// `core::fs_cli` and `plugins::lcm` both read confirmation input the same
/// way (`std::io::stdin().read_line`).
pub struct StdinSurface;

impl AuthorizationSurface for StdinSurface {
    fn confirm(&self, description: &str) -> Option<Decision> {
        use std::io::Write;
        print!("{} [y/N] ", description);
        if std::io::stdout().flush().is_err() {
            return None;
        }
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return None;
        }
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Decision::Approve),
            _ => Some(Decision::Reject),
        }
    }
}

/// A surface that is always unavailable — used to exercise the fail-open
/// path, and by hosts with no modal capability at all.
pub struct UnavailableSurface;

impl AuthorizationSurface for UnavailableSurface {
    fn confirm(&self, _description: &str) -> Option<Decision> {
        None
    }
}

/// A scripted surface for tests and headless automation: returns decisions
/// from a fixed queue instead of prompting a terminal.
pub struct ScriptedSurface {
    pub decisions: std::sync::Mutex<std::collections::VecDeque<Option<Decision>>>,
}

impl ScriptedSurface {
    pub fn new(decisions: Vec<Option<Decision>>) -> Self {
        Self { decisions: std::sync::Mutex::new(decisions.into()) }
    }
}

impl AuthorizationSurface for ScriptedSurface {
    fn confirm(&self, _description: &str) -> Option<Decision> {
        self.decisions.lock().unwrap_or_else(|e| e.into_inner()).pop_front().flatten()
    }
}
