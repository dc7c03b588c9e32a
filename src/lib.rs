//! intentgate: an intent-gated tool mediation layer for autonomous agents.
//!
//! Every destructive tool call an agent issues — a file write, a shell
//! command — is attributed to a declared *intent*, confined to that
//! intent's owned file scope, authorized by a human, checked against the
//! last-known state of its target file, and recorded in an append-only
//! semantic ledger linked to the workspace's version-control revision.
//!
//! # Architecture
//!
//! Four subsystems compose into the mediation layer:
//!
//! - **Intent Context Loader** (`core::intent`) parses the intent manifest
//!   and prior ledger into a per-intent view rendered for the agent.
//! - **Hook Pipeline** (`core::hook`, `core::prehook`, `core::posthook`) is
//!   a deterministic pre/post-execution mediator with fixed fail-open /
//!   fail-closed rules.
//! - **Optimistic File-Lock & Hash Tracker** (`core::hash_tracker`) detects
//!   out-of-band modification between a task's read and write of a file.
//! - **Mutation Classifier & Trace Ledger** (`core::classify`,
//!   `core::ledger`) label each write `Refactor`/`Evolution` and append it
//!   to a line-delimited journal.
//!
//! [`core::tools`] wires all of the above into the sample tool bodies
//! (`select_active_intent`, `read_file`, `write_to_file`,
//! `run_shell_command`) the bundled CLI drives.
//!
//! # For agents
//!
//! 1. Call `select_active_intent` before any destructive tool.
//! 2. Read a file before writing it — the optimistic lock only forgives a
//!    file this task has never touched.
//! 3. On a `stale_file` error, re-read before retrying.
//! 4. On a `scope_violation`, stay within the intent's `owned_scope` or
//!    request it expanded.

pub mod core;
