//! CLI struct definitions for the `intentgate` command-line demonstration
//! harness. All clap-derived types live here; dispatch logic lives in
//! `main.rs`, mirroring the teacher's own `cli.rs` / dispatch split.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "intentgate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Intent-gated mediation layer: every destructive tool call is attributed to a declared intent, confined to its file scope, authorized by a human, and recorded in an append-only trace ledger."
)]
pub struct Cli {
    /// Workspace root the intent manifest, ignore list, and ledger are
    /// resolved against.
    #[clap(long, global = true, default_value = ".")]
    pub workspace_root: PathBuf,

    /// Select this intent before running the subcommand, within the same
    /// process (a CLI invocation is one short-lived task). Also the
    /// argument `select-intent` itself reads, since clap forbids a global
    /// flag and a subcommand-local flag from sharing a name.
    #[clap(long, global = true)]
    pub intent_id: Option<String>,

    /// Model identifier attached to any trace record this invocation
    /// appends.
    #[clap(long, global = true)]
    pub model_identifier: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select the active intent for this task. Takes the intent id from
    /// the top-level `--intent-id` flag rather than a subcommand-local
    /// one of the same name.
    SelectIntent,
    /// Read a file and record its fingerprint for the optimistic lock.
    Read {
        #[clap(long)]
        path: String,
    },
    /// Write a file, gated by the security pre-hook and the optimistic
    /// lock, and traced by the post-hook on success.
    Write {
        #[clap(long)]
        path: String,
        /// Path to read content from, or `-` for stdin.
        #[clap(long)]
        content_file: String,
        /// The agent's own declared mutation class, consulted only as a
        /// last resort by the classifier.
        #[clap(long, value_enum)]
        mutation_class: Option<MutationClassArg>,
    },
    /// Run a shell command, gated the same way a file write is.
    Run {
        #[clap(long)]
        cmd: String,
    },
    /// Inspect the append-only trace ledger.
    Trace {
        #[clap(subcommand)]
        command: TraceCommand,
    },
    /// Render the `<intent_context>` document for an intent.
    Context {
        #[clap(subcommand)]
        command: ContextCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TraceCommand {
    /// Print ledger records, most recent `last` only (all, if omitted).
    Show {
        #[clap(long)]
        last: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContextCommand {
    Show {
        #[clap(long)]
        intent_id: String,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum MutationClassArg {
    Refactor,
    Evolution,
}

impl From<MutationClassArg> for intentgate::core::classify::MutationClass {
    fn from(value: MutationClassArg) -> Self {
        match value {
            MutationClassArg::Refactor => intentgate::core::classify::MutationClass::Refactor,
            MutationClassArg::Evolution => intentgate::core::classify::MutationClass::Evolution,
        }
    }
}
