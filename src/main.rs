//! `intentgate` CLI entry point — a thin demonstration harness over the
//! library's task/tool plumbing. Not itself part of the core: it exists
//! only so the core subsystems are runnable/scriptable the way the
//! teacher's own CLI runs its core directly.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command, ContextCommand, TraceCommand};
use colored::Colorize;
use intentgate::core::auth::StdinSurface;
use intentgate::core::hook::HookRegistry;
use intentgate::core::posthook::TracePostHook;
use intentgate::core::prehook::SecurityPreHook;
use intentgate::core::task::Task;
use intentgate::core::tools::{self, ToolOutcome, ToolSuccess};
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let workspace_root = cli.workspace_root.as_path();

    let mut registry = HookRegistry::new();
    registry.register_pre(Box::new(SecurityPreHook::new(Box::new(StdinSurface))));
    registry.register_post(Box::new(TracePostHook));

    let mut task = Task::new(ulid::Ulid::new().to_string());
    if let Some(model_identifier) = &cli.model_identifier {
        task = task.with_model_identifier(model_identifier.clone());
    }

    if let Some(intent_id) = &cli.intent_id {
        if let ToolOutcome::Blocked(error) = tools::select_active_intent(workspace_root, &mut task, &registry, intent_id)? {
            return Ok(report_blocked(&error));
        }
    }

    match cli.command {
        Command::SelectIntent => {
            let intent_id = cli.intent_id.as_deref().context("select-intent requires --intent-id")?;
            match tools::select_active_intent(workspace_root, &mut task, &registry, intent_id)? {
                ToolOutcome::Allowed(ToolSuccess::IntentSelected { intent_id }) => {
                    println!("{} active intent: {}", "OK".green(), intent_id);
                    Ok(ExitCode::SUCCESS)
                }
                ToolOutcome::Blocked(error) => Ok(report_blocked(&error)),
                ToolOutcome::Allowed(_) => unreachable!("select_active_intent only returns IntentSelected"),
            }
        }
        Command::Read { path } => match tools::read_file(workspace_root, &mut task, &registry, &path)? {
            ToolOutcome::Allowed(ToolSuccess::FileContent(content)) => {
                print!("{}", content);
                Ok(ExitCode::SUCCESS)
            }
            ToolOutcome::Blocked(error) => Ok(report_blocked(&error)),
            ToolOutcome::Allowed(_) => unreachable!("read_file only returns FileContent"),
        },
        Command::Write { path, content_file, mutation_class } => {
            let content = read_content(&content_file)
                .with_context(|| format!("reading content for {}", path))?;
            let hint = mutation_class.map(Into::into);
            let model_identifier = cli.model_identifier.as_deref();
            match tools::write_to_file(workspace_root, &mut task, &registry, &path, &content, hint, model_identifier)? {
                ToolOutcome::Allowed(ToolSuccess::Written) => {
                    println!("{} wrote {}", "OK".green(), path);
                    Ok(ExitCode::SUCCESS)
                }
                ToolOutcome::Blocked(error) => Ok(report_blocked(&error)),
                ToolOutcome::Allowed(_) => unreachable!("write_to_file only returns Written"),
            }
        }
        Command::Run { cmd } => match tools::run_shell_command(workspace_root, &mut task, &registry, &cmd)? {
            ToolOutcome::Allowed(ToolSuccess::CommandRun { stdout, stderr, success }) => {
                print!("{}", stdout);
                eprint!("{}", stderr);
                Ok(if success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            ToolOutcome::Blocked(error) => Ok(report_blocked(&error)),
            ToolOutcome::Allowed(_) => unreachable!("run_shell_command only returns CommandRun"),
        },
        Command::Trace { command: TraceCommand::Show { last } } => {
            match tools::trace_show(workspace_root, &mut task, &registry, last)? {
                ToolOutcome::Allowed(ToolSuccess::TraceRecords(records)) => {
                    for record in &records {
                        println!("{}", serde_json::to_string(record).unwrap_or_default());
                    }
                    Ok(ExitCode::SUCCESS)
                }
                ToolOutcome::Blocked(error) => Ok(report_blocked(&error)),
                ToolOutcome::Allowed(_) => unreachable!("trace_show only returns TraceRecords"),
            }
        }
        Command::Context { command: ContextCommand::Show { intent_id } } => {
            match tools::context_show(workspace_root, &mut task, &registry, &intent_id)? {
                ToolOutcome::Allowed(ToolSuccess::ContextRendered(Some(rendered))) => {
                    println!("{}", rendered);
                    Ok(ExitCode::SUCCESS)
                }
                ToolOutcome::Allowed(ToolSuccess::ContextRendered(None)) => {
                    eprintln!("no such intent: {}", intent_id);
                    Ok(ExitCode::FAILURE)
                }
                ToolOutcome::Blocked(error) => Ok(report_blocked(&error)),
                ToolOutcome::Allowed(_) => unreachable!("context_show only returns ContextRendered"),
            }
        }
    }
}

fn read_content(content_file: &str) -> anyhow::Result<String> {
    if content_file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading content from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(content_file)
            .with_context(|| format!("reading content file {}", content_file))
    }
}

/// Print the structured error payload to stderr and return a non-zero
/// exit code — a policy denial, not a crash.
fn report_blocked(error: &intentgate::core::tool::ToolError) -> ExitCode {
    eprintln!("{} {}", "BLOCKED".red(), serde_json::to_string(error).unwrap_or_default());
    ExitCode::FAILURE
}
