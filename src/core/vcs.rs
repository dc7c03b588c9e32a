//! Read-only accessor for the workspace's current revision, branch, and
//! last-committed file content.
//!
//! Every probe shells out to `git` the way the teacher's workspace module
//! does (`Command::new("git").args(["-C", root, ...])`), never links
//! `git2`. Probes never throw: a missing tool, a non-repository root, or a
//! non-zero exit all collapse to `None`. The child is killed on timeout
//! rather than waited on, so a hung `git` (credential prompt, locked
//! filesystem, network-backed remote) can't wedge the caller.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

fn run_git(repo_root: &Path, args: &[&str]) -> Option<String> {
    if !repo_root.join(".git").exists() {
        return None;
    }

    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo_root);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::null());

    let mut child = cmd.spawn().ok()?;
    let mut stdout = child.stdout.take()?;
    let reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf);
        buf
    });

    let deadline = Instant::now() + PROBE_TIMEOUT;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    // Killing the child closes its stdout, which unblocks
                    // the reader thread with EOF — the join below can't hang.
                    let _ = child.kill();
                    let _ = child.wait();
                    break None;
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            Err(_) => break None,
        }
    };

    let stdout = reader.join().unwrap_or_default();
    if !matches!(status, Some(s) if s.success()) {
        return None;
    }

    let text = String::from_utf8_lossy(&stdout).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// Current commit hash of `HEAD`, or `None` if not a git repository (or git
/// is unavailable, or the probe timed out).
pub fn current_revision(workspace_root: &Path) -> Option<String> {
    run_git(workspace_root, &["rev-parse", "HEAD"])
}

/// Current branch name, or `None` (e.g. detached HEAD, no repository).
pub fn current_branch(workspace_root: &Path) -> Option<String> {
    run_git(workspace_root, &["branch", "--show-current"])
}

/// Content of `relative_path` as committed at `HEAD`, or `None` if the path
/// is untracked, the workspace isn't a repository, or the probe fails.
pub fn head_content(workspace_root: &Path, relative_path: &str) -> Option<String> {
    let spec = format!("HEAD:{}", relative_path);
    run_git(workspace_root, &["show", &spec])
}
