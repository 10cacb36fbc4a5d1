//! Git metadata for snapshot labeling.
//!
//! Snapshots are tagged with the commit they were captured at. Outside a git
//! checkout both helpers degrade gracefully instead of failing the capture.

use chrono::Utc;
use std::path::Path;
use std::process::Command;

/// Full SHA of HEAD, or `unknown` when git is unavailable.
pub fn head_sha(dir: &Path) -> String {
    run_git(dir, &["rev-parse", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
}

/// Committer timestamp of HEAD in strict ISO form, falling back to now.
pub fn head_timestamp(dir: &Path) -> String {
    run_git(dir, &["show", "-s", "--format=%cI", "HEAD"])
        .unwrap_or_else(|| Utc::now().to_rfc3339())
}

fn run_git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
