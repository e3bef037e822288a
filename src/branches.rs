//! Branch inspection for addon checkouts
//!
//! Reports which branch and commit each configured addon checkout sits on,
//! so the published report records the code state next to the database
//! state. Reads the git metadata files directly; no repository is ever
//! modified.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One addon checkout's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Checkout directory name.
    pub name: String,
    /// Branch name, or "HEAD" when detached.
    pub branch: String,
    /// Commit sha the branch points at, when resolvable.
    pub commit: Option<String>,
}

/// Inspect every configured checkout. A configured path that is not a git
/// checkout is an error, not a silently omitted row.
pub fn inspect_branches<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<BranchInfo>> {
    paths.iter().map(|p| inspect_repo(p.as_ref())).collect()
}

fn inspect_repo(path: &Path) -> Result<BranchInfo> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let git_dir = path.join(".git");
    let head = fs::read_to_string(git_dir.join("HEAD"))?;

    match parse_head(&head) {
        Some(branch) => {
            let commit = resolve_commit(&git_dir, branch);
            Ok(BranchInfo {
                name,
                branch: branch.to_string(),
                commit,
            })
        }
        // Detached HEAD: the file holds the sha itself.
        None => {
            let sha = head.trim();
            if sha.is_empty() {
                return Err(AppError::Config(format!(
                    "unreadable HEAD in {}",
                    path.display()
                )));
            }
            Ok(BranchInfo {
                name,
                branch: "HEAD".to_string(),
                commit: Some(sha.to_string()),
            })
        }
    }
}

/// Extract the branch name from a symbolic HEAD line
/// (`ref: refs/heads/<branch>`).
fn parse_head(content: &str) -> Option<&str> {
    content
        .trim()
        .strip_prefix("ref: ")?
        .strip_prefix("refs/heads/")
}

/// Find the commit a branch points at: loose ref first, then packed-refs.
fn resolve_commit(git_dir: &Path, branch: &str) -> Option<String> {
    let loose = git_dir.join("refs").join("heads").join(branch);
    if let Ok(sha) = fs::read_to_string(loose) {
        return Some(sha.trim().to_string());
    }

    let packed = fs::read_to_string(git_dir.join("packed-refs")).ok()?;
    let wanted = format!("refs/heads/{branch}");
    packed.lines().find_map(|line| {
        let (sha, reference) = line.split_once(' ')?;
        (reference.trim() == wanted).then(|| sha.to_string())
    })
}
