//! Name-only diffs between commits

use git2::{Oid, Repository, Tree};

use crate::error::{Result, git as git_error};

fn commit_tree<'r>(repo: &'r Repository, sha: &str) -> Result<Tree<'r>> {
    Oid::from_str(sha)
        .and_then(|oid| repo.find_commit(oid))
        .and_then(|commit| commit.tree())
        .map_err(|e| git_error::failed(&format!("diff (resolve {sha})"), &e))
}

/// Paths changed between `from` and `to`, in diff order, without duplicates
///
/// Deleted files are reported under their old path.
pub fn changed_files(repo: &Repository, from: &str, to: &str) -> Result<Vec<String>> {
    let from_tree = commit_tree(repo, from)?;
    let to_tree = commit_tree(repo, to)?;
    let diff = repo
        .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)
        .map_err(|e| git_error::failed("diff", &e))?;

    let mut files: Vec<String> = Vec::new();
    for delta in diff.deltas() {
        let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) else {
            continue;
        };
        let path = path.to_string_lossy().replace('\\', "/");
        if !files.contains(&path) {
            files.push(path);
        }
    }
    Ok(files)
}
