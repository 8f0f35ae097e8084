//! Remote URL parsing and normalization
//!
//! This module handles:
//! - Recognising the URL shapes a repository can be registered with
//! - Extracting owner and repository name
//! - Normalizing SSH and file:// URLs for libgit2

use std::borrow::Cow;

use crate::error::{Result, repo};

/// A registrable remote, split into the parts the registry records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    /// URL handed to the clone
    pub url: String,
    pub owner: String,
    pub repo_name: String,
}

const GITHUB_SHORTHANDS: [&str; 2] = ["gh:", "github:"];
const SCHEMES: [&str; 5] = ["https://", "http://", "ssh://", "git://", "file://"];

fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(".git").unwrap_or(name)
}

/// Owner and repository name from the last two components of a path
fn owner_and_repo(path: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let [.., owner, repo] = parts.as_slice() else {
        return None;
    };
    let repo = strip_git_suffix(repo);
    if repo.is_empty() {
        return None;
    }
    Some(((*owner).to_string(), repo.to_string()))
}

/// Parse a repository URL given to `repo add`
///
/// Accepted shapes: `gh:owner/repo`, `github:owner/repo`,
/// `https://host/owner/repo[.git]` (also `http`, `ssh`, `git`),
/// `git@host:owner/repo[.git]` and `file:///path/to/owner/repo`.
pub fn parse_remote_url(input: &str) -> Result<RemoteUrl> {
    let input = input.trim();

    if let Some(rest) = GITHUB_SHORTHANDS.iter().find_map(|p| input.strip_prefix(p)) {
        let parts: Vec<&str> = rest.split('/').collect();
        let [owner, repo] = parts.as_slice() else {
            return Err(repo::invalid_url(input));
        };
        let repo = strip_git_suffix(repo);
        if owner.is_empty() || repo.is_empty() {
            return Err(repo::invalid_url(input));
        }
        return Ok(RemoteUrl {
            url: format!("https://github.com/{owner}/{repo}.git"),
            owner: (*owner).to_string(),
            repo_name: repo.to_string(),
        });
    }

    let path = if let Some(scheme) = SCHEMES.iter().find(|s| input.starts_with(**s)) {
        let rest = &input[scheme.len()..];
        if *scheme == "file://" {
            rest
        } else {
            // host must be present
            match rest.split_once('/') {
                Some((host, path)) if !host.is_empty() => path,
                _ => return Err(repo::invalid_url(input)),
            }
        }
    } else if let Some((host, path)) = scp_parts(input) {
        if host.is_empty() {
            return Err(repo::invalid_url(input));
        }
        path
    } else {
        return Err(repo::invalid_url(input));
    };

    let (owner, repo_name) = owner_and_repo(path).ok_or_else(|| repo::invalid_url(input))?;
    Ok(RemoteUrl {
        url: input.to_string(),
        owner,
        repo_name,
    })
}

/// Split an SCP-style `user@host:path` URL
fn scp_parts(input: &str) -> Option<(&str, &str)> {
    if input.contains("://") {
        return None;
    }
    let (user_host, path) = input.split_once(':')?;
    let (_, host) = user_host.split_once('@')?;
    Some((host, path))
}

/// Whether a URL points at the local file system
pub fn is_local(url: &str) -> bool {
    url.starts_with("file://") || url.starts_with('/') || std::path::Path::new(url).is_absolute()
}

/// Normalize SSH URLs from SCP-style (git@host:path) to ssh:// format.
///
/// libgit2 handles the explicit ssh:// form more reliably.
pub fn normalize_ssh_url(url: &str) -> Cow<'_, str> {
    match scp_parts(url) {
        Some(_) if url.starts_with("git@") => {
            let Some((user_host, path)) = url.split_once(':') else {
                return Cow::Borrowed(url);
            };
            let path = path.trim_start_matches('/');
            Cow::Owned(format!("ssh://{user_host}/{path}"))
        }
        _ => Cow::Borrowed(url),
    }
}

/// Normalize file:// URLs so libgit2 can resolve them on Unix.
pub fn normalize_file_url(url: &str) -> Cow<'_, str> {
    let Some(after) = url.strip_prefix("file://") else {
        return Cow::Borrowed(url);
    };
    if after.contains('\\') {
        return Cow::Owned(format!("file:///{}", after.replace('\\', "/")));
    }
    if !after.is_empty() && !after.starts_with('/') {
        return Cow::Owned(format!("file:///{after}"));
    }
    Cow::Borrowed(url)
}
