//! Fetching and fast-forward pulls

use git2::Repository;
use git2::build::CheckoutBuilder;

use super::PullOutcome;
use super::auth::fetch_options;
use super::refs::{head_branch, head_commit};
use crate::error::{Result, git as git_error};

/// Fetch `origin` using its configured refspecs
pub fn fetch(repo: &Repository) -> Result<()> {
    let mut remote = repo
        .find_remote("origin")
        .map_err(|e| git_error::failed("fetch", &e))?;
    let mut options = fetch_options(None);
    remote
        .fetch::<&str>(&[], Some(&mut options), None)
        .map_err(|e| git_error::failed("fetch", &e))?;
    tracing::debug!(path = %repo.path().display(), "fetched origin");
    Ok(())
}

/// Fetch, then fast-forward the checked-out branch to its upstream
///
/// Fails if HEAD is detached or the local branch has diverged.
pub fn pull_fast_forward(repo: &Repository) -> Result<PullOutcome> {
    let branch = head_branch(repo)?
        .ok_or_else(|| git_error::operation_failed("pull", "HEAD is detached"))?;
    let before = head_commit(repo)?;

    fetch(repo)?;

    let fail = |e: git2::Error| git_error::failed("pull", &e);
    let upstream = repo
        .find_reference(&format!("refs/remotes/origin/{branch}"))
        .map_err(fail)?;
    let target = repo
        .reference_to_annotated_commit(&upstream)
        .map_err(fail)?;
    let (analysis, _) = repo.merge_analysis(&[&target]).map_err(fail)?;

    if analysis.is_up_to_date() {
        return Ok(PullOutcome::UpToDate { commit: before });
    }
    if !analysis.is_fast_forward() {
        return Err(git_error::operation_failed(
            "pull",
            format!("branch '{branch}' has diverged from origin; not possible to fast-forward"),
        ));
    }

    let refname = format!("refs/heads/{branch}");
    let mut local = repo.find_reference(&refname).map_err(fail)?;
    local
        .set_target(target.id(), "quiver: fast-forward")
        .map_err(fail)?;
    repo.set_head(&refname).map_err(fail)?;
    let mut checkout = CheckoutBuilder::new();
    checkout.force();
    repo.checkout_head(Some(&mut checkout)).map_err(fail)?;

    let after = target.id().to_string();
    tracing::debug!(%branch, from = %before, to = %after, "fast-forwarded");
    Ok(PullOutcome::FastForwarded {
        from: before,
        to: after,
    })
}
