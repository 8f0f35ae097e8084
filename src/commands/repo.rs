//! Repo command implementation

use super::{Context, confirm, dim, label, name, print_json, success};
use crate::cli::{RepoArgs, RepoSubcommand};
use crate::error::Result;
use crate::git::PullOutcome;
use crate::progress::SyncProgress;

/// Run repo command
pub fn run(ctx: &Context, args: RepoArgs) -> Result<()> {
    match args.command {
        RepoSubcommand::Add { url, namespace } => add(ctx, &url, namespace.as_deref()),
        RepoSubcommand::List => list(ctx),
        RepoSubcommand::Remove { namespace, yes } => remove(ctx, &namespace, yes),
        RepoSubcommand::Update { namespaces } => update(ctx, &namespaces),
    }
}

fn add(ctx: &Context, url: &str, namespace: Option<&str>) -> Result<()> {
    let registration = ctx.registry().add(url, namespace)?;

    if ctx.json {
        return print_json(&registration);
    }
    println!(
        "{} {} {} {}",
        success("Registered"),
        name(&registration.namespace),
        dim("→"),
        registration.remote_url
    );
    println!("  {} {}", label("Default branch:"), registration.default_branch);
    Ok(())
}

fn list(ctx: &Context) -> Result<()> {
    let repos = ctx.registry().list()?;

    if ctx.json {
        return print_json(&repos);
    }
    if repos.is_empty() {
        println!("No repositories registered.");
        return Ok(());
    }

    println!("Registered repositories ({}):", repos.len());
    println!();
    for repo in &repos {
        println!("  {}", name(&repo.namespace));
        println!("    {} {}", label("URL:"), repo.remote_url);
        println!("    {} {}/{}", label("Repository:"), repo.owner, repo.repo_name);
        println!("    {} {}", label("Branch:"), repo.default_branch);
        println!(
            "    {} {}",
            label("Added:"),
            repo.added_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
    Ok(())
}

fn remove(ctx: &Context, namespace: &str, yes: bool) -> Result<()> {
    let registry = ctx.registry();
    // Fail on unknown namespaces before prompting
    registry.get(namespace)?;

    if !confirm(
        &format!("Remove repository '{namespace}' and its mirror?"),
        yes || ctx.json,
    )? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = registry.remove(namespace)?;
    if ctx.json {
        return print_json(&removed);
    }
    println!("{} {}", success("Removed"), name(&removed.namespace));
    println!(
        "  {}",
        dim("Packages installed from it are kept; uninstall them separately.")
    );
    Ok(())
}

fn update(ctx: &Context, namespaces: &[String]) -> Result<()> {
    let registry = ctx.registry();
    let selected = (!namespaces.is_empty()).then_some(namespaces);
    let total = match selected {
        Some(names) => names.len(),
        None => registry.list()?.len(),
    };

    let progress = SyncProgress::new(total as u64, ctx.json);
    let reports = registry.update_all(selected, |ns| progress.start(ns))?;
    progress.finish();

    let failures = reports.iter().filter(|r| r.outcome.is_err()).count();

    if ctx.json {
        let rows: Vec<serde_json::Value> = reports
            .iter()
            .map(|r| match &r.outcome {
                Ok(outcome) => serde_json::json!({ "namespace": r.namespace, "result": outcome }),
                Err(e) => serde_json::json!({ "namespace": r.namespace, "error": e.to_string() }),
            })
            .collect();
        print_json(&rows)?;
    } else if reports.is_empty() {
        println!("No repositories registered.");
    } else {
        for report in &reports {
            match &report.outcome {
                Ok(PullOutcome::UpToDate { .. }) => {
                    println!("  {} {}", name(&report.namespace), dim("up to date"));
                }
                Ok(PullOutcome::FastForwarded { from, to }) => {
                    println!(
                        "  {} {} {}..{}",
                        name(&report.namespace),
                        success("fast-forwarded"),
                        short(from),
                        short(to)
                    );
                }
                Err(e) => {
                    eprintln!("  {} failed: {e}", name(&report.namespace));
                }
            }
        }
    }

    if failures > 0 {
        return Err(crate::error::git::operation_failed(
            "sync",
            format!("{failures} of {} repositories failed to update", reports.len()),
        ));
    }
    Ok(())
}

fn short(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
