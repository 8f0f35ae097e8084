//! Update command implementation
//!
//! Without `--apply` this only reports drift. With it, every package that has
//! an update is reinstalled; failures are reported per package.

use super::{Context, dim, name, print_json, success};
use crate::cli::UpdateArgs;
use crate::error::{QuiverError, Result};
use crate::operations::{PackageManager, UpdateCheck};

/// Run update command
pub fn run(ctx: &Context, args: UpdateArgs) -> Result<()> {
    let registry = ctx.registry();
    let manager = PackageManager::new(&registry);

    let names = (!args.names.is_empty()).then_some(args.names.as_slice());
    let checks = manager.check_updates(names)?;

    if !args.apply {
        if ctx.json {
            return print_json(&checks);
        }
        print_checks(&checks);
        return Ok(());
    }

    let mut applied = Vec::new();
    let mut failed: Vec<(String, QuiverError)> = Vec::new();
    for check in checks.iter().filter(|c| c.has_update) {
        match manager.apply_update(&check.name) {
            Ok(record) => applied.push(record),
            Err(e) => {
                tracing::warn!(package = %check.name, error = %e, "update failed");
                failed.push((check.name.clone(), e));
            }
        }
    }

    if ctx.json {
        print_json(&serde_json::json!({
            "checks": checks,
            "applied": applied,
            "failed": failed
                .iter()
                .map(|(n, e)| serde_json::json!({ "name": n, "error": e.to_string() }))
                .collect::<Vec<_>>(),
        }))?;
    } else {
        print_checks(&checks);
        if !applied.is_empty() || !failed.is_empty() {
            println!();
        }
        for record in &applied {
            println!(
                "{} {} {}",
                success("Updated"),
                name(&record.namespaced_name),
                dim(&format!("to {}", record.version.commit().short()))
            );
        }
        for (pkg, e) in &failed {
            eprintln!("Failed to update {pkg}: {e}");
        }
    }

    match failed.into_iter().next() {
        Some((_, e)) => Err(e),
        None => Ok(()),
    }
}

fn print_checks(checks: &[UpdateCheck]) {
    if checks.is_empty() {
        println!("No packages installed.");
        return;
    }

    for check in checks {
        if !check.has_update {
            println!("  {} {}", name(&check.name), dim("up to date"));
            continue;
        }
        let latest = check.latest.get(..7).unwrap_or(&check.latest);
        println!(
            "  {} {} {}..{}",
            name(&check.name),
            success("update available"),
            check.current.short(),
            latest
        );
        for file in &check.changed_files {
            println!("      {file}");
        }
    }
}
