//! List and info command implementations

use super::{Context, dim, label, name, print_json};
use crate::cli::{InfoArgs, ListArgs};
use crate::domain::InstalledPackage;
use crate::error::Result;
use crate::operations::{ListFilter, PackageManager};

/// Run list command
pub fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    let registry = ctx.registry();
    let filter = ListFilter {
        kind: args.kind,
        namespace: args.namespace,
    };
    let packages = PackageManager::new(&registry).list(&filter)?;

    if ctx.json {
        return print_json(&packages);
    }
    if packages.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    println!("Installed packages ({}):", packages.len());
    println!();
    for pkg in &packages {
        println!(
            "  {} {}",
            name(&pkg.namespaced_name),
            dim(&format!(
                "{} · {} · {}",
                pkg.kind,
                pkg.spec(),
                pkg.version.commit().short()
            ))
        );
    }
    Ok(())
}

/// Run info command
pub fn info(ctx: &Context, args: InfoArgs) -> Result<()> {
    let registry = ctx.registry();
    let pkg = PackageManager::new(&registry).info(&args.name)?;

    if ctx.json {
        return print_json(&pkg);
    }
    display_package(&pkg);
    Ok(())
}

fn display_package(pkg: &InstalledPackage) {
    println!("{}", name(&pkg.namespaced_name));
    println!("  {} {}", label("Name:"), pkg.original_name);
    println!("  {} {}", label("Kind:"), pkg.kind);
    println!("  {} {}", label("Source:"), pkg.spec());
    println!(
        "  {} {} @ {}",
        label("Version:"),
        pkg.version.git_ref(),
        pkg.version.commit()
    );
    if let Some(requested) = &pkg.requested_version {
        println!("  {} {}", label("Requested:"), requested);
    }
    println!(
        "  {} {}",
        label("Installed:"),
        pkg.installed_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  {} {}",
        label("Updated:"),
        pkg.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  {} ({})", label("Files:"), pkg.files.len());
    for file in &pkg.files {
        println!("    {}", file.destination.display());
    }
}
