//! Uninstall command implementation

use super::{Context, confirm, name, print_json, success};
use crate::cli::UninstallArgs;
use crate::error::Result;
use crate::operations::PackageManager;

/// Run uninstall command
pub fn run(ctx: &Context, args: UninstallArgs) -> Result<()> {
    let registry = ctx.registry();
    let manager = PackageManager::new(&registry);
    let pkg = manager.info(&args.name)?;

    if !ctx.json {
        println!("The following package will be uninstalled:");
        println!("  - {} ({} file(s))", pkg.namespaced_name, pkg.files.len());
        println!();
    }
    if !confirm("Proceed with uninstall?", args.yes || ctx.json)? {
        println!("Uninstall cancelled.");
        return Ok(());
    }

    let removed = manager.uninstall(&args.name)?;
    if ctx.json {
        return print_json(&removed);
    }
    println!("{} {}", success("Uninstalled"), name(&removed.namespaced_name));
    Ok(())
}
