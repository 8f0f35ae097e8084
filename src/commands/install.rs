//! Install command implementation

use super::{Context, dim, label, name, print_json, success};
use crate::cli::InstallArgs;
use crate::error::Result;
use crate::operations::PackageManager;

/// Run install command
pub fn run(ctx: &Context, args: InstallArgs) -> Result<()> {
    let registry = ctx.registry();
    let record = PackageManager::new(&registry).install(&args.spec)?;

    if ctx.json {
        return print_json(&record);
    }

    println!(
        "{} {} {}",
        success("Installed"),
        name(&record.namespaced_name),
        dim(&format!(
            "({}, {} file(s), {} @ {})",
            record.kind,
            record.files.len(),
            record.version.git_ref(),
            record.version.commit().short()
        ))
    );
    if let Some(first) = record.files.first() {
        let location = record
            .bundle_root(ctx.paths.artifacts_dir())
            .unwrap_or_else(|| first.destination.clone());
        println!("  {} {}", label("Location:"), location.display());
    }
    Ok(())
}
