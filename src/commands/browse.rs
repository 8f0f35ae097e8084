//! Browse and search command implementations

use std::collections::BTreeMap;

use super::{Context, dim, label, name, print_json};
use crate::catalog::{BrowseItem, Catalog};
use crate::cli::{BrowseArgs, SearchArgs};
use crate::error::Result;

/// Run browse command
pub fn run(ctx: &Context, args: BrowseArgs) -> Result<()> {
    let registry = ctx.registry();
    let catalog = Catalog::new(&registry);

    let namespaces = match args.namespace {
        Some(ns) => vec![ns],
        None => registry.list()?.into_iter().map(|r| r.namespace).collect(),
    };

    let mut results = BTreeMap::new();
    for namespace in namespaces {
        let items = catalog.browse(&namespace, args.kind)?;
        results.insert(namespace, items);
    }

    if ctx.json {
        return print_json(&results);
    }
    if results.is_empty() {
        println!("No repositories registered.");
        return Ok(());
    }
    display_groups(&results);
    Ok(())
}

/// Run search command
pub fn search(ctx: &Context, args: SearchArgs) -> Result<()> {
    let registry = ctx.registry();
    let results = Catalog::new(&registry).search(&args.query)?;

    if ctx.json {
        return print_json(&results);
    }
    if results.is_empty() {
        println!("No artifacts match '{}'.", args.query);
        return Ok(());
    }
    display_groups(&results);
    Ok(())
}

fn display_groups(groups: &BTreeMap<String, Vec<BrowseItem>>) {
    for (namespace, items) in groups {
        println!("{} ({})", label(namespace), items.len());
        if items.is_empty() {
            println!("  {}", dim("nothing to install"));
        }
        for item in items {
            println!(
                "  {} {} {}",
                name(&item.name),
                dim(&format!("[{}]", item.kind)),
                dim(&format!("{namespace}:{}", item.relative_path))
            );
            if let Some(description) = &item.description {
                println!("      {description}");
            }
        }
        println!();
    }
}
