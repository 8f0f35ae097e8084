//! Catalog scanning of local mirrors
//!
//! A mirror is browsed through its conventional top-level directories only
//! (`bundles/`, `snippets/`, `profiles/`, `triggers/`). Each immediate entry
//! that has its kind's on-disk shape becomes a [`BrowseItem`]; everything else
//! is ignored, and a missing kind directory is simply empty.

mod frontmatter;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::kind::find_marker;
use crate::domain::{ArtifactKind, SourceShape};
use crate::error::{QuiverError, Result, fs as fs_error};
use crate::git::VersionControl;
use crate::registry::RepoRegistry;

/// An installable entry found in a mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseItem {
    pub name: String,
    /// Path inside the mirror, usable as the path of an install spec
    pub relative_path: String,
    pub kind: ArtifactKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Read-only view over the mirrors of a registry
pub struct Catalog<'a, G: VersionControl> {
    registry: &'a RepoRegistry<G>,
}

impl<'a, G: VersionControl> Catalog<'a, G> {
    pub fn new(registry: &'a RepoRegistry<G>) -> Self {
        Self { registry }
    }

    /// List the items of one namespace, optionally restricted to a kind
    ///
    /// Items come out grouped by kind in [`ArtifactKind::ALL`] order, then by name.
    pub fn browse(&self, namespace: &str, kind: Option<ArtifactKind>) -> Result<Vec<BrowseItem>> {
        self.registry.get(namespace)?;
        let mirror = self.registry.mirror(namespace)?;

        let kinds: Vec<ArtifactKind> = match kind {
            Some(kind) => vec![kind],
            None => ArtifactKind::ALL.to_vec(),
        };

        let mut items = Vec::new();
        for kind in kinds {
            items.extend(scan_kind_dir(&mirror, kind)?);
        }
        Ok(items)
    }

    /// Case-insensitive substring search on item names across every namespace
    ///
    /// Namespaces without matches are left out. A namespace whose mirror has
    /// gone missing is skipped with a warning.
    pub fn search(&self, query: &str) -> Result<BTreeMap<String, Vec<BrowseItem>>> {
        let needle = query.to_lowercase();
        let mut results = BTreeMap::new();

        for registration in self.registry.list()? {
            let items = match self.browse(&registration.namespace, None) {
                Ok(items) => items,
                Err(e @ QuiverError::MirrorMissing { .. }) => {
                    tracing::warn!(namespace = %registration.namespace, error = %e, "skipping namespace");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let matches: Vec<BrowseItem> = items
                .into_iter()
                .filter(|item| item.name.to_lowercase().contains(&needle))
                .collect();
            if !matches.is_empty() {
                results.insert(registration.namespace, matches);
            }
        }

        Ok(results)
    }
}

fn scan_kind_dir(mirror: &Path, kind: ArtifactKind) -> Result<Vec<BrowseItem>> {
    let dir = mirror.join(kind.dir_name());
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&dir)
        .map_err(|e| fs_error::read_failed(dir.display().to_string(), e.to_string()))?;

    let mut items: Vec<BrowseItem> = entries
        .flatten()
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .filter(|entry| kind.matches_entry(&entry.path()))
        .map(|entry| {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let name = match kind.shape() {
                SourceShape::Directory { .. } => file_name.clone(),
                SourceShape::File { .. } => path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file_name.clone()),
            };
            BrowseItem {
                name,
                relative_path: format!("{}/{file_name}", kind.dir_name()),
                kind,
                description: read_description(&path, kind),
            }
        })
        .collect();

    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(items)
}

/// Description from the frontmatter of the bundle marker or the file itself
fn read_description(path: &Path, kind: ArtifactKind) -> Option<String> {
    let source = match kind.shape() {
        SourceShape::Directory { marker } => find_marker(path, marker)?,
        SourceShape::File { .. } => path.to_path_buf(),
    };
    let content = fs::read_to_string(&source).ok()?;
    frontmatter::description(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{FakeGateway, create_paths, create_test_files};

    fn registry_with_mirror(files: &[(&str, &str)]) -> (tempfile::TempDir, RepoRegistry<FakeGateway>) {
        let (temp, paths) = create_paths();
        let registry = RepoRegistry::new(paths.clone(), FakeGateway::at_commit("c1"));
        registry.add("gh:acme/tools", None).unwrap();
        create_test_files(&paths.mirror_dir("acme-tool"), files);
        (temp, registry)
    }

    #[test]
    fn test_browse_lists_matching_shapes() {
        let (_temp, registry) = registry_with_mirror(&[
            (
                "bundles/greeter/BUNDLE.md",
                "---\ndescription: Says hello\n---\n# Greeter\n",
            ),
            ("bundles/greeter/README", "hi"),
            ("bundles/no-marker/notes.md", "not a bundle"),
            ("snippets/review.md", "review"),
            ("snippets/ignored.txt", "wrong extension"),
            ("triggers/pre-commit.sh", "#!/bin/sh\n"),
            ("other/thing.md", "outside the conventions"),
        ]);
        let catalog = Catalog::new(&registry);

        let items = catalog.browse("acme-tool", None).unwrap();
        let summary: Vec<(ArtifactKind, &str, &str)> = items
            .iter()
            .map(|i| (i.kind, i.name.as_str(), i.relative_path.as_str()))
            .collect();
        assert_eq!(
            summary,
            [
                (ArtifactKind::Bundle, "greeter", "bundles/greeter"),
                (ArtifactKind::Snippet, "review", "snippets/review.md"),
                (ArtifactKind::Trigger, "pre-commit", "triggers/pre-commit.sh"),
            ]
        );
        assert_eq!(items[0].description.as_deref(), Some("Says hello"));
        assert_eq!(items[1].description, None);
    }

    #[test]
    fn test_browse_by_kind() {
        let (_temp, registry) = registry_with_mirror(&[
            ("snippets/b.md", "b"),
            ("snippets/a.md", "a"),
            ("profiles/reviewer.md", "r"),
        ]);
        let catalog = Catalog::new(&registry);

        let items = catalog
            .browse("acme-tool", Some(ArtifactKind::Snippet))
            .unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);

        assert!(
            catalog
                .browse("acme-tool", Some(ArtifactKind::Bundle))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_browse_errors() {
        let (_temp, registry) = registry_with_mirror(&[]);
        let catalog = Catalog::new(&registry);

        let err = catalog.browse("nope", None).unwrap_err();
        assert!(matches!(err, QuiverError::RepositoryNotFound { .. }));

        std::fs::remove_dir_all(registry.paths().mirror_dir("acme-tool")).unwrap();
        let err = catalog.browse("acme-tool", None).unwrap_err();
        assert!(matches!(err, QuiverError::MirrorMissing { .. }));
    }

    #[test]
    fn test_search_groups_by_namespace() {
        let (_temp, registry) = registry_with_mirror(&[
            ("snippets/Code-Review.md", "x"),
            ("profiles/reviewer.md", "x"),
            ("triggers/lint.sh", "x"),
        ]);
        registry.add("gh:beta/tools", None).unwrap();
        create_test_files(
            &registry.paths().mirror_dir("beta-tool"),
            &[("snippets/preview.md", "x")],
        );
        registry.add("gh:gamma/tools", None).unwrap();
        let catalog = Catalog::new(&registry);

        let results = catalog.search("VIEW").unwrap();
        let namespaces: Vec<_> = results.keys().map(String::as_str).collect();
        assert_eq!(namespaces, ["acme-tool", "beta-tool"]);

        let acme: Vec<_> = results["acme-tool"].iter().map(|i| i.name.as_str()).collect();
        assert_eq!(acme, ["Code-Review", "reviewer"]);
        // Only names are matched, not paths
        assert!(catalog.search("snippets").unwrap().is_empty());
    }

    #[test]
    fn test_search_skips_missing_mirrors() {
        let (_temp, registry) = registry_with_mirror(&[("snippets/review.md", "x")]);
        registry.add("gh:beta/tools", None).unwrap();
        std::fs::remove_dir_all(registry.paths().mirror_dir("beta-tool")).unwrap();

        let results = Catalog::new(&registry).search("review").unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.contains_key("acme-tool"));
    }
}
