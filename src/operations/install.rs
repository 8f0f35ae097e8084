//! Install: copy an artifact out of a mirror and record it in the ledger

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use super::PackageManager;
use crate::config::utils::RecordContainer;
use crate::domain::{
    ArtifactKind, CommitId, InstalledPackage, PackageFile, PackageVersion, SourceShape,
    namespaced_name,
};
use crate::error::{Result, package, spec as spec_error};
use crate::git::VersionControl;
use crate::hash::ledger_hash;
use crate::source::InstallSpec;
use crate::transaction::Transaction;

/// Where a spec's path points inside a mirror
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedSource {
    kind: ArtifactKind,
    original_name: String,
    /// Normalized path relative to the mirror root, without a trailing `/`
    source_path: String,
}

/// Derive kind and original name from the path conventions
///
/// Bundles are addressed as exactly `bundles/<name>`; file kinds may be nested
/// and are named after the file stem of their last segment.
fn resolve_source(spec: &InstallSpec) -> Result<ResolvedSource> {
    let input = spec.to_string();
    let path = spec.path.trim_end_matches('/');

    if path.starts_with('/') || Path::new(path).is_absolute() {
        return Err(spec_error::invalid(&input, "path must be relative to the repository"));
    }
    let segments: Vec<&str> = path.split('/').collect();
    if segments
        .iter()
        .any(|s| s.is_empty() || *s == "." || *s == "..")
    {
        return Err(spec_error::invalid(
            &input,
            "path may not contain empty, '.' or '..' segments",
        ));
    }

    let kind = ArtifactKind::from_dir_name(segments[0])
        .ok_or_else(|| spec_error::unknown_kind(segments[0], path))?;

    let original_name = match kind.shape() {
        SourceShape::Directory { .. } => match segments.as_slice() {
            [_, name] => (*name).to_string(),
            _ => {
                return Err(spec_error::invalid(
                    &input,
                    format!("{kind} paths must be {}/<name>", kind.dir_name()),
                ));
            }
        },
        SourceShape::File { .. } => {
            if segments.len() < 2 {
                return Err(spec_error::invalid(
                    &input,
                    format!("path names no {kind} inside {}/", kind.dir_name()),
                ));
            }
            let last = segments[segments.len() - 1];
            Path::new(last)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| spec_error::invalid(&input, "file name is empty"))?
        }
    };

    Ok(ResolvedSource {
        kind,
        original_name,
        source_path: path.to_string(),
    })
}

/// Extension, with its dot, that the installed copy of `source_path` carries
///
/// File kinds keep the source file's own extension, including its case.
fn destination_extension(kind: ArtifactKind, source_path: &str) -> String {
    match kind.shape() {
        SourceShape::Directory { .. } => String::new(),
        SourceShape::File { .. } => Path::new(source_path)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default(),
    }
}

impl<G: VersionControl> PackageManager<'_, G> {
    /// Install the artifact addressed by `spec`
    pub fn install(&self, spec: &str) -> Result<InstalledPackage> {
        let spec = InstallSpec::parse(spec)?;
        self.install_spec(&spec, None)
    }

    /// Install a parsed spec; `installed_at` carries over the original install
    /// time when reinstalling during an update
    pub(super) fn install_spec(
        &self,
        spec: &InstallSpec,
        installed_at: Option<DateTime<Utc>>,
    ) -> Result<InstalledPackage> {
        let registration = self.registry.get(&spec.namespace)?;
        let resolved = resolve_source(spec)?;
        let name = namespaced_name(&spec.namespace, &resolved.original_name);

        let ledger_path = self.paths().ledger_file();
        let mut ledger = self.load_ledger()?;
        if ledger.contains(&name) {
            return Err(package::already_installed(name));
        }

        if let Some(version) = &spec.version {
            tracing::warn!(
                package = %name,
                version = %version,
                "version pinning is not supported; installing the mirror's current commit"
            );
        }

        let mirror = self.registry.mirror(&spec.namespace)?;
        let source = mirror.join(&resolved.source_path);
        if !resolved.kind.matches_entry(&source) {
            return Err(package::install_failed(
                &name,
                format!(
                    "'{}' is not a {} in repository '{}'",
                    resolved.source_path, resolved.kind, spec.namespace
                ),
            ));
        }

        let sha = match self.gateway().current_commit(&mirror) {
            Ok(sha) => CommitId::Known(sha),
            Err(e) => {
                tracing::warn!(package = %name, error = %e, "could not resolve mirror commit");
                CommitId::Unknown
            }
        };

        let destination = resolved.kind.destination(
            self.paths().artifacts_dir(),
            &name,
            &destination_extension(resolved.kind, &resolved.source_path),
        );
        if let Some(owner) = ledger.owner_of(&destination) {
            return Err(package::install_failed(
                &name,
                format!(
                    "{} is owned by package '{}'",
                    destination.display(),
                    owner.namespaced_name
                ),
            ));
        }
        if fs::symlink_metadata(&destination).is_ok() {
            return Err(package::install_failed(
                &name,
                format!("{} already exists", destination.display()),
            ));
        }

        let mut transaction = Transaction::new(&name);
        let files = match resolved.kind.shape() {
            SourceShape::Directory { .. } => {
                copy_tree(&mut transaction, &source, &destination, &resolved.source_path)
            }
            SourceShape::File { .. } => {
                copy_file(&mut transaction, &source, &destination, &resolved.source_path)
                    .map(|file| vec![file])
            }
        }
        .map_err(|reason| package::install_failed(&name, reason))?;

        if resolved.kind.is_executable() {
            for file in &files {
                make_executable(&file.destination)
                    .map_err(|e| package::install_failed(&name, e))?;
            }
        }

        let now = Utc::now();
        let record = InstalledPackage {
            namespaced_name: name.clone(),
            original_name: resolved.original_name,
            kind: resolved.kind,
            namespace: spec.namespace.clone(),
            source_path: resolved.source_path,
            version: PackageVersion::Commit {
                sha,
                git_ref: registration.default_branch,
            },
            requested_version: spec.version.clone(),
            files,
            installed_at: installed_at.unwrap_or(now),
            updated_at: now,
        };

        ledger.insert(record.clone())?;
        // Dropping the transaction on error removes every copied file
        ledger
            .save(&ledger_path)
            .map_err(|e| package::install_failed(&name, e.to_string()))?;
        tracing::debug!(
            package = %name,
            created = transaction.created_files().len(),
            "committing install"
        );
        transaction.commit();

        tracing::info!(package = %name, files = record.files.len(), "installed");
        Ok(record)
    }
}

/// Copy one file, recording it in the transaction and the returned entry
fn copy_file(
    transaction: &mut Transaction,
    source: &Path,
    destination: &Path,
    source_rel: &str,
) -> std::result::Result<PackageFile, String> {
    if let Some(parent) = destination.parent() {
        transaction
            .create_dir_all(parent)
            .map_err(|e| format!("create {}: {e}", parent.display()))?;
    }

    transaction.track_file_created(destination);
    fs::copy(source, destination).map_err(|e| format!("copy {source_rel}: {e}"))?;

    Ok(PackageFile {
        source: source_rel.to_string(),
        destination: destination.to_path_buf(),
        hash: ledger_hash(destination),
    })
}

/// Copy a bundle directory recursively, skipping `.git`
///
/// Entries are visited in file-name order so the ledger lists files stably.
fn copy_tree(
    transaction: &mut Transaction,
    source: &Path,
    destination: &Path,
    source_path: &str,
) -> std::result::Result<Vec<PackageFile>, String> {
    transaction
        .create_dir_all(destination)
        .map_err(|e| format!("create {}: {e}", destination.display()))?;

    let mut files = Vec::new();
    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|e| format!("walk {source_path}: {e}"))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| e.to_string())?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            transaction
                .create_dir_all(&target)
                .map_err(|e| format!("create {}: {e}", target.display()))?;
            continue;
        }

        let source_rel = format!("{source_path}/{}", to_slash(relative));
        files.push(copy_file(transaction, entry.path(), &target, &source_rel)?);
    }

    Ok(files)
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::result::Result<(), String> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| format!("chmod {}: {e}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::result::Result<(), String> {
    Ok(())
}
