//! Mesh and texture reference resolution.
//!
//! Robot documents point at external assets with a mix of conventions:
//! `package://` URIs, paths relative to some directory that was the working
//! directory when the author exported the file, absolute paths from another
//! machine, and occasionally a pre-resolved remote location. The resolver
//! probes a fixed sequence of candidate locations and reports the first
//! existing file. Resolution only checks file existence, never content.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Colon-separated package roots consulted after the configured ones.
const PACKAGE_PATH_VAR: &str = "ROS_PACKAGE_PATH";

/// Resolve an asset reference from a robot document to a concrete path.
///
/// `urdf_path` is the document's own path, absolute or relative to
/// `asset_root`; `extra_roots` are embedder-configured package roots.
///
/// Candidates, in order:
///
/// 1. a reference naming a remote `omniverse://` location is returned
///    unmodified;
/// 2. after stripping any `scheme://` prefix, an absolute remainder is
///    accepted only if the file exists, otherwise resolution gives up;
/// 3. the reference is tested against the document's directory and each of
///    its ancestors (never the filesystem root);
/// 4. the raw reference is tested as-is;
/// 5. the reference is tested under each configured extra root, then under
///    each entry of the `ROS_PACKAGE_PATH` environment variable.
///
/// `None` means "not found"; callers are expected to skip the asset with a
/// warning rather than fail the import.
#[must_use]
pub fn resolve_mesh_path(
    asset_root: &Path,
    urdf_path: &Path,
    reference: &str,
    extra_roots: &[PathBuf],
) -> Option<PathBuf> {
    if reference.contains("omniverse://") {
        debug!(reference, "reference is on a nucleus server, assuming it is already resolved");
        return Some(PathBuf::from(reference));
    }

    let stripped = strip_scheme(reference);
    if Path::new(stripped).is_absolute() {
        if Path::new(stripped).is_file() {
            return Some(PathBuf::from(stripped));
        }
        warn!(reference, "absolute reference does not exist");
        return None;
    }

    let root_path = if urdf_path.is_absolute() {
        urdf_path.to_path_buf()
    } else {
        asset_root.join(urdf_path)
    };
    for dir in root_path.ancestors().skip(1) {
        if dir.parent().is_none() {
            // never probe the filesystem root itself
            break;
        }
        let candidate = dir.join(stripped);
        debug!(candidate = %candidate.display(), "probing document-relative candidate");
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    if Path::new(stripped).is_file() {
        return Some(PathBuf::from(stripped));
    }

    for root in extra_roots {
        let candidate = root.join(stripped);
        debug!(candidate = %candidate.display(), "probing configured package root");
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    match std::env::var(PACKAGE_PATH_VAR) {
        Ok(raw) => {
            for root in split_package_paths(&raw) {
                let candidate = Path::new(root).join(stripped);
                debug!(candidate = %candidate.display(), "probing package path");
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        Err(_) => {
            warn!("{PACKAGE_PATH_VAR} not defined, skipping package search");
        }
    }

    warn!(reference, "reference not found");
    None
}

/// Strip a `scheme://` prefix, keeping everything after the first `://`.
fn strip_scheme(reference: &str) -> &str {
    match reference.find("://") {
        Some(pos) => &reference[pos + 3..],
        None => reference,
    }
}

/// Split a colon-separated package path list, dropping empty entries.
fn split_package_paths(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(':').filter(|entry| !entry.is_empty())
}
