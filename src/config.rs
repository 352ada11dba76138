//! Import configuration.

use std::path::PathBuf;

/// Options controlling the import pipeline.
///
/// Defaults match the common case: fixed joints are collapsed, collision
/// geometry is taken from the document as-is, and no extra package roots
/// are searched.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Merge fixed-jointed child links into their parents (default: true).
    pub merge_fixed_joints: bool,
    /// Clone visuals into collisions for links that have visuals but no
    /// collisions (default: false).
    pub collision_from_visuals: bool,
    /// Package roots searched by the mesh resolver before
    /// `ROS_PACKAGE_PATH` (default: empty).
    pub package_roots: Vec<PathBuf>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            merge_fixed_joints: true,
            collision_from_visuals: false,
            package_roots: Vec::new(),
        }
    }
}

impl ImportConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether fixed joints are collapsed.
    #[must_use]
    pub fn with_merge_fixed_joints(mut self, merge: bool) -> Self {
        self.merge_fixed_joints = merge;
        self
    }

    /// Set whether collision geometry is cloned from visuals.
    #[must_use]
    pub fn with_collision_from_visuals(mut self, clone: bool) -> Self {
        self.collision_from_visuals = clone;
        self
    }

    /// Add a package root for mesh resolution.
    #[must_use]
    pub fn with_package_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.package_roots.push(root.into());
        self
    }
}
