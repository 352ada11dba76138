//! Import pipeline.
//!
//! Runs the full flow from a URDF document to a robot ready for a
//! downstream consumer: parse, optional fixed-joint collapse, optional
//! collision-from-visuals preprocessing, and kinematic tree derivation.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::chain::{KinematicChain, compute_kinematic_chain};
use crate::collapse::collapse_fixed_joints;
use crate::config::ImportConfig;
use crate::error::Result;
use crate::parser::parse_urdf_str;
use crate::types::{Collision, UrdfRobot};

/// An imported robot: the processed model plus its derived kinematic tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRobot {
    /// The robot model after all configured processing steps.
    pub robot: UrdfRobot,
    /// The kinematic tree rooted at the robot's root link.
    pub chain: KinematicChain,
}

/// URDF importer with configuration options.
#[derive(Debug, Clone, Default)]
pub struct UrdfImporter {
    /// Import configuration.
    pub config: ImportConfig,
}

impl UrdfImporter {
    /// Create an importer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an importer with the given configuration.
    #[must_use]
    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Import a URDF file located under an asset root.
    ///
    /// The file path is joined onto the root; pass an empty root to use the
    /// path as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or on any parse or
    /// processing failure (see [`import_str`](Self::import_str)).
    pub fn import_file(
        &self,
        root: impl AsRef<Path>,
        file: impl AsRef<Path>,
    ) -> Result<ImportedRobot> {
        let path = root.as_ref().join(file);
        let xml = fs::read_to_string(path)?;
        self.import_str(&xml)
    }

    /// Import a URDF document from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the processed model has no
    /// usable kinematic tree.
    pub fn import_str(&self, xml: &str) -> Result<ImportedRobot> {
        let robot = parse_urdf_str(xml)?;
        self.process(robot)
    }

    /// Run the configured processing steps on a parsed model.
    ///
    /// # Errors
    ///
    /// Returns an error if the kinematic tree cannot be derived.
    pub fn process(&self, mut robot: UrdfRobot) -> Result<ImportedRobot> {
        if self.config.merge_fixed_joints {
            collapse_fixed_joints(&mut robot)?;
        }
        // Runs after collapsing, so cloned collisions cover geometry that
        // migrated up from merged links.
        if self.config.collision_from_visuals {
            collisions_from_visuals(&mut robot);
        }
        let chain = compute_kinematic_chain(&robot)?;
        Ok(ImportedRobot { robot, chain })
    }
}

/// Give every link that has visuals but no collisions a collision copy of
/// each visual, with the same name, origin, and geometry.
fn collisions_from_visuals(robot: &mut UrdfRobot) {
    for link in robot.links.values_mut() {
        if link.collisions.is_empty() && !link.visuals.is_empty() {
            debug!(
                link = %link.name,
                count = link.visuals.len(),
                "cloning visuals into collisions"
            );
            link.collisions = link
                .visuals
                .iter()
                .map(|v| Collision {
                    name: v.name.clone(),
                    origin: v.origin,
                    geometry: v.geometry.clone(),
                })
                .collect();
        }
    }
}

/// Import a URDF file with default settings.
///
/// # Errors
///
/// Returns an error if the file cannot be read or imported.
pub fn import_urdf_file(path: impl AsRef<Path>) -> Result<ImportedRobot> {
    UrdfImporter::default().import_file("", path)
}

/// Import a URDF string with default settings.
///
/// # Errors
///
/// Returns an error if parsing or processing fails.
pub fn import_urdf_str(xml: &str) -> Result<ImportedRobot> {
    UrdfImporter::default().import_str(xml)
}
