//! URDF robot-description import.
//!
//! This crate parses URDF XML into a strongly typed robot model and derives
//! what a consumer needs to instantiate it:
//!
//! - **Document parsing** - links, joints, materials, loop joints, fixed
//!   frames, and camera/ray sensors, with every name sanitized into
//!   identifier-safe form
//! - **Kinematic tree derivation** - strict root resolution and a
//!   deterministic, joint-name-ordered tree
//! - **Fixed-joint collapse** - folds fixed-jointed children into their
//!   parents, combining mass properties with the parallel-axis theorem
//! - **Inertia diagonalization** - principal moments plus an orientation
//!   from a symmetric tensor
//! - **Mesh reference resolution** - maps `package://` and relative
//!   references onto the filesystem
//!
//! # Example
//!
//! ```no_run
//! use urdf_import::{Geometry, import_urdf_file};
//!
//! let imported = import_urdf_file("robots/arm.urdf").unwrap();
//! println!("root link: {}", imported.chain.root.link_name);
//! for (name, link) in &imported.robot.links {
//!     for collision in &link.collisions {
//!         if let Geometry::Mesh { filename, .. } = &collision.geometry {
//!             println!("{name} references {filename}");
//!         }
//!     }
//! }
//! ```
//!
//! Parsing alone, without the import pipeline:
//!
//! ```
//! use urdf_import::parse_urdf_str;
//!
//! let robot = parse_urdf_str(
//!     r#"
//!     <robot name="cart">
//!         <link name="base"/>
//!         <link name="wheel"/>
//!         <joint name="axle" type="continuous">
//!             <parent link="base"/>
//!             <child link="wheel"/>
//!             <axis xyz="0 1 0"/>
//!         </joint>
//!     </robot>
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(robot.root_link_name, "base");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod chain;
mod collapse;
mod config;
mod error;
mod inertia;
mod loader;
mod parser;
mod resolver;
mod sanitize;
mod types;

pub use chain::{KinematicChain, KinematicNode, compute_kinematic_chain, find_root_link};
pub use collapse::collapse_fixed_joints;
pub use config::ImportConfig;
pub use error::{Result, UrdfError};
pub use inertia::diagonalize;
pub use loader::{ImportedRobot, UrdfImporter, import_urdf_file, import_urdf_str};
pub use parser::{parse_urdf_file, parse_urdf_str};
pub use resolver::resolve_mesh_path;
pub use sanitize::sanitize_identifier;
pub use types::{
    Camera, Collision, Color, Geometry, Inertia, Inertial, Joint, JointDrive, JointDriveTarget,
    JointDriveType, JointDynamics, JointLimit, JointMimic, JointType, Lidar, LidarDimensions, Link,
    LoopJoint, Material, Transform, UrdfRobot, Visual,
};
