//! Intermediate representation for parsed robot descriptions.
//!
//! These types mirror the URDF document structure with Rust-native types.
//! All cross-references between joints and links are by name, so topology
//! rewrites (fixed-joint collapsing) are string updates rather than pointer
//! surgery. Fields the document may omit are `Option`; zero is never
//! overloaded to mean "absent".

use std::collections::BTreeMap;

use nalgebra::{Matrix3, Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Transform
// ============================================================================

/// A rigid-body transform: position plus unit-quaternion rotation.
///
/// Composition chains frames the standard way: `a.compose(&b)` applies `b`
/// first, then `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position of the child frame origin in the parent frame.
    pub position: Point3<f64>,
    /// Orientation of the child frame in the parent frame.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a transform from position and rotation.
    #[must_use]
    pub const fn new(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// Create a transform from a position with identity rotation.
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a transform from URDF `xyz` and fixed-axis XYZ `rpy` values.
    ///
    /// URDF rotations apply roll about X, then pitch about Y, then yaw
    /// about Z, all in the fixed parent frame.
    #[must_use]
    pub fn from_xyz_rpy(xyz: Vector3<f64>, rpy: Vector3<f64>) -> Self {
        Self {
            position: Point3::from(xyz),
            rotation: UnitQuaternion::from_euler_angles(rpy.x, rpy.y, rpy.z),
        }
    }

    /// Transform a point from the child frame into the parent frame.
    #[must_use]
    pub fn transform_point(&self, local: &Point3<f64>) -> Point3<f64> {
        self.position + self.rotation * local.coords
    }

    /// Rotate a vector from the child frame into the parent frame.
    #[must_use]
    pub fn transform_vector(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }

    /// Compose two transforms: `self` applied after `other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(&other.position),
            rotation: self.rotation * other.rotation,
        }
    }

    /// The inverse transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: Point3::from(-(inv_rotation * self.position.coords)),
            rotation: inv_rotation,
        }
    }

    /// The rotation as a 3x3 matrix.
    #[must_use]
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        self.rotation.to_rotation_matrix().into_inner()
    }
}

// ============================================================================
// Inertial Properties
// ============================================================================

/// The six independent components of a symmetric inertia tensor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inertia {
    /// Moment of inertia about X.
    pub ixx: f64,
    /// Product of inertia XY.
    pub ixy: f64,
    /// Product of inertia XZ.
    pub ixz: f64,
    /// Moment of inertia about Y.
    pub iyy: f64,
    /// Product of inertia YZ.
    pub iyz: f64,
    /// Moment of inertia about Z.
    pub izz: f64,
}

impl Inertia {
    /// Create a diagonal inertia tensor.
    #[must_use]
    pub fn diagonal(ixx: f64, iyy: f64, izz: f64) -> Self {
        Self {
            ixx,
            iyy,
            izz,
            ..Self::default()
        }
    }

    /// Expand to the full symmetric 3x3 matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.ixx, self.ixy, self.ixz, self.ixy, self.iyy, self.iyz, self.ixz, self.iyz,
            self.izz,
        )
    }

    /// Read the six components back off a symmetric matrix.
    #[must_use]
    pub fn from_matrix(m: &Matrix3<f64>) -> Self {
        Self {
            ixx: m[(0, 0)],
            ixy: m[(0, 1)],
            ixz: m[(0, 2)],
            iyy: m[(1, 1)],
            iyz: m[(1, 2)],
            izz: m[(2, 2)],
        }
    }
}

/// Inertial properties of a link.
///
/// The document may supply any subset of origin, mass, and inertia; each is
/// tracked independently. The collapser fills all three when it merges a
/// child's mass properties into a parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inertial {
    /// Center-of-mass frame relative to the link frame.
    pub origin: Option<Transform>,
    /// Mass in kg.
    pub mass: Option<f64>,
    /// Inertia tensor about the center of mass, in the COM frame.
    pub inertia: Option<Inertia>,
}

impl Inertial {
    /// Inertial with a mass only.
    #[must_use]
    pub fn from_mass(mass: f64) -> Self {
        Self {
            mass: Some(mass),
            ..Self::default()
        }
    }

    /// True when the document supplied none of the three fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origin.is_none() && self.mass.is_none() && self.inertia.is_none()
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// A visual or collision shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geometry {
    /// Box with full extents in meters.
    Box {
        /// Extent along each axis.
        size: Vector3<f64>,
    },
    /// Cylinder along the Z axis.
    Cylinder {
        /// Radius in meters.
        radius: f64,
        /// Length in meters.
        length: f64,
    },
    /// Capsule along the Z axis.
    Capsule {
        /// Radius in meters.
        radius: f64,
        /// Length of the cylindrical segment in meters.
        length: f64,
    },
    /// Sphere.
    Sphere {
        /// Radius in meters.
        radius: f64,
    },
    /// External mesh reference, resolved later against the asset roots.
    Mesh {
        /// Raw reference string from the document.
        filename: String,
        /// Per-axis scale, if the document provided one.
        scale: Option<Vector3<f64>>,
    },
}

// ============================================================================
// Materials
// ============================================================================

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red, 0..=1.
    pub r: f64,
    /// Green, 0..=1.
    pub g: f64,
    /// Blue, 0..=1.
    pub b: f64,
    /// Alpha, 0..=1.
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

impl Color {
    /// Create a color from components.
    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// A material definition or reference.
///
/// Top-level materials are named; a visual may instead carry an inline
/// unnamed material with its own color or texture.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Material name; `None` for inline definitions.
    pub name: Option<String>,
    /// Diffuse color.
    pub color: Option<Color>,
    /// Texture file reference.
    pub texture_file: Option<String>,
}

impl Material {
    /// A named reference to a top-level material.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Visual and Collision
// ============================================================================

/// Visual geometry attached to a link.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Visual {
    /// Optional name.
    pub name: Option<String>,
    /// Pose of the geometry in the link frame.
    pub origin: Transform,
    /// The shape.
    pub geometry: Geometry,
    /// Material reference or inline definition.
    pub material: Option<Material>,
}

/// Collision geometry attached to a link.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Collision {
    /// Optional name.
    pub name: Option<String>,
    /// Pose of the geometry in the link frame.
    pub origin: Transform,
    /// The shape.
    pub geometry: Geometry,
}

// ============================================================================
// Sensors
// ============================================================================

/// A camera sensor attached to a link.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Camera {
    /// Sensor name.
    pub name: String,
    /// Pose in the parent link frame.
    pub origin: Transform,
    /// Frames per second.
    pub update_rate: f64,
    /// Image width in pixels.
    pub width: f64,
    /// Image height in pixels.
    pub height: f64,
    /// Pixel format, as given in the document.
    pub format: Option<String>,
    /// Horizontal field of view in radians.
    pub hfov: f64,
    /// Near clip distance in meters.
    pub clip_near: f64,
    /// Far clip distance in meters; never less than `clip_near`.
    pub clip_far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            name: String::new(),
            origin: Transform::identity(),
            update_rate: 30.0,
            width: 0.0,
            height: 0.0,
            format: None,
            hfov: 0.0,
            clip_near: 0.0,
            clip_far: 1000.0,
        }
    }
}

/// One scan plane of a ray sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LidarDimensions {
    /// Ray count per scan.
    pub samples: usize,
    /// Angular resolution in radians.
    pub resolution: f64,
    /// Scan start angle in radians.
    pub min_angle: f64,
    /// Scan end angle in radians.
    pub max_angle: f64,
}

/// A ray (lidar) sensor attached to a link.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lidar {
    /// Sensor name.
    pub name: String,
    /// Pose in the parent link frame.
    pub origin: Transform,
    /// Scans per second.
    pub update_rate: f64,
    /// Simulator-specific configuration string, passed through untouched.
    pub config: Option<String>,
    /// Horizontal scan plane, when the document defines one.
    pub horizontal: Option<LidarDimensions>,
    /// Vertical scan plane, when the document defines one.
    pub vertical: Option<LidarDimensions>,
}

// ============================================================================
// Link
// ============================================================================

/// A rigid body in the robot description.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Link {
    /// Link name (unique, sanitized).
    pub name: String,
    /// Mass properties.
    pub inertial: Inertial,
    /// Visual geometries.
    pub visuals: Vec<Visual>,
    /// Collision geometries.
    pub collisions: Vec<Collision>,
    /// Links folded into this one by the collapser, and fixed frames declared
    /// on it, each with its pose in this link's frame. Kept so downstream
    /// frame reconstruction can still locate vanished links.
    pub merged_children: BTreeMap<String, Transform>,
    /// Camera sensors attached to this link.
    pub cameras: Vec<Camera>,
    /// Ray sensors attached to this link.
    pub lidars: Vec<Lidar>,
}

impl Link {
    /// Create an empty link.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the inertial properties.
    #[must_use]
    pub fn with_inertial(mut self, inertial: Inertial) -> Self {
        self.inertial = inertial;
        self
    }

    /// Add a visual geometry.
    #[must_use]
    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visuals.push(visual);
        self
    }

    /// Add a collision geometry.
    #[must_use]
    pub fn with_collision(mut self, collision: Collision) -> Self {
        self.collisions.push(collision);
        self
    }
}

// ============================================================================
// Joint
// ============================================================================

/// Joint type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointType {
    /// Rotation about the axis, with limits.
    Revolute,
    /// Unlimited rotation about the axis.
    Continuous,
    /// Translation along the axis, with limits.
    Prismatic,
    /// No relative motion.
    Fixed,
    /// Free 6-DOF motion.
    Floating,
    /// Planar motion normal to the axis.
    Planar,
    /// Ball joint.
    Spherical,
}

impl JointType {
    /// Parse a joint type keyword.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "revolute" => Some(Self::Revolute),
            "continuous" => Some(Self::Continuous),
            "prismatic" => Some(Self::Prismatic),
            "fixed" => Some(Self::Fixed),
            "floating" => Some(Self::Floating),
            "planar" => Some(Self::Planar),
            "spherical" => Some(Self::Spherical),
            _ => None,
        }
    }

    /// The keyword for this joint type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revolute => "revolute",
            Self::Continuous => "continuous",
            Self::Prismatic => "prismatic",
            Self::Fixed => "fixed",
            Self::Floating => "floating",
            Self::Planar => "planar",
            Self::Spherical => "spherical",
        }
    }

    /// Degrees of freedom this joint allows.
    #[must_use]
    pub fn dof(&self) -> usize {
        match self {
            Self::Fixed => 0,
            Self::Revolute | Self::Continuous | Self::Prismatic => 1,
            Self::Planar | Self::Spherical => 3,
            Self::Floating => 6,
        }
    }
}

/// Joint position/effort/velocity limits.
///
/// Defaults are unbounded; the parser demands an explicit `<limit>` for
/// revolute and prismatic joints.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointLimit {
    /// Lower position limit (rad or m).
    pub lower: f64,
    /// Upper position limit (rad or m).
    pub upper: f64,
    /// Maximum effort (N or Nm).
    pub effort: f64,
    /// Maximum velocity (rad/s or m/s).
    pub velocity: f64,
}

impl Default for JointLimit {
    fn default() -> Self {
        Self {
            lower: -f64::MAX,
            upper: f64::MAX,
            effort: f64::MAX,
            velocity: f64::MAX,
        }
    }
}

/// Joint friction and damping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointDynamics {
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Coulomb friction.
    pub friction: f64,
    /// Spring stiffness (the `spring_stiffness` attribute).
    pub stiffness: f64,
}

/// What quantity a joint drive tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointDriveTarget {
    /// No drive target.
    None,
    /// Track a position setpoint.
    #[default]
    Position,
    /// Track a velocity setpoint.
    Velocity,
}

/// How a joint drive applies its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointDriveType {
    /// Mass-normalized drive.
    Acceleration,
    /// Direct force/torque drive.
    #[default]
    Force,
}

/// Drive setup for a joint.
///
/// Not parsed from URDF; the embedding application fills these from its own
/// configuration before emission.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointDrive {
    /// Drive setpoint.
    pub target: f64,
    /// Tracked quantity.
    pub target_type: JointDriveTarget,
    /// Output mode.
    pub drive_type: JointDriveType,
}

/// A mimic constraint slaving this joint to another.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointMimic {
    /// The driving joint's name.
    pub joint: String,
    /// Position multiplier.
    pub multiplier: f64,
    /// Position offset.
    pub offset: f64,
}

/// A typed connection between a parent link and a child link.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Joint name (unique, sanitized).
    pub name: String,
    /// Joint type.
    pub joint_type: JointType,
    /// Child frame pose in the parent link frame.
    pub origin: Transform,
    /// Parent link name.
    pub parent_link_name: String,
    /// Child link name.
    pub child_link_name: String,
    /// Motion axis in the joint frame.
    pub axis: Vector3<f64>,
    /// Damping/friction/stiffness.
    pub dynamics: JointDynamics,
    /// Position/effort/velocity limits.
    pub limit: JointLimit,
    /// Drive setup, supplied by the embedder.
    pub drive: JointDrive,
    /// Mimic constraint, if this joint follows another.
    pub mimic: Option<JointMimic>,
    /// Joints mimicking this one: name to position offset.
    pub mimic_children: BTreeMap<String, f64>,
    /// Author opt-out: never merge this joint's child into its parent.
    pub dont_collapse: bool,
    /// The joint whose child link is this joint's parent link. Filled by the
    /// post-parse linkage pass; `None` for joints hanging off the root.
    pub parent_joint: Option<String>,
    /// Joints whose parent link is this joint's child link. Filled by the
    /// post-parse linkage pass.
    pub children_joints: Vec<String>,
}

impl Joint {
    /// Create a joint connecting two links.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        joint_type: JointType,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type,
            origin: Transform::identity(),
            parent_link_name: parent.into(),
            child_link_name: child.into(),
            axis: Vector3::x(),
            dynamics: JointDynamics::default(),
            limit: JointLimit::default(),
            drive: JointDrive::default(),
            mimic: None,
            mimic_children: BTreeMap::new(),
            dont_collapse: false,
            parent_joint: None,
            children_joints: Vec::new(),
        }
    }

    /// Set the joint origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Transform) -> Self {
        self.origin = origin;
        self
    }

    /// Set the joint axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Vector3<f64>) -> Self {
        self.axis = axis;
        self
    }

    /// Set the joint limits.
    #[must_use]
    pub fn with_limit(mut self, limit: JointLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Set the joint dynamics.
    #[must_use]
    pub fn with_dynamics(mut self, dynamics: JointDynamics) -> Self {
        self.dynamics = dynamics;
        self
    }
}

// ============================================================================
// Loop Joint
// ============================================================================

/// An explicit kinematic-loop closure between two links.
///
/// Loop joints are carried as data for the embedder; they never participate
/// in the kinematic tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopJoint {
    /// Loop joint name.
    pub name: String,
    /// Joint type, when the document named a known one.
    pub joint_type: Option<JointType>,
    /// The two attached links.
    pub link_names: [String; 2],
    /// Attachment pose on each link, in that link's frame.
    pub link_poses: [Transform; 2],
}

// ============================================================================
// Robot
// ============================================================================

/// A complete parsed robot description.
///
/// Maps are ordered by name so iteration (and therefore derived child
/// ordering) is deterministic across runs and platforms.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UrdfRobot {
    /// Robot name; may be empty.
    pub name: String,
    /// Name of the root link, set by root resolution at the end of parsing.
    pub root_link_name: String,
    /// All links, keyed by name.
    pub links: BTreeMap<String, Link>,
    /// All joints, keyed by name.
    pub joints: BTreeMap<String, Joint>,
    /// Top-level materials, keyed by name.
    pub materials: BTreeMap<String, Material>,
    /// Loop joints, keyed by name.
    pub loop_joints: BTreeMap<String, LoopJoint>,
}

impl UrdfRobot {
    /// Create an empty robot description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a link, keyed by its name.
    #[must_use]
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.insert(link.name.clone(), link);
        self
    }

    /// Add a joint, keyed by its name.
    #[must_use]
    pub fn with_joint(mut self, joint: Joint) -> Self {
        self.joints.insert(joint.name.clone(), joint);
        self
    }

    /// Look up a link by name.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.links.get(name)
    }

    /// Look up a joint by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.joints.get(name)
    }
}
