//! Error types for URDF parsing, tree construction, and collapsing.

use thiserror::Error;

/// Errors that can occur while importing a robot description.
#[derive(Debug, Error)]
pub enum UrdfError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The document has no robot element.
    #[error("empty document: no robot element found")]
    EmptyDocument,

    /// Missing required element.
    #[error("missing required element: {element} in {context}")]
    MissingElement {
        /// The missing element name.
        element: &'static str,
        /// Where the element was expected.
        context: String,
    },

    /// Missing required attribute.
    #[error("missing required attribute: {attribute} on {element}")]
    MissingAttribute {
        /// The missing attribute name.
        attribute: &'static str,
        /// The element that should carry the attribute.
        element: String,
    },

    /// Invalid attribute value.
    #[error("invalid value for {attribute} on {element}: {message}")]
    InvalidAttribute {
        /// The attribute with the invalid value.
        attribute: &'static str,
        /// The element containing the attribute.
        element: String,
        /// Description of why the value is invalid.
        message: String,
    },

    /// Unknown joint type keyword.
    #[error("unknown joint type: {0}")]
    UnknownJointType(String),

    /// A visual or collision without a usable geometry.
    #[error("missing or unusable geometry in {context}")]
    MissingGeometry {
        /// The visual/collision that lacks a geometry.
        context: String,
    },

    /// Reference to a link that was never defined.
    #[error("reference to undefined link: {link_name} in joint {joint_name}")]
    UndefinedLink {
        /// The link name that was referenced.
        link_name: String,
        /// The joint that referenced it.
        joint_name: String,
    },

    /// Duplicate link name.
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    /// Duplicate joint name.
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// Duplicate material name.
    #[error("duplicate material name: {0}")]
    DuplicateMaterial(String),

    /// A link is the child of more than one joint.
    #[error("link {link_name} is the child of joints {first_joint} and {second_joint}")]
    DuplicateChildLink {
        /// The multiply-parented link.
        link_name: String,
        /// The joint that claimed the link first.
        first_joint: String,
        /// The joint that claimed it again.
        second_joint: String,
    },

    /// No root link exists: the model has no links, or every link is some
    /// joint's child.
    #[error("no root link found")]
    NoRootLink,

    /// More than one link qualifies as root.
    #[error("multiple root links found: {0:?}")]
    MultipleRootLinks(Vec<String>),

    /// Multiple links but no joints connecting them.
    #[error("{0} links but no joints: topology is ambiguous")]
    UnconnectedLinks(usize),

    /// Links unreachable from the root.
    #[error("links not connected to the kinematic tree: {0:?}")]
    DisconnectedLinks(Vec<String>),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UrdfError {
    /// Create a missing element error.
    pub fn missing_element(element: &'static str, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element,
            context: context.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(attribute: &'static str, element: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute,
            element: element.into(),
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid_attribute(
        attribute: &'static str,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            attribute,
            element: element.into(),
            message: message.into(),
        }
    }

    /// Create a missing geometry error.
    pub fn missing_geometry(context: impl Into<String>) -> Self {
        Self::MissingGeometry {
            context: context.into(),
        }
    }

    /// Create an undefined link error.
    pub fn undefined_link(link_name: impl Into<String>, joint_name: impl Into<String>) -> Self {
        Self::UndefinedLink {
            link_name: link_name.into(),
            joint_name: joint_name.into(),
        }
    }

    /// Create a duplicate child link error.
    pub fn duplicate_child_link(
        link_name: impl Into<String>,
        first_joint: impl Into<String>,
        second_joint: impl Into<String>,
    ) -> Self {
        Self::DuplicateChildLink {
            link_name: link_name.into(),
            first_joint: first_joint.into(),
            second_joint: second_joint.into(),
        }
    }
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, UrdfError>;
