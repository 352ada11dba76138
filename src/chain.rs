//! Kinematic tree derivation from a flat robot model.
//!
//! The tree is a derived, disposable view: build it fresh from the current
//! [`UrdfRobot`] whenever topology is needed, and rebuild after the model
//! changes rather than patching nodes in place. Nodes own their children
//! exclusively; the chain owns the root.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, UrdfError};
use crate::types::UrdfRobot;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Tree Types
// ============================================================================

/// One link in the kinematic tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KinematicNode {
    /// The link this node represents.
    pub link_name: String,
    /// Name of the joint connecting this link to its parent; empty for the
    /// root.
    pub parent_joint_name: String,
    /// Child nodes, ordered by connecting joint name.
    pub children: Vec<KinematicNode>,
}

impl KinematicNode {
    fn new(link_name: impl Into<String>, parent_joint_name: impl Into<String>) -> Self {
        Self {
            link_name: link_name.into(),
            parent_joint_name: parent_joint_name.into(),
            children: Vec::new(),
        }
    }

    /// True when this link has no children in the tree.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find the direct child node for a link name.
    #[must_use]
    pub fn child(&self, link_name: &str) -> Option<&KinematicNode> {
        self.children.iter().find(|c| c.link_name == link_name)
    }

    /// Number of links in this subtree, including this one.
    #[must_use]
    pub fn link_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(KinematicNode::link_count)
            .sum::<usize>()
    }
}

/// The derived kinematic tree of a robot model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KinematicChain {
    /// The root link's node.
    pub root: KinematicNode,
}

// ============================================================================
// Root Resolution
// ============================================================================

/// Determine the root link of a robot model.
///
/// With no joints, a single link is the degenerate root and multiple links
/// are an ambiguous-topology error. Otherwise the root is the unique link
/// that is never any joint's child; zero candidates (fully cyclic) and
/// multiple candidates (disconnected document) are errors.
pub fn find_root_link(robot: &UrdfRobot) -> Result<String> {
    if robot.joints.is_empty() {
        let mut names = robot.links.keys();
        return match (names.next(), names.next()) {
            (None, _) => Err(UrdfError::NoRootLink),
            (Some(only), None) => Ok(only.clone()),
            (Some(_), Some(_)) => Err(UrdfError::UnconnectedLinks(robot.links.len())),
        };
    }

    let child_links: BTreeSet<&str> = robot
        .joints
        .values()
        .map(|j| j.child_link_name.as_str())
        .collect();

    let candidates: Vec<&String> = robot
        .links
        .keys()
        .filter(|name| !child_links.contains(name.as_str()))
        .collect();

    match candidates.as_slice() {
        [] => Err(UrdfError::NoRootLink),
        [root] => Ok((*root).clone()),
        many => Err(UrdfError::MultipleRootLinks(
            many.iter().map(|s| (*s).clone()).collect(),
        )),
    }
}

// ============================================================================
// Tree Construction
// ============================================================================

/// Build the kinematic tree for a robot model.
///
/// Children attach in joint-name order, so the tree is identical across
/// runs and platforms. Joints whose child link is recorded in any link's
/// `merged_children` are skipped: collapsed links keep their map entries but
/// no longer appear in the derived topology, even through joints the
/// collapser re-parented.
///
/// # Errors
///
/// Fails on root-resolution errors (see [`find_root_link`]), on a joint
/// child that has no link entry, on a link attached by two different
/// joints, and on links left unreachable from the root.
pub fn compute_kinematic_chain(robot: &UrdfRobot) -> Result<KinematicChain> {
    let root_name = find_root_link(robot)?;

    let merged: BTreeSet<&str> = robot
        .links
        .values()
        .flat_map(|l| l.merged_children.keys())
        .map(String::as_str)
        .collect();

    // link name -> joint that attached it, for duplicate-attachment reporting
    let mut visited: BTreeMap<String, String> = BTreeMap::new();
    visited.insert(root_name.clone(), String::new());

    let mut root = KinematicNode::new(root_name, "");
    attach_children(&mut root, robot, &merged, &mut visited)?;

    let stranded: Vec<String> = robot
        .links
        .keys()
        .filter(|name| !visited.contains_key(*name) && !merged.contains(name.as_str()))
        .cloned()
        .collect();
    if !stranded.is_empty() {
        return Err(UrdfError::DisconnectedLinks(stranded));
    }

    Ok(KinematicChain { root })
}

fn attach_children(
    node: &mut KinematicNode,
    robot: &UrdfRobot,
    merged: &BTreeSet<&str>,
    visited: &mut BTreeMap<String, String>,
) -> Result<()> {
    for (joint_name, joint) in &robot.joints {
        if joint.parent_link_name != node.link_name {
            continue;
        }
        if merged.contains(joint.child_link_name.as_str()) {
            continue;
        }
        if !robot.links.contains_key(&joint.child_link_name) {
            return Err(UrdfError::undefined_link(&joint.child_link_name, joint_name));
        }
        if let Some(first_joint) = visited.get(&joint.child_link_name) {
            return Err(UrdfError::duplicate_child_link(
                &joint.child_link_name,
                first_joint,
                joint_name,
            ));
        }
        visited.insert(joint.child_link_name.clone(), joint_name.clone());
        node.children
            .push(KinematicNode::new(&joint.child_link_name, joint_name));
    }

    for child in &mut node.children {
        attach_children(child, robot, merged, visited)?;
    }
    Ok(())
}
