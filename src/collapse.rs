//! Fixed-joint collapsing.
//!
//! Physics backends pay per rigid body, and real robot descriptions carry
//! many massless bracket and flange links behind fixed joints. Collapsing
//! folds each fixed-jointed child into its parent: mass properties combine
//! through the parallel-axis theorem, geometry re-homes with composed
//! origins, and surviving joints re-attach to the parent. Merged links keep
//! their map entries (recorded under the parent's `merged_children`) so the
//! embedder can still reconstruct their frames.

use std::mem;

use nalgebra::{Matrix3, Point3};
use tracing::{debug, warn};

use crate::chain::{KinematicNode, compute_kinematic_chain};
use crate::error::Result;
use crate::types::{Inertia, Inertial, JointType, Transform, UrdfRobot};

/// Merge every eligible fixed-jointed child link into its parent.
///
/// Eligible means the connecting joint is fixed and not marked
/// `dont_collapse`. The walk is depth-first post-order, so multi-level runs
/// of fixed joints accumulate bottom-up into the correct composites.
/// Running the pass again after it has converged changes nothing: merged
/// links drop out of the derived tree, leaving no eligible joints behind.
///
/// # Errors
///
/// Fails when the kinematic tree cannot be built (see
/// [`compute_kinematic_chain`]); the model is untouched in that case.
pub fn collapse_fixed_joints(robot: &mut UrdfRobot) -> Result<()> {
    let chain = compute_kinematic_chain(robot)?;
    if !chain.root.is_leaf() {
        merge_fixed_child_links(&chain.root, robot);
    }
    Ok(())
}

fn merge_fixed_child_links(parent_node: &KinematicNode, robot: &mut UrdfRobot) {
    for child_node in &parent_node.children {
        // children first, so a chain of fixed links folds bottom-up
        merge_fixed_child_links(child_node, robot);

        let Some(joint) = robot.joints.get(&child_node.parent_joint_name) else {
            continue;
        };
        if joint.joint_type == JointType::Fixed && !joint.dont_collapse {
            let pose_child_to_parent = joint.origin;
            merge_child(
                robot,
                &parent_node.link_name,
                &child_node.link_name,
                pose_child_to_parent,
            );
        }
    }
}

fn merge_child(
    robot: &mut UrdfRobot,
    parent_name: &str,
    child_name: &str,
    pose_child_to_parent: Transform,
) {
    debug!(
        child = child_name,
        parent = parent_name,
        "collapsing fixed-jointed link into its parent"
    );

    let Some(child_inertial) = robot.links.get(child_name).map(|l| l.inertial) else {
        return;
    };
    let Some(parent_link) = robot.links.get_mut(parent_name) else {
        return;
    };
    parent_link
        .merged_children
        .insert(child_name.to_string(), pose_child_to_parent);

    let parent_inertial = parent_link.inertial;
    let mass_known = parent_inertial.mass.is_some() || child_inertial.mass.is_some();
    let mass_positive =
        parent_inertial.mass.unwrap_or(0.0) > 0.0 || child_inertial.mass.unwrap_or(0.0) > 0.0;
    if mass_known && mass_positive {
        parent_link.inertial =
            merged_inertial(&parent_inertial, &child_inertial, &pose_child_to_parent);
    } else {
        warn!(
            child = child_name,
            parent = parent_name,
            "neither link carries a usable mass, merging geometry only"
        );
    }

    let Some(child_link) = robot.links.get_mut(child_name) else {
        return;
    };
    let mut collisions = mem::take(&mut child_link.collisions);
    let mut visuals = mem::take(&mut child_link.visuals);
    for collision in &mut collisions {
        collision.origin = pose_child_to_parent.compose(&collision.origin);
    }
    for visual in &mut visuals {
        visual.origin = pose_child_to_parent.compose(&visual.origin);
    }
    let Some(parent_link) = robot.links.get_mut(parent_name) else {
        return;
    };
    parent_link.collisions.extend(collisions);
    parent_link.visuals.extend(visuals);

    // joints hanging off the vanished child re-attach to the parent
    for joint in robot.joints.values_mut() {
        if joint.parent_link_name == child_name {
            joint.parent_link_name = parent_name.to_string();
            joint.origin = pose_child_to_parent.compose(&joint.origin);
        }
    }
}

/// Combine two bodies' mass properties into one, expressed on the parent.
///
/// Absent masses count as zero, absent tensors as zero tensors, absent COM
/// origins as identity. Each body's tensor is rotated into the parent link
/// frame, shifted to the combined center of mass with the parallel-axis
/// theorem, and the sum is expressed back in the parent's own COM-frame
/// axes. The returned origin keeps the parent's COM rotation with the
/// combined COM position.
fn merged_inertial(
    parent: &Inertial,
    child: &Inertial,
    pose_child_to_parent: &Transform,
) -> Inertial {
    let parent_com = parent.origin.unwrap_or_default();
    let child_com = pose_child_to_parent.compose(&child.origin.unwrap_or_default());
    let parent_mass = parent.mass.unwrap_or(0.0);
    let child_mass = child.mass.unwrap_or(0.0);

    let total_mass = parent_mass + child_mass;
    let com = (parent_com.position.coords * parent_mass + child_com.position.coords * child_mass)
        / total_mass;

    let about_combined_com = |com_frame: &Transform, tensor: Option<Inertia>, mass: f64| {
        let delta = com_frame.position.coords - com;
        let rot = com_frame.rotation_matrix();
        let local = tensor.unwrap_or_default().to_matrix();
        rot * local * rot.transpose()
            + mass * (delta.norm_squared() * Matrix3::identity() - delta * delta.transpose())
    };

    let summed = about_combined_com(&parent_com, parent.inertia, parent_mass)
        + about_combined_com(&child_com, child.inertia, child_mass);
    let rot_parent = parent_com.rotation_matrix();
    let combined = rot_parent.transpose() * summed * rot_parent;

    Inertial {
        origin: Some(Transform::new(Point3::from(com), parent_com.rotation)),
        mass: Some(total_mass),
        inertia: Some(Inertia::from_matrix(&combined)),
    }
}
