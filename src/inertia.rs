//! Principal-axis decomposition of symmetric inertia tensors.
//!
//! Physics backends want diagonal inertia plus an orientation; robot
//! documents supply a full symmetric tensor. [`diagonalize`] reduces one to
//! the other with a short cyclic Jacobi iteration that is stable across the
//! magnitude range real robots produce, from gram-scale grippers to
//! tonne-scale bases.

use nalgebra::{Matrix3, Quaternion, UnitQuaternion, Vector3};

/// Iteration bound for the Jacobi sweep. A 3x3 symmetric tensor converges
/// in far fewer rotations than this at physical magnitudes.
const MAX_ITERS: usize = 24;

/// A unit-axis rotation quaternion with `sin(phi/2) = s`, `cos(phi/2) = c`
/// about coordinate axis `axis`.
fn indexed_rotation(axis: usize, s: f64, c: f64) -> Quaternion<f64> {
    let mut v = [0.0; 3];
    v[axis] = s;
    Quaternion::new(c, v[0], v[1], v[2])
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Reduce a symmetric 3x3 tensor to principal moments and a principal-axis
/// orientation.
///
/// Returns `(moments, frame)` such that `frame * diag(moments) * frameᵀ`
/// reconstructs the input. The moments come back in frame-axis order, not
/// sorted by magnitude.
///
/// Each iteration zeroes the largest off-diagonal pair with a single-axis
/// Jacobi rotation, folding the rotation into an accumulated quaternion and
/// renormalizing to control drift. Iteration stops when the largest
/// off-diagonal entry is zero or negligible next to the difference of its
/// two diagonal neighbors.
#[must_use]
pub fn diagonalize(m: &Matrix3<f64>) -> (Vector3<f64>, UnitQuaternion<f64>) {
    let mut q = UnitQuaternion::identity();
    let mut d = *m;

    for _ in 0..MAX_ITERS {
        let axes = q.to_rotation_matrix().into_inner();
        d = axes.transpose() * m * axes;

        let d0 = d[(1, 2)].abs();
        let d1 = d[(0, 2)].abs();
        let d2 = d[(0, 1)].abs();

        // rotation axis index, from largest off-diagonal element
        let a = if d0 > d1 && d0 > d2 {
            0
        } else if d1 > d2 {
            1
        } else {
            2
        };
        let a1 = (a + 1 + (a >> 1)) & 3;
        let a2 = (a1 + 1 + (a1 >> 1)) & 3;

        if d[(a1, a2)] == 0.0 || (d[(a1, a1)] - d[(a2, a2)]).abs() > 2e6 * (2.0 * d[(a1, a2)]).abs()
        {
            break;
        }

        // cot(2 * phi), where phi is the rotation angle
        let w = (d[(a1, a1)] - d[(a2, a2)]) / (2.0 * d[(a1, a2)]);
        let r = if w.abs() > 1000.0 {
            // cos(phi/2) is indistinguishable from 1 here, so use the
            // small-angle form for sin(phi/2)
            indexed_rotation(a, 1.0 / (4.0 * w), 1.0)
        } else {
            let t = 1.0 / (w.abs() + (w * w + 1.0).sqrt());
            let h = 1.0 / (t * t + 1.0).sqrt();
            indexed_rotation(a, ((1.0 - h) / 2.0).sqrt() * sign(w), ((1.0 + h) / 2.0).sqrt())
        };

        q = UnitQuaternion::from_quaternion(q.into_inner() * r);
    }

    (Vector3::new(d[(0, 0)], d[(1, 1)], d[(2, 2)]), q)
}
