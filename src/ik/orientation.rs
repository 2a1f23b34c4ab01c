//! Joint orientations derived from solved positions.
//!
//! Every non-terminal joint gets the frame whose local +X ("right") points at
//! its successor, local +Z ("forward") is `right x up_reference` and local +Y
//! completes the right-handed basis. The end joint copies the target rotation.

use super::chain::Chain;
use super::observer::SolveObserver;
use crate::error::{Degeneracy, IkError, IkResult};
use crate::math::Pose;
use glam::{Quat, Vec3};

pub const WORLD_UP: Vec3 = Vec3::Y;

/// Up reference substituted when a link is parallel to [`WORLD_UP`].
pub const FALLBACK_UP: Vec3 = Vec3::Z;

const DIRECTION_EPSILON: f32 = 1e-6;

/// `v` normalized, or `None` when it is too short to carry a direction.
pub(crate) fn try_direction(v: Vec3) -> Option<Vec3> {
    let length = v.length();
    if length.is_finite() && length > DIRECTION_EPSILON {
        Some(v / length)
    } else {
        None
    }
}

/// Rotation of the frame pointing from `from` to `to`, built against `up_reference`.
pub fn frame_rotation(from: Vec3, to: Vec3, up_reference: Vec3) -> IkResult<Quat> {
    let right = try_direction(to - from)
        .ok_or(IkError::DegenerateGeometry(Degeneracy::CoincidentPoints))?;
    let forward = try_direction(right.cross(up_reference))
        .ok_or(IkError::DegenerateGeometry(Degeneracy::ParallelToUp))?;
    let up = forward.cross(right);
    Ok(Pose::rotation_from_axes(right, up, forward))
}

/// [`frame_rotation`] against world up, retried with [`FALLBACK_UP`] for vertical links.
pub fn link_rotation(from: Vec3, to: Vec3) -> IkResult<Quat> {
    match frame_rotation(from, to, WORLD_UP) {
        Err(IkError::DegenerateGeometry(Degeneracy::ParallelToUp)) => {
            frame_rotation(from, to, FALLBACK_UP)
        }
        result => result,
    }
}

/// Writes every joint's rotation. Returns how many joints kept their previous
/// rotation because their link had no length.
pub fn finalize_orientations(
    chain: &mut Chain,
    target_rotation: Quat,
    observer: &mut dyn SolveObserver,
) -> u32 {
    let n = chain.joints.len();
    let mut degenerate = 0;

    for i in 0..n - 1 {
        let from = chain.joints[i].position;
        let to = chain.joints[i + 1].position;
        match link_rotation(from, to) {
            Ok(rotation) => chain.joints[i].rotation = rotation,
            Err(err) => {
                log::trace!("joint {i} keeps its orientation: {err}");
                if let IkError::DegenerateGeometry(kind) = err {
                    observer.degenerate(i, kind);
                }
                degenerate += 1;
            }
        }
    }

    chain.joints[n - 1].rotation = target_rotation;
    degenerate
}
