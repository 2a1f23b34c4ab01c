use glam::Vec3;
use std::f32::consts::TAU;

use super::lines::{Color, DebugLine, WHITE};
use crate::collision::Aabb;
use crate::ik::Chain;

pub const DEFAULT_CONE_STEPS: u32 = 72;
pub const DEFAULT_CONE_SCALE: f32 = 2.0;

#[rustfmt::skip]
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Rim rays of the joint-limit cone at every interior joint.
///
/// The cone opens around the parent joint's local +X axis, which the
/// orientation pass points along the incoming link.
pub fn joint_limit_cone(
    chain: &Chain,
    limit_degrees: f32,
    scale: f32,
    steps: u32,
) -> Vec<DebugLine> {
    let joints = chain.joints();
    let (sin, cos) = limit_degrees.to_radians().sin_cos();
    let mut lines = Vec::with_capacity(joints.len().saturating_sub(2) * steps as usize);

    for pair in joints.windows(2).take(joints.len().saturating_sub(2)) {
        let (parent, joint) = (&pair[0], &pair[1]);
        for step in 0..steps {
            let twist = TAU * step as f32 / steps as f32;
            let local = Vec3::new(cos, twist.cos() * sin, twist.sin() * sin);
            let direction = parent.rotation * local;
            lines.push(DebugLine::new(
                joint.position,
                joint.position + direction * scale,
                WHITE,
            ));
        }
    }

    lines
}

/// The twelve edges of `aabb` plus a cross over its bottom face.
pub fn wire_box(aabb: &Aabb, color: Color) -> Vec<DebugLine> {
    let (lo, hi) = (aabb.min, aabb.max);
    let corners = [
        Vec3::new(lo.x, lo.y, lo.z),
        Vec3::new(hi.x, lo.y, lo.z),
        Vec3::new(hi.x, hi.y, lo.z),
        Vec3::new(lo.x, hi.y, lo.z),
        Vec3::new(lo.x, lo.y, hi.z),
        Vec3::new(hi.x, lo.y, hi.z),
        Vec3::new(hi.x, hi.y, hi.z),
        Vec3::new(lo.x, hi.y, hi.z),
    ];

    let mut lines: Vec<DebugLine> = BOX_EDGES
        .iter()
        .map(|&(a, b)| DebugLine::new(corners[a], corners[b], color))
        .collect();
    lines.push(DebugLine::new(corners[0], corners[5], color));
    lines.push(DebugLine::new(corners[1], corners[4], color));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ik::{angle_between_degrees, link_rotation};
    use approx::assert_abs_diff_eq;

    #[test]
    fn cone_rays_open_at_the_limit_around_incoming_link() {
        let mut chain = Chain::from_positions([
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(2.0, 0.0, 2.0),
            Vec3::new(3.0, 0.0, 3.0),
        ])
        .unwrap();
        for i in 0..3 {
            let (from, to) = (chain.joints()[i].position, chain.joints()[i + 1].position);
            chain.joints_mut()[i].rotation = link_rotation(from, to).unwrap();
        }

        let lines = joint_limit_cone(&chain, 30.0, 2.0, 8);

        assert_eq!(lines.len(), 2 * 8);
        let incoming = Vec3::new(1.0, 0.0, 1.0);
        for line in &lines {
            assert_abs_diff_eq!((line.end - line.start).length(), 2.0, epsilon = 1e-4);
            assert_abs_diff_eq!(
                angle_between_degrees(incoming, line.end - line.start),
                30.0,
                epsilon = 1e-2
            );
        }
        assert_eq!(lines[0].start, chain.joints()[1].position);
        assert_eq!(lines[8].start, chain.joints()[2].position);
    }

    #[test]
    fn two_joint_chain_has_no_cones() {
        let chain = Chain::from_positions([Vec3::ZERO, Vec3::X]).unwrap();
        assert!(joint_limit_cone(&chain, 45.0, 1.0, DEFAULT_CONE_STEPS).is_empty());
    }

    #[test]
    fn wire_box_draws_edges_and_floor_cross() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 3.0));
        let lines = wire_box(&aabb, WHITE);

        assert_eq!(lines.len(), 14);
        for line in &lines {
            assert!(aabb.contains_box(&Aabb::new(line.start, line.end), 0.0));
        }
        let cross = &lines[12];
        assert_eq!(cross.start.y, 0.0);
        assert_eq!(cross.end.y, 0.0);
    }
}
