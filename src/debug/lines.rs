use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::error::Degeneracy;
use crate::ik::SolveObserver;

pub type Color = [f32; 4];

pub const RED: Color = [1.0, 0.2, 0.2, 1.0];
pub const BLUE: Color = [0.3, 0.5, 0.9, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const YELLOW: Color = [0.8, 0.8, 0.2, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

impl DebugLine {
    pub fn new(start: Vec3, end: Vec3, color: Color) -> Self {
        Self { start, end, color }
    }
}

/// Line-list vertex, laid out for direct upload into a vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Collects line segments, either pushed by a host or recorded while solving.
#[derive(Debug, Clone, Default)]
pub struct DebugLines {
    lines: Vec<DebugLine>,
    degenerate_joints: Vec<(usize, Degeneracy)>,
}

impl DebugLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.lines.push(DebugLine::new(start, end, color));
    }

    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    /// Joints the solver reported as degenerate since the last clear.
    pub fn degenerate_joints(&self) -> &[(usize, Degeneracy)] {
        &self.degenerate_joints
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.degenerate_joints.clear();
    }

    /// Two vertices per line, in insertion order.
    pub fn vertices(&self) -> Vec<LineVertex> {
        self.lines
            .iter()
            .flat_map(|line| {
                [
                    LineVertex {
                        position: line.start.to_array(),
                        color: line.color,
                    },
                    LineVertex {
                        position: line.end.to_array(),
                        color: line.color,
                    },
                ]
            })
            .collect()
    }

    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }
}

impl Extend<DebugLine> for DebugLines {
    fn extend<I: IntoIterator<Item = DebugLine>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

impl SolveObserver for DebugLines {
    fn constraint_construction(&mut self, joint: Vec3, projection: Vec3, unconstrained: Vec3) {
        self.push(joint, projection, RED);
        self.push(joint, unconstrained, BLUE);
    }

    fn degenerate(&mut self, joint_index: usize, kind: Degeneracy) {
        self.degenerate_joints.push((joint_index, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);

        let mut lines = DebugLines::new();
        lines.push(Vec3::ZERO, Vec3::X, RED);
        lines.push(Vec3::Y, Vec3::Z, WHITE);

        let vertices = lines.vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[2].color, WHITE);
        assert_eq!(lines.vertex_bytes().len(), 4 * 28);
    }

    #[test]
    fn records_constraint_construction() {
        let mut lines = DebugLines::new();
        lines.constraint_construction(Vec3::ZERO, Vec3::X, Vec3::Y);
        lines.degenerate(3, Degeneracy::CoincidentPoints);

        assert_eq!(
            lines.lines(),
            &[
                DebugLine::new(Vec3::ZERO, Vec3::X, RED),
                DebugLine::new(Vec3::ZERO, Vec3::Y, BLUE),
            ]
        );
        assert_eq!(lines.degenerate_joints(), &[(3, Degeneracy::CoincidentPoints)]);

        lines.clear();
        assert!(lines.is_empty());
        assert!(lines.degenerate_joints().is_empty());
    }
}
