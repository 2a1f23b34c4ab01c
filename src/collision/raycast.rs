use glam::Vec3;

use crate::dungeon::SplitAxis;

/// Axis-aligned half-line, reporting hits within
/// `[min_distance, max_distance]`.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Ray {
    const SKIN: f32 = 0.0001;

    /// Axis-aligned ray along `+axis` or `-axis`.
    pub fn along(origin: Vec3, axis: SplitAxis, positive: bool, max_distance: f32) -> Self {
        let unit = axis.unit();
        Self {
            origin,
            direction: if positive { unit } else { -unit },
            min_distance: Self::SKIN,
            max_distance,
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin.
    pub distance: f32,
    pub point: Vec3,
}
