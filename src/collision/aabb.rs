use glam::Vec3;

use super::raycast::{Ray, RayHit};

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning the two corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn volume(&self) -> f32 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// True when the box has positive extent along every axis.
    pub fn has_volume(&self) -> bool {
        self.min.cmplt(self.max).all()
    }

    /// Smallest box containing both.
    pub fn encapsulate(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True when `inner` lies inside this box, allowing `epsilon` of slack.
    pub fn contains_box(&self, inner: &Aabb, epsilon: f32) -> bool {
        inner.min.cmpge(self.min - Vec3::splat(epsilon)).all()
            && inner.max.cmple(self.max + Vec3::splat(epsilon)).all()
    }

    /// Slab test. A ray starting inside the box reports its exit point.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<RayHit> {
        let inv_dir = Vec3::new(
            inverse_or_max(ray.direction.x),
            inverse_or_max(ray.direction.y),
            inverse_or_max(ray.direction.z),
        );

        let t1 = (self.min - ray.origin) * inv_dir;
        let t2 = (self.max - ray.origin) * inv_dir;

        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_near > t_far || t_far < ray.min_distance {
            return None;
        }

        let t = if t_near > ray.min_distance { t_near } else { t_far };
        if t > ray.max_distance {
            return None;
        }

        Some(RayHit {
            distance: t,
            point: ray.at(t),
        })
    }
}

fn inverse_or_max(component: f32) -> f32 {
    if component.abs() > 0.0001 {
        1.0 / component
    } else {
        f32::MAX
    }
}
