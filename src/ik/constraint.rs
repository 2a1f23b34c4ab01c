use super::observer::{NoopObserver, SolveObserver};
use glam::Vec3;

const EPSILON: f32 = 1e-6;

/// Circular swing limit: the outgoing link of a joint may deviate from the
/// incoming link by at most `limit` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeConstraint {
    limit_degrees: f32,
}

impl ConeConstraint {
    /// Limits outside `[0, 180]` are clamped into range.
    pub fn new(limit_degrees: f32) -> Self {
        Self {
            limit_degrees: limit_degrees.clamp(0.0, 180.0),
        }
    }

    pub fn limit_degrees(&self) -> f32 {
        self.limit_degrees
    }

    pub fn is_unconstrained(&self) -> bool {
        self.limit_degrees >= 180.0
    }

    /// Nearest permissible position for `p_next`, the successor of joint `p`
    /// whose predecessor is `p_prev`. Returns `p_next` itself when the bend
    /// is already within the cone.
    pub fn enforce(&self, p: Vec3, p_prev: Vec3, p_next: Vec3) -> Vec3 {
        self.enforce_observed(p, p_prev, p_next, &mut NoopObserver)
    }

    pub fn enforce_observed(
        &self,
        p: Vec3,
        p_prev: Vec3,
        p_next: Vec3,
        observer: &mut dyn SolveObserver,
    ) -> Vec3 {
        if self.is_unconstrained() {
            return p_next;
        }

        let l = p - p_prev;
        let mut l_next = p_next - p;

        let Some(axis) = l.try_normalize() else {
            return p_next;
        };
        if l_next.length_squared() < EPSILON * EPSILON {
            return p_next;
        }
        if angle_between_degrees(l, l_next) <= self.limit_degrees {
            return p_next;
        }

        let mut o = l_next.project_onto_normalized(axis);

        // Bending back past the cone apex: mirror the target into the forward
        // half-space so the rim point lies on the forward cone.
        if o.dot(l) < 0.0 && self.limit_degrees <= 90.0 {
            if let Some(normal) = o.try_normalize() {
                l_next = l_next.reflect(normal);
            }
            o = -o;
        }

        observer.constraint_construction(p, p + o, p + l_next);

        let base = p + o;
        let radial = ((p + l_next) - base)
            .try_normalize()
            .unwrap_or_else(|| axis.any_orthonormal_vector());

        let depth = o.length();
        if depth < EPSILON {
            // Zero-radius cone: take the rim direction at the unconstrained reach.
            let (sin, cos) = self.limit_degrees.to_radians().sin_cos();
            return p + (axis * cos + radial * sin) * l_next.length();
        }

        let radius = (depth * self.limit_degrees.to_radians().tan()).abs();
        base + radial * radius
    }
}

/// See [`ConeConstraint::enforce`].
pub fn enforce_constraint(p: Vec3, p_prev: Vec3, p_next: Vec3, limit_degrees: f32) -> Vec3 {
    ConeConstraint::new(limit_degrees).enforce(p, p_prev, p_next)
}

/// [`Vec3::angle_between`] in degrees, 0 when either vector has no length.
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() < EPSILON * EPSILON || b.length_squared() < EPSILON * EPSILON {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}
