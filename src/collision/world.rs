use super::aabb::Aabb;
use super::raycast::{Ray, RayHit};

/// Flat set of tagged boxes that can be raycast against.
#[derive(Debug, Clone)]
pub struct BoxWorld<T> {
    boxes: Vec<(Aabb, T)>,
}

impl<T> Default for BoxWorld<T> {
    fn default() -> Self {
        Self { boxes: Vec::new() }
    }
}

impl<T> BoxWorld<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a box and returns its index.
    pub fn add(&mut self, aabb: Aabb, tag: T) -> usize {
        self.boxes.push((aabb, tag));
        self.boxes.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Aabb, T)> + '_ {
        self.boxes.iter()
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Closest hit among boxes whose tag passes `filter`.
    pub fn raycast_filtered<F>(&self, ray: &Ray, filter: F) -> Option<(usize, RayHit)>
    where
        F: Fn(&T) -> bool,
    {
        let mut closest: Option<(usize, RayHit)> = None;

        for (i, (aabb, tag)) in self.boxes.iter().enumerate() {
            if !filter(tag) {
                continue;
            }
            if let Some(hit) = aabb.ray_intersect(ray) {
                match &closest {
                    Some((_, prev_hit)) if prev_hit.distance <= hit.distance => {}
                    _ => closest = Some((i, hit)),
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::SplitAxis;
    use glam::Vec3;

    fn world() -> BoxWorld<u8> {
        let mut world = BoxWorld::new();
        world.add(Aabb::new(Vec3::new(2.5, -0.5, -0.5), Vec3::new(3.5, 0.5, 0.5)), 1);
        world.add(Aabb::new(Vec3::new(5.5, -0.5, -0.5), Vec3::new(6.5, 0.5, 0.5)), 2);
        world
    }

    fn ray() -> Ray {
        Ray::along(Vec3::ZERO, SplitAxis::X, true, f32::MAX)
    }

    #[test]
    fn raycast_returns_closest() {
        let (index, hit) = world().raycast_filtered(&ray(), |_| true).unwrap();
        assert_eq!(index, 0);
        assert!((hit.distance - 2.5).abs() < 1e-5);
    }

    #[test]
    fn filtered_raycast_skips_rejected_tags() {
        let (index, hit) = world().raycast_filtered(&ray(), |tag| *tag == 2).unwrap();
        assert_eq!(index, 1);
        assert!((hit.distance - 5.5).abs() < 1e-5);
    }

    #[test]
    fn cleared_world_has_nothing_to_hit() {
        let mut world = world();
        assert_eq!(world.len(), 2);
        assert_eq!(world.iter().count(), 2);

        world.clear();
        assert!(world.is_empty());
        assert!(world.raycast_filtered(&ray(), |_| true).is_none());
    }
}
