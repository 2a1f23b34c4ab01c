use glam::Vec3;
use rand::Rng;

use super::config::DungeonConfig;
use super::tree::{BspTree, Hallway, NodeId, SplitAxis};
use crate::collision::{Aabb, Ray, RayHit};

impl BspTree {
    /// One bottom-up traversal. Each internal node connects its children only
    /// once neither child changed during the same pass, so a single pass
    /// resolves at most one level of every branch.
    ///
    /// Returns whether anything changed.
    pub fn connect_pass<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &DungeonConfig) -> bool {
        self.connect_node(self.root(), rng, config)
    }

    /// Runs passes until one reports no change and returns how many did.
    pub fn connect_all<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &DungeonConfig) -> usize {
        let mut passes = 0;
        while self.connect_pass(rng, config) {
            passes += 1;
        }
        log::debug!(
            "connected in {} pass(es), {} hallway(s)",
            passes,
            self.hallways.len()
        );
        passes
    }

    /// True once every internal node has joined its children.
    pub fn is_fully_connected(&self) -> bool {
        self.nodes.iter().all(|n| n.is_leaf() || n.connected)
    }

    fn connect_node<R: Rng + ?Sized>(
        &mut self,
        id: NodeId,
        rng: &mut R,
        config: &DungeonConfig,
    ) -> bool {
        let node = &self.nodes[id.0];
        if node.connected {
            return false;
        }
        let Some((a, b)) = node.children else {
            return false;
        };

        let mut changed = self.connect_node(a, rng, config);
        changed |= self.connect_node(b, rng, config);
        if changed {
            return true;
        }

        if let Some(hallway) = self.connect_children(id, rng, config) {
            self.world.add(hallway.bounds, id);
            self.hallways.push(hallway);
        }
        self.nodes[id.0].connected = true;
        true
    }

    fn connect_children<R: Rng + ?Sized>(
        &self,
        id: NodeId,
        rng: &mut R,
        config: &DungeonConfig,
    ) -> Option<Hallway> {
        let node = &self.nodes[id.0];
        let ((a, b), axis) = node.children.zip(node.split_axis)?;

        let (Some(room_a), Some(room_b)) = (self.nodes[a.0].room, self.nodes[b.0].room) else {
            log::warn!("node {:?} has a child without rooms, skipping hallway", id);
            return None;
        };

        let across = axis.perpendicular().index();
        let low = room_a.min[across].max(room_b.min[across]);
        let high = room_a.max[across].min(room_b.max[across]);
        if high <= low {
            log::warn!("rooms under node {:?} do not overlap, skipping hallway", id);
            return None;
        }

        let half_width = 0.5 * config.hallway_width;
        let (low, high) = if high - low > config.hallway_width {
            (low + half_width, high - half_width)
        } else {
            let mid = 0.5 * (low + high);
            (mid, mid)
        };

        let floor = room_a.min.y.max(room_b.min.y);
        let ceiling = room_a.max.y.min(room_b.max.y);
        let height = config.hallway_height.min(ceiling - floor);
        let ray_y = floor + 0.5 * height;

        let along = axis.index();
        let reach = node.cell.size()[along];
        let mut origin = Vec3::ZERO;
        origin[along] = 0.5 * (room_a.max[along] + room_b.min[along]);
        origin.y = ray_y;

        for attempt in 0..config.connect_attempts.max(1) {
            origin[across] = low + rng.gen::<f32>() * (high - low);

            let Some((hit_a, hit_b)) = self.cast_between(origin, axis, reach, a, b) else {
                log::trace!("hallway ray under node {:?} missed on attempt {}", id, attempt);
                continue;
            };

            let mut min = hit_a.point;
            let mut max = hit_b.point;
            min[across] -= half_width;
            max[across] += half_width;
            min.y = floor;
            max.y = floor + height;
            let bounds = Aabb::new(min, max);

            if !bounds.has_volume() {
                log::debug!("rooms under node {:?} touch, no hallway needed", id);
                return None;
            }
            return Some(Hallway {
                bounds,
                parent: id,
                axis,
            });
        }

        log::warn!(
            "no hallway found for node {:?} after {} attempt(s)",
            id,
            config.connect_attempts
        );
        None
    }

    /// Casts from `origin` towards subtree `a` (below along `axis`) and
    /// subtree `b` (above).
    fn cast_between(
        &self,
        origin: Vec3,
        axis: SplitAxis,
        reach: f32,
        a: NodeId,
        b: NodeId,
    ) -> Option<(RayHit, RayHit)> {
        let toward_a = Ray::along(origin, axis, false, reach);
        let toward_b = Ray::along(origin, axis, true, reach);

        let (_, hit_a) = self
            .world
            .raycast_filtered(&toward_a, |&tag| self.is_descendant(tag, a))?;
        let (_, hit_b) = self
            .world
            .raycast_filtered(&toward_b, |&tag| self.is_descendant(tag, b))?;
        Some((hit_a, hit_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_rooms() -> BspTree {
        let mut tree = BspTree::new(Aabb::new(Vec3::ZERO, Vec3::new(40.0, 2.0, 20.0))).unwrap();
        let (a, b) = tree.split(tree.root(), SplitAxis::X, 20.0).unwrap();
        tree.set_room(a, Aabb::new(Vec3::new(2.0, 0.0, 2.0), Vec3::new(16.0, 2.0, 16.0)))
            .unwrap();
        tree.set_room(b, Aabb::new(Vec3::new(24.0, 0.0, 4.0), Vec3::new(38.0, 2.0, 18.0)))
            .unwrap();
        tree.update_room_bounds();
        tree
    }

    #[test]
    fn hallway_spans_the_gap_between_siblings() {
        let mut tree = two_rooms();
        let mut rng = StdRng::seed_from_u64(11);
        let config = DungeonConfig::default();

        assert_eq!(tree.connect_all(&mut rng, &config), 1);
        assert!(tree.is_fully_connected());

        let hallways = tree.hallways();
        assert_eq!(hallways.len(), 1);
        let hallway = hallways[0];
        assert_eq!(hallway.parent, tree.root());
        assert_eq!(hallway.axis, SplitAxis::X);
        assert_abs_diff_eq!(hallway.bounds.min.x, 16.0, epsilon = 1e-3);
        assert_abs_diff_eq!(hallway.bounds.max.x, 24.0, epsilon = 1e-3);
        assert_abs_diff_eq!(hallway.bounds.size().z, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(hallway.bounds.size().y, 1.0, epsilon = 1e-4);
        assert!(hallway.bounds.min.z >= 4.0 - 1e-4);
        assert!(hallway.bounds.max.z <= 16.0 + 1e-4);
        assert_eq!(tree.world().len(), 3);
    }

    #[test]
    fn connected_tree_reports_no_change() {
        let mut tree = two_rooms();
        let mut rng = StdRng::seed_from_u64(1);
        let config = DungeonConfig::default();

        assert!(tree.connect_pass(&mut rng, &config));
        assert!(!tree.connect_pass(&mut rng, &config));
        assert_eq!(tree.hallways().len(), 1);
    }

    #[test]
    fn deeper_trees_need_one_pass_per_level() {
        let mut tree = BspTree::new(Aabb::new(Vec3::ZERO, Vec3::new(40.0, 2.0, 40.0))).unwrap();
        let (a, b) = tree.split(tree.root(), SplitAxis::X, 20.0).unwrap();
        let (c, d) = tree.split(b, SplitAxis::Z, 20.0).unwrap();
        tree.set_room(a, Aabb::new(Vec3::new(2.0, 0.0, 10.0), Vec3::new(16.0, 2.0, 30.0)))
            .unwrap();
        tree.set_room(c, Aabb::new(Vec3::new(24.0, 0.0, 2.0), Vec3::new(36.0, 2.0, 16.0)))
            .unwrap();
        tree.set_room(d, Aabb::new(Vec3::new(24.0, 0.0, 24.0), Vec3::new(36.0, 2.0, 36.0)))
            .unwrap();
        tree.update_room_bounds();

        let mut rng = StdRng::seed_from_u64(5);
        let config = DungeonConfig::default();

        assert!(tree.connect_pass(&mut rng, &config));
        assert!(tree.node(b).unwrap().is_connected());
        assert!(!tree.node(tree.root()).unwrap().is_connected());

        assert!(tree.connect_pass(&mut rng, &config));
        assert!(tree.is_fully_connected());
        assert!(!tree.connect_pass(&mut rng, &config));
        assert_eq!(tree.hallways().len(), 2);
    }

    #[test]
    fn disjoint_rooms_are_skipped_but_marked_connected() {
        let mut tree = BspTree::new(Aabb::new(Vec3::ZERO, Vec3::new(40.0, 2.0, 20.0))).unwrap();
        let (a, b) = tree.split(tree.root(), SplitAxis::X, 20.0).unwrap();
        tree.set_room(a, Aabb::new(Vec3::new(2.0, 0.0, 1.0), Vec3::new(16.0, 2.0, 8.0)))
            .unwrap();
        tree.set_room(b, Aabb::new(Vec3::new(24.0, 0.0, 10.0), Vec3::new(38.0, 2.0, 18.0)))
            .unwrap();
        tree.update_room_bounds();

        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(tree.connect_all(&mut rng, &DungeonConfig::default()), 1);
        assert!(tree.is_fully_connected());
        assert!(tree.hallways().is_empty());
    }
}
