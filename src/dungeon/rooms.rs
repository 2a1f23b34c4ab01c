use glam::Vec3;
use rand::Rng;

use super::config::DungeonConfig;
use super::tree::{random_between, BspTree, NodeId};
use crate::collision::{Aabb, BoxWorld};
use crate::error::{DungeonError, DungeonResult};

const ROOM_EPSILON: f32 = 1e-4;

impl BspTree {
    /// Places one random room in every leaf cell and refreshes the aggregated
    /// bounds. Previous rooms and hallways are discarded.
    pub fn generate_rooms<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &DungeonConfig) {
        self.reset_rooms();

        for id in self.leaf_nodes() {
            let cell = self.nodes[id.0].cell;
            let room = random_room(rng, &cell, config.wall_padding);
            self.place_room(id, room);
        }

        self.update_room_bounds();
        log::debug!("generated {} room(s)", self.world.len());
    }

    /// Assigns a fixed room to leaf `id`.
    pub fn set_room(&mut self, id: NodeId, room: Aabb) -> DungeonResult<()> {
        let node = self.node_checked(id)?;
        if !node.is_leaf() {
            return Err(DungeonError::NotALeaf(id));
        }
        if !room.has_volume() || !node.cell.contains_box(&room, ROOM_EPSILON) {
            return Err(DungeonError::InvalidBounds);
        }

        if self.nodes[id.0].room.is_some() {
            self.world = rebuild_without(&self.world, id);
        }
        self.place_room(id, room);
        Ok(())
    }

    fn place_room(&mut self, id: NodeId, room: Aabb) {
        self.nodes[id.0].room = Some(room);
        self.world.add(room, id);
    }

    fn reset_rooms(&mut self) {
        self.world.clear();
        self.hallways.clear();
        for node in &mut self.nodes {
            node.room = None;
            node.connected = false;
        }
    }

    /// Recomputes every internal node's bounds as the union of its
    /// children's, bottom-up.
    pub fn update_room_bounds(&mut self) {
        for index in (0..self.nodes.len()).rev() {
            let Some((a, b)) = self.nodes[index].children else {
                continue;
            };

            let bounds = match (self.nodes[a.0].room, self.nodes[b.0].room) {
                (Some(ra), Some(rb)) => Some(ra.encapsulate(&rb)),
                (Some(r), None) | (None, Some(r)) => Some(r),
                (None, None) => None,
            };
            self.nodes[index].room = bounds;
        }
    }

    /// Leaf rooms in depth-first order.
    pub fn rooms(&self) -> Vec<(NodeId, Aabb)> {
        self.leaf_nodes()
            .into_iter()
            .filter_map(|id| self.nodes[id.0].room.map(|room| (id, room)))
            .collect()
    }
}

fn rebuild_without(world: &BoxWorld<NodeId>, id: NodeId) -> BoxWorld<NodeId> {
    let mut rebuilt = BoxWorld::new();
    for (aabb, tag) in world.iter().filter(|(_, tag)| *tag != id) {
        rebuilt.add(*aabb, *tag);
    }
    rebuilt
}

/// Room extent along one axis of size `size`.
fn room_extent<R: Rng + ?Sized>(rng: &mut R, size: f32, padding: f32) -> f32 {
    let high = if size > padding { size - padding } else { 0.5 * size };
    let low = (0.5 * size + 0.5 * padding).min(high);
    random_between(rng, low, high)
}

fn random_room<R: Rng + ?Sized>(rng: &mut R, cell: &Aabb, padding: f32) -> Aabb {
    let size = cell.size();

    let width = room_extent(rng, size.x, padding);
    let depth = room_extent(rng, size.z, padding);
    let offset_x = random_between(rng, 0.0, size.x - width);
    let offset_z = random_between(rng, 0.0, size.z - depth);

    let min = Vec3::new(cell.min.x + offset_x, cell.min.y, cell.min.z + offset_z);
    let max = Vec3::new(min.x + width, cell.max.y, min.z + depth);
    Aabb::new(min, max)
}
