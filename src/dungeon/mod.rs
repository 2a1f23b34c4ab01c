//! BSP dungeon generation
//!
//! A volume is split recursively into cells, each leaf cell receives a room,
//! and sibling subtrees are joined by hallways found by raycasting between
//! their rooms. Connection runs in passes that resolve the tree bottom-up.

pub mod config;
mod connect;
mod rooms;
pub mod tree;

pub use config::DungeonConfig;
pub use tree::{BspNode, BspTree, DrawMode, Hallway, NodeId, SplitAxis};

use rand::Rng;

use crate::collision::Aabb;
use crate::error::DungeonResult;

/// Split, furnish and connect a dungeon in one go.
pub fn generate<R: Rng + ?Sized>(
    bounds: Aabb,
    rng: &mut R,
    config: &DungeonConfig,
) -> DungeonResult<BspTree> {
    let mut tree = BspTree::new(bounds)?;
    tree.split_recursively(rng, config);
    tree.generate_rooms(rng, config);
    tree.connect_all(rng, config);
    Ok(tree)
}
