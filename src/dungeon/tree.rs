use glam::Vec3;
use rand::Rng;

use super::config::DungeonConfig;
use crate::collision::{Aabb, BoxWorld};
use crate::debug::{wire_box, Color, DebugLine, YELLOW};
use crate::error::{DungeonError, DungeonResult};

/// Index of a node in its [`BspTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Horizontal axis a cell is cut along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    X,
    Z,
}

impl SplitAxis {
    /// Component index into a `Vec3`.
    pub fn index(self) -> usize {
        match self {
            SplitAxis::X => 0,
            SplitAxis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            SplitAxis::X => Vec3::X,
            SplitAxis::Z => Vec3::Z,
        }
    }

    pub fn perpendicular(self) -> SplitAxis {
        match self {
            SplitAxis::X => SplitAxis::Z,
            SplitAxis::Z => SplitAxis::X,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BspNode {
    pub(crate) cell: Aabb,
    pub(crate) room: Option<Aabb>,
    pub(crate) children: Option<(NodeId, NodeId)>,
    pub(crate) split_axis: Option<SplitAxis>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u32,
    pub(crate) connected: bool,
    color: Color,
}

impl BspNode {
    fn new(cell: Aabb, parent: Option<NodeId>, depth: u32, index: usize) -> Self {
        Self {
            cell,
            room: None,
            children: None,
            split_axis: None,
            parent,
            depth,
            connected: false,
            color: node_color(index),
        }
    }

    /// Volume this node owns.
    pub fn cell(&self) -> &Aabb {
        &self.cell
    }

    /// The room itself for a leaf, the bounds of every room below for an
    /// internal node.
    pub fn room(&self) -> Option<&Aabb> {
        self.room.as_ref()
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn split_axis(&self) -> Option<SplitAxis> {
        self.split_axis
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Corridor joining the rooms of two sibling subtrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hallway {
    pub bounds: Aabb,
    /// Node whose children this hallway connects.
    pub parent: NodeId,
    pub axis: SplitAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Cells,
    Rooms,
}

/// Binary space partition of a dungeon volume, stored as an arena.
///
/// Children are always allocated after their parent, so walking the arena
/// backwards visits every node after both of its children.
#[derive(Debug, Clone)]
pub struct BspTree {
    pub(crate) nodes: Vec<BspNode>,
    pub(crate) hallways: Vec<Hallway>,
    /// Rooms tagged with their leaf, hallways with the node they connect.
    pub(crate) world: BoxWorld<NodeId>,
}

impl BspTree {
    pub fn new(bounds: Aabb) -> DungeonResult<Self> {
        if !bounds.has_volume() {
            return Err(DungeonError::InvalidBounds);
        }
        Ok(Self {
            nodes: vec![BspNode::new(bounds, None, 0, 0)],
            hallways: Vec::new(),
            world: BoxWorld::new(),
        })
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&BspNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_checked(&self, id: NodeId) -> DungeonResult<&BspNode> {
        self.nodes.get(id.0).ok_or(DungeonError::UnknownNode(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &BspNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest level of the tree, the root being level 0.
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    pub fn world(&self) -> &BoxWorld<NodeId> {
        &self.world
    }

    /// Cuts leaf `id` at coordinate `at` along `axis`.
    pub fn split(
        &mut self,
        id: NodeId,
        axis: SplitAxis,
        at: f32,
    ) -> DungeonResult<(NodeId, NodeId)> {
        let node = self.node_checked(id)?;
        if !node.is_leaf() {
            return Err(DungeonError::AlreadySplit(id));
        }

        let cell = node.cell;
        let i = axis.index();
        if !(at > cell.min[i] && at < cell.max[i]) {
            return Err(DungeonError::SplitOutOfRange {
                at,
                min: cell.min[i],
                max: cell.max[i],
            });
        }

        let (cell_a, cell_b) = split_cell(&cell, axis, at);
        Ok(self.attach_children(id, axis, cell_a, cell_b))
    }

    fn attach_children(
        &mut self,
        id: NodeId,
        axis: SplitAxis,
        cell_a: Aabb,
        cell_b: Aabb,
    ) -> (NodeId, NodeId) {
        let depth = self.nodes[id.0].depth + 1;
        let a = NodeId(self.nodes.len());
        let b = NodeId(a.0 + 1);
        self.nodes.push(BspNode::new(cell_a, Some(id), depth, a.0));
        self.nodes.push(BspNode::new(cell_b, Some(id), depth, b.0));

        let node = &mut self.nodes[id.0];
        node.children = Some((a, b));
        node.split_axis = Some(axis);
        (a, b)
    }

    /// Tries one random cut of leaf `id`; keeps it only when both halves are
    /// valid cells.
    pub fn try_split<R: Rng + ?Sized>(
        &mut self,
        id: NodeId,
        rng: &mut R,
        config: &DungeonConfig,
    ) -> bool {
        let node = &self.nodes[id.0];
        if !node.is_leaf() {
            return false;
        }

        let cell = node.cell;
        let axis = if rng.gen_bool(0.5) { SplitAxis::X } else { SplitAxis::Z };
        let i = axis.index();
        let delta = cell.max[i] - cell.min[i];
        let at = random_between(
            rng,
            cell.min[i] + config.split_margin * delta,
            cell.max[i] - config.split_margin * delta,
        );

        let (cell_a, cell_b) = split_cell(&cell, axis, at);
        if !(config.is_valid_cell(&cell_a) && config.is_valid_cell(&cell_b)) {
            return false;
        }

        self.attach_children(id, axis, cell_a, cell_b);
        true
    }

    /// Partitions the whole volume: every valid leaf gets one split attempt,
    /// then its children are processed the same way.
    pub fn split_recursively<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &DungeonConfig) {
        let mut pending = vec![self.root()];

        while let Some(id) = pending.pop() {
            let node = &self.nodes[id.0];
            if !config.is_valid_cell(&node.cell) || node.depth >= config.max_depth {
                continue;
            }

            if node.is_leaf() {
                self.try_split(id, rng, config);
            }
            if let Some((a, b)) = self.nodes[id.0].children {
                pending.push(b);
                pending.push(a);
            }
        }

        log::debug!(
            "partitioned into {} node(s), {} leaf cell(s), depth {}",
            self.nodes.len(),
            self.leaf_nodes().len(),
            self.depth()
        );
    }

    /// Leaves in depth-first order, first child before second.
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut pending = vec![self.root()];

        while let Some(id) = pending.pop() {
            match self.nodes[id.0].children {
                Some((a, b)) => {
                    pending.push(b);
                    pending.push(a);
                }
                None => leaves.push(id),
            }
        }

        leaves
    }

    /// Nodes exactly `level` edges below the root, left to right.
    pub fn nodes_at_level(&self, level: u32) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending = vec![self.root()];

        while let Some(id) = pending.pop() {
            let node = &self.nodes[id.0];
            if node.depth == level {
                found.push(id);
            } else if let Some((a, b)) = node.children {
                pending.push(b);
                pending.push(a);
            }
        }

        found
    }

    /// True when `id` is `ancestor` or lies below it.
    pub fn is_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes.get(node.0).and_then(|n| n.parent);
        }
        false
    }

    pub fn debug_lines(&self, mode: DrawMode) -> Vec<DebugLine> {
        let mut lines = Vec::new();

        for node in &self.nodes {
            let aabb = match mode {
                DrawMode::Cells => Some(&node.cell),
                DrawMode::Rooms => node.room.as_ref(),
            };
            if let Some(aabb) = aabb {
                lines.extend(wire_box(aabb, node.color));
            }
        }

        if mode == DrawMode::Rooms {
            for hallway in &self.hallways {
                lines.extend(wire_box(&hallway.bounds, YELLOW));
            }
        }

        lines
    }
}

fn split_cell(cell: &Aabb, axis: SplitAxis, at: f32) -> (Aabb, Aabb) {
    let i = axis.index();

    let mut max_a = cell.max;
    max_a[i] = at;
    let mut min_b = cell.min;
    min_b[i] = at;

    (Aabb::new(cell.min, max_a), Aabb::new(min_b, cell.max))
}

/// Uniform sample in `[low, high)`, or `low` when the range is empty.
pub(crate) fn random_between<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Well-spread debug hue per node.
fn node_color(index: usize) -> Color {
    let hue = (index as f32 * 0.618_034).fract() * 6.0;
    let (saturation, value) = (0.8, 1.0);
    let chroma = value * saturation;
    let x = chroma * (1.0 - (hue % 2.0 - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match hue as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    [r + m, g + m, b + m, 1.0]
}
