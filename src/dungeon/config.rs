use crate::collision::Aabb;

/// Tuning for partitioning, room sizing and hallway placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DungeonConfig {
    /// Cells smaller than this volume are never split.
    pub min_cell_volume: f32,
    /// Largest allowed ratio between a cell's x and z extents, either way round.
    pub max_aspect_ratio: f32,
    /// Fraction of the cell kept clear of the split plane on each side.
    pub split_margin: f32,
    /// Room extent is at most the cell extent minus this, on x and z.
    pub wall_padding: f32,
    pub hallway_width: f32,
    pub hallway_height: f32,
    pub max_depth: u32,
    /// Hallway placements tried per node before giving up.
    pub connect_attempts: u32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            min_cell_volume: 20.0 * 2.0 * 20.0,
            max_aspect_ratio: 5.0,
            split_margin: 0.3,
            wall_padding: 2.0,
            hallway_width: 1.0,
            hallway_height: 1.0,
            max_depth: 16,
            connect_attempts: 8,
        }
    }
}

impl DungeonConfig {
    pub fn with_min_cell_volume(mut self, volume: f32) -> Self {
        self.min_cell_volume = volume;
        self
    }

    pub fn with_max_aspect_ratio(mut self, ratio: f32) -> Self {
        self.max_aspect_ratio = ratio;
        self
    }

    pub fn with_split_margin(mut self, margin: f32) -> Self {
        self.split_margin = margin;
        self
    }

    pub fn with_wall_padding(mut self, padding: f32) -> Self {
        self.wall_padding = padding;
        self
    }

    pub fn with_hallway_size(mut self, width: f32, height: f32) -> Self {
        self.hallway_width = width;
        self.hallway_height = height;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_connect_attempts(mut self, attempts: u32) -> Self {
        self.connect_attempts = attempts;
        self
    }

    /// Whether `cell` is large and square enough to hold a room.
    pub fn is_valid_cell(&self, cell: &Aabb) -> bool {
        if cell.volume() < self.min_cell_volume {
            return false;
        }

        let size = cell.size();
        let ratio = (size.x / size.z).abs();
        ratio <= self.max_aspect_ratio && ratio >= 1.0 / self.max_aspect_ratio
    }
}
