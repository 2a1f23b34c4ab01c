//! Error types for the IK solver and the dungeon generator.

use thiserror::Error;

use crate::dungeon::NodeId;

/// Which geometric construction collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degeneracy {
    /// Two points that must be apart coincide, so no direction exists between them.
    #[error("coincident points")]
    CoincidentPoints,
    /// A link direction is parallel to the up reference of the orientation frame.
    #[error("direction parallel to up reference")]
    ParallelToUp,
}

/// Errors raised by chain construction and the FABRIK solver helpers.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IkError {
    /// A chain needs a root and an end effector.
    #[error("invalid chain: {joints} joint(s) supplied, at least 2 required")]
    InvalidChain {
        /// Number of joints that were supplied.
        joints: usize,
    },

    /// A normalized direction was required but the vector had zero length.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(Degeneracy),

    /// A solve parameter is outside its documented range.
    #[error("invalid solve parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Errors raised by the BSP dungeon tree.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DungeonError {
    #[error("invalid bounds: min must be strictly below max on every axis")]
    InvalidBounds,

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("node {0:?} is not a leaf")]
    NotALeaf(NodeId),

    #[error("node {0:?} is already split")]
    AlreadySplit(NodeId),

    #[error("split coordinate {at} outside cell range ({min}, {max})")]
    SplitOutOfRange { at: f32, min: f32, max: f32 },
}

pub type IkResult<T> = Result<T, IkError>;
pub type DungeonResult<T> = Result<T, DungeonError>;
