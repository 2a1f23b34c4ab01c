//! Debug visualization data
//!
//! Colored line segments a host can draw: the constraint constructions the
//! solver reports, joint-limit cones and dungeon boxes. Nothing here feeds
//! back into solving or generation.

pub mod lines;
pub mod shapes;

pub use lines::{Color, DebugLine, DebugLines, LineVertex, BLUE, RED, WHITE, YELLOW};
pub use shapes::{joint_limit_cone, wire_box, DEFAULT_CONE_SCALE, DEFAULT_CONE_STEPS};
