//! Math utilities module
//!
//! Provides convenient re-exports from glam and the rigid pose type shared by
//! joints and targets.

mod transform;

pub use transform::Pose;

// Re-export commonly used glam types
pub use glam::{Mat3, Mat4, Quat, Vec3};
