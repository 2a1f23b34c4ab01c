//! # fabrik-dungeon
//!
//! Cone-constrained FABRIK inverse kinematics and a BSP dungeon generator.
//!
//! ## Features
//! - FABRIK (Forward And Backward Reaching Inverse Kinematics) solver with a
//!   per-joint cone limit and orientation frames along each link
//! - Debug line data for constraint constructions, joint-limit cones and boxes
//! - BSP dungeon: recursive cell splitting, rooms, raycast hallway placement
//!
//! ## Example
//! ```rust
//! use fabrik_dungeon::ik::{Chain, FabrikSolver, SolveParams};
//! use fabrik_dungeon::math::Pose;
//! use glam::Vec3;
//!
//! let mut chain = Chain::builder()
//!     .add_joint(Vec3::ZERO)
//!     .add_joint(Vec3::Y)
//!     .add_joint(Vec3::new(0.0, 2.0, 0.0))
//!     .build()
//!     .unwrap();
//!
//! let params = SolveParams::default().with_rotation_limit(180.0);
//! let target = Pose::from_position(Vec3::new(1.0, 1.0, 0.0));
//! let result = FabrikSolver::solve(&mut chain, &target, &params);
//! assert!(result.converged);
//! ```

pub mod collision;
pub mod debug;
pub mod dungeon;
pub mod error;
pub mod ik;
pub mod math;

pub use collision::{Aabb, BoxWorld, Ray, RayHit};
pub use dungeon::{BspTree, DungeonConfig, NodeId};
pub use error::{Degeneracy, DungeonError, IkError};
pub use ik::{Chain, ChainBuilder, FabrikSolver, Joint, Regime, SolveParams, SolveResult};
pub use math::Pose;
