//! Inverse Kinematics module
//!
//! This module contains the chain model, the cone joint limit and the
//! constrained FABRIK solver with its orientation pass.

pub mod chain;
pub mod constraint;
pub mod joint;
pub mod observer;
pub mod orientation;
pub mod params;
pub mod solver;

pub use chain::{Chain, ChainBuilder};
pub use constraint::{angle_between_degrees, enforce_constraint, ConeConstraint};
pub use joint::Joint;
pub use observer::{NoopObserver, SolveObserver};
pub use orientation::{finalize_orientations, frame_rotation, link_rotation, FALLBACK_UP, WORLD_UP};
pub use params::SolveParams;
pub use solver::{FabrikSolver, Regime, SolveResult};
