mod aabb;
mod raycast;
mod world;

pub use aabb::Aabb;
pub use raycast::{Ray, RayHit};
pub use world::BoxWorld;
