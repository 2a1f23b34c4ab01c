use crate::math::Pose;
use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Joint {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
    }
}

impl From<Pose> for Joint {
    fn from(pose: Pose) -> Self {
        Self {
            position: pose.position,
            rotation: pose.rotation,
        }
    }
}
