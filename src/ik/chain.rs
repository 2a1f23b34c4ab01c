use super::joint::Joint;
use crate::error::{IkError, IkResult};
use crate::math::Pose;
use glam::{Quat, Vec3};

/// Rigid-link joint chain, root first.
///
/// Rest distances and the total length are measured once from the initial
/// joint positions and never recomputed; the solver only moves joints.
#[derive(Debug, Clone)]
pub struct Chain {
    pub(crate) joints: Vec<Joint>,
    pub(crate) rest_distances: Vec<f32>,
    pub(crate) chain_length: f32,
}

impl Chain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    pub fn from_positions<I>(positions: I) -> IkResult<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        positions
            .into_iter()
            .fold(ChainBuilder::new(), ChainBuilder::add_joint)
            .build()
    }

    pub fn from_poses<I>(poses: I) -> IkResult<Self>
    where
        I: IntoIterator<Item = Pose>,
    {
        let joints: Vec<Joint> = poses.into_iter().map(Joint::from).collect();
        ChainBuilder { joints }.build()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    pub fn joint_mut(&mut self, index: usize) -> Option<&mut Joint> {
        self.joints.get_mut(index)
    }

    pub fn rest_distances(&self) -> &[f32] {
        &self.rest_distances
    }

    /// Rest distance between joint `index` and joint `index + 1`.
    pub fn rest_distance(&self, index: usize) -> Option<f32> {
        self.rest_distances.get(index).copied()
    }

    pub fn chain_length(&self) -> f32 {
        self.chain_length
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn root(&self) -> Vec3 {
        self.joints[0].position
    }

    pub fn end_effector(&self) -> Vec3 {
        self.joints[self.joints.len() - 1].position
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.joints.iter().map(|j| j.position)
    }

    /// Largest deviation of any current link length from its rest distance.
    pub fn max_link_error(&self) -> f32 {
        self.joints
            .windows(2)
            .zip(&self.rest_distances)
            .map(|(w, rest)| ((w[1].position - w[0].position).length() - rest).abs())
            .fold(0.0, f32::max)
    }
}

pub struct ChainBuilder {
    joints: Vec<Joint>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    pub fn add_joint(mut self, position: Vec3) -> Self {
        self.joints.push(Joint::new(position));
        self
    }

    pub fn add_joint_with_rotation(mut self, position: Vec3, rotation: Quat) -> Self {
        self.joints.push(Joint::new(position).with_rotation(rotation));
        self
    }

    pub fn build(self) -> IkResult<Chain> {
        if self.joints.len() < 2 {
            return Err(IkError::InvalidChain {
                joints: self.joints.len(),
            });
        }

        let rest_distances = self.calculate_rest_distances();
        let chain_length = rest_distances.iter().sum();
        Ok(Chain {
            joints: self.joints,
            rest_distances,
            chain_length,
        })
    }

    fn calculate_rest_distances(&self) -> Vec<f32> {
        self.joints
            .windows(2)
            .map(|w| (w[1].position - w[0].position).length())
            .collect()
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rest_distances_measured_at_construction() {
        let chain = Chain::builder()
            .add_joint(Vec3::ZERO)
            .add_joint(Vec3::new(0.0, 1.0, 0.0))
            .add_joint(Vec3::new(3.0, 5.0, 0.0))
            .build()
            .unwrap();

        assert_eq!(chain.joint_count(), 3);
        assert_eq!(chain.rest_distances(), &[1.0, 5.0]);
        assert_relative_eq!(chain.chain_length(), 6.0);
    }

    #[test]
    fn moving_joints_does_not_change_rest_distances() {
        let mut chain =
            Chain::from_positions([Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)]).unwrap();

        chain.joints_mut()[2].position = Vec3::new(10.0, 0.0, 0.0);

        assert_eq!(chain.rest_distances(), &[1.0, 1.0]);
        assert_relative_eq!(chain.chain_length(), 2.0);
        assert_relative_eq!(chain.max_link_error(), 8.0);
    }

    #[test]
    fn fewer_than_two_joints_is_rejected() {
        assert_eq!(
            Chain::from_positions(Vec::<Vec3>::new()).unwrap_err(),
            IkError::InvalidChain { joints: 0 }
        );
        assert_eq!(
            Chain::builder().add_joint(Vec3::ZERO).build().unwrap_err(),
            IkError::InvalidChain { joints: 1 }
        );
    }

    #[test]
    fn poses_keep_their_rotation() {
        let rotation = Quat::from_rotation_y(0.5);
        let chain = Chain::from_poses([
            Pose::new(Vec3::ZERO, rotation),
            Pose::from_position(Vec3::Y),
        ])
        .unwrap();

        assert_eq!(chain.joints()[0].rotation, rotation);
        assert_eq!(chain.root(), Vec3::ZERO);
        assert_eq!(chain.end_effector(), Vec3::Y);
    }
}
