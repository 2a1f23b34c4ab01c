use super::chain::Chain;
use super::constraint::ConeConstraint;
use super::observer::{NoopObserver, SolveObserver};
use super::orientation::{finalize_orientations, try_direction};
use super::params::SolveParams;
use crate::error::{Degeneracy, IkError, IkResult};
use crate::math::Pose;
use glam::Vec3;

/// Targets this close to full reach are stretched toward rather than iterated on.
const REACH_EPSILON: f32 = 1e-4;

/// Which strategy a solve call used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Target within the chain's length: iterative backward/forward reaching.
    Reachable,
    /// Target at or beyond the chain's length: single straight stretch toward it.
    Unreachable,
}

#[derive(Debug, Clone, Copy)]
pub struct SolveResult {
    pub regime: Regime,
    pub converged: bool,
    pub iterations: u32,
    pub final_distance: f32,
    /// Joint placements or orientations skipped because the geometry collapsed.
    pub degenerate_steps: u32,
}

pub struct FabrikSolver;

impl FabrikSolver {
    pub fn solve(chain: &mut Chain, target: &Pose, params: &SolveParams) -> SolveResult {
        Self::solve_observed(chain, target, params, &mut NoopObserver)
    }

    pub fn solve_observed(
        chain: &mut Chain,
        target: &Pose,
        params: &SolveParams,
        observer: &mut dyn SolveObserver,
    ) -> SolveResult {
        if let Err(err) = params.validate() {
            log::warn!("{err}; solving with clamped parameters");
        }
        let params = params.sanitized();
        let cone = ConeConstraint::new(params.rotation_limit);

        let root = chain.root();
        let distance_to_target = root.distance(target.position);
        let mut degenerate_steps = 0;

        let (regime, iterations) = if distance_to_target >= chain.chain_length - REACH_EPSILON {
            log::debug!(
                "target {:.3} away exceeds chain length {:.3}, stretching",
                distance_to_target,
                chain.chain_length
            );
            degenerate_steps += Self::stretch_towards_target(chain, target.position, observer);
            (Regime::Unreachable, 0)
        } else {
            let mut iterations = 0;
            // At least one round runs so the joint limits hold even when the
            // end effector starts on the target.
            for _ in 0..params.max_iterations {
                degenerate_steps +=
                    Self::iterate_observed(chain, target.position, root, &cone, observer);
                iterations += 1;
                if params.early_exit
                    && chain.end_effector().distance(target.position) <= params.tolerance
                {
                    break;
                }
            }
            (Regime::Reachable, iterations)
        };

        degenerate_steps += finalize_orientations(chain, target.rotation, observer);

        let final_distance = chain.end_effector().distance(target.position);
        let result = SolveResult {
            regime,
            converged: final_distance <= params.tolerance,
            iterations,
            final_distance,
            degenerate_steps,
        };
        log::debug!(
            "solve finished: {:?}, {} iteration(s), residual {:.5}",
            result.regime,
            result.iterations,
            result.final_distance
        );
        result
    }

    /// One backward (end to root) and one forward (root to end) reaching
    /// round. Returns the number of joints that could not be repositioned.
    pub fn iterate(chain: &mut Chain, target: Vec3, root: Vec3, params: &SolveParams) -> u32 {
        let cone = ConeConstraint::new(params.sanitized().rotation_limit);
        Self::iterate_observed(chain, target, root, &cone, &mut NoopObserver)
    }

    fn iterate_observed(
        chain: &mut Chain,
        target: Vec3,
        root: Vec3,
        cone: &ConeConstraint,
        observer: &mut dyn SolveObserver,
    ) -> u32 {
        Self::backward_pass(chain, target, cone, observer)
            + Self::forward_pass(chain, root, cone, observer)
    }

    fn backward_pass(
        chain: &mut Chain,
        target: Vec3,
        cone: &ConeConstraint,
        observer: &mut dyn SolveObserver,
    ) -> u32 {
        let n = chain.joints.len();
        let mut skipped = 0;

        chain.joints[n - 1].position = target;

        for i in (0..n - 1).rev() {
            let successor = chain.joints[i + 1].position;
            let current = chain.joints[i].position;

            // The joint next to the end effector has no link beyond it to bend against.
            let limit_target = if i == n - 2 {
                current
            } else {
                cone.enforce_observed(successor, chain.joints[i + 2].position, current, observer)
            };

            match reposition(successor, limit_target, chain.rest_distances[i]) {
                Ok(position) => chain.joints[i].position = position,
                Err(err) => {
                    absorb(i, err, observer);
                    skipped += 1;
                }
            }
        }

        skipped
    }

    fn forward_pass(
        chain: &mut Chain,
        root: Vec3,
        cone: &ConeConstraint,
        observer: &mut dyn SolveObserver,
    ) -> u32 {
        let n = chain.joints.len();
        let mut skipped = 0;

        chain.joints[0].position = root;

        for i in 0..n - 1 {
            let current = chain.joints[i].position;
            let next = chain.joints[i + 1].position;

            // The root's link is free; every later link is limited by its predecessor.
            let limit_target = if i == 0 {
                next
            } else {
                cone.enforce_observed(current, chain.joints[i - 1].position, next, observer)
            };

            match reposition(current, limit_target, chain.rest_distances[i]) {
                Ok(position) => chain.joints[i + 1].position = position,
                Err(err) => {
                    absorb(i + 1, err, observer);
                    skipped += 1;
                }
            }
        }

        skipped
    }

    fn stretch_towards_target(
        chain: &mut Chain,
        target: Vec3,
        observer: &mut dyn SolveObserver,
    ) -> u32 {
        let mut skipped = 0;

        for i in 0..chain.joints.len() - 1 {
            let current = chain.joints[i].position;
            match reposition(current, target, chain.rest_distances[i]) {
                Ok(position) => chain.joints[i + 1].position = position,
                Err(err) => {
                    absorb(i + 1, err, observer);
                    skipped += 1;
                }
            }
        }

        skipped
    }
}

/// Point at `rest_distance` from `anchor` on the way to `toward`, i.e.
/// `(1 - λ)·anchor + λ·toward` with `λ = rest_distance / |toward - anchor|`.
fn reposition(anchor: Vec3, toward: Vec3, rest_distance: f32) -> IkResult<Vec3> {
    let direction = try_direction(toward - anchor)
        .ok_or(IkError::DegenerateGeometry(Degeneracy::CoincidentPoints))?;
    Ok(anchor + direction * rest_distance)
}

fn absorb(joint_index: usize, err: IkError, observer: &mut dyn SolveObserver) {
    log::trace!("joint {joint_index} keeps its position: {err}");
    if let IkError::DegenerateGeometry(kind) = err {
        observer.degenerate(joint_index, kind);
    }
}
