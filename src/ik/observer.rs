use crate::error::Degeneracy;
use glam::Vec3;

/// Receives the geometric constructions made while solving.
///
/// Purely diagnostic: the solver behaves identically whichever observer is
/// attached. All methods default to doing nothing.
pub trait SolveObserver {
    /// A cone constraint was active at `joint`. `projection` is the point the
    /// outgoing link projects to on the incoming axis, `unconstrained` the
    /// point the link pointed at before it was limited.
    fn constraint_construction(&mut self, _joint: Vec3, _projection: Vec3, _unconstrained: Vec3) {}

    /// A joint could not be placed or oriented and kept its previous state.
    fn degenerate(&mut self, _joint_index: usize, _kind: Degeneracy) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}
