use crate::error::{IkError, IkResult};

/// Tuning for one solve call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveParams {
    /// End-effector distance to the target below which the chain counts as converged.
    pub tolerance: f32,
    /// Upper bound on backward/forward rounds per solve.
    pub max_iterations: u32,
    /// Cone half-angle in degrees between consecutive links, in `[0, 180]`.
    pub rotation_limit: f32,
    /// Stop iterating as soon as the end effector is within `tolerance`.
    pub early_exit: bool,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            max_iterations: 20,
            rotation_limit: 45.0,
            early_exit: true,
        }
    }
}

impl SolveParams {
    pub fn new(tolerance: f32, max_iterations: u32, rotation_limit: f32) -> Self {
        Self {
            tolerance,
            max_iterations,
            rotation_limit,
            ..Default::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_rotation_limit(mut self, rotation_limit: f32) -> Self {
        self.rotation_limit = rotation_limit;
        self
    }

    pub fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }

    pub fn validate(&self) -> IkResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(IkError::InvalidParameter("tolerance must be a positive distance"));
        }
        if self.max_iterations == 0 {
            return Err(IkError::InvalidParameter("max_iterations must be at least 1"));
        }
        if !(0.0..=180.0).contains(&self.rotation_limit) {
            return Err(IkError::InvalidParameter(
                "rotation_limit must lie within [0, 180] degrees",
            ));
        }
        Ok(())
    }

    /// Nearest usable parameters: the solver never fails on bad tuning.
    pub(crate) fn sanitized(&self) -> Self {
        let tolerance = if self.tolerance.is_finite() {
            self.tolerance.max(0.0)
        } else {
            0.0
        };
        let rotation_limit = if self.rotation_limit.is_nan() {
            180.0
        } else {
            self.rotation_limit.clamp(0.0, 180.0)
        };
        Self {
            tolerance,
            rotation_limit,
            ..*self
        }
    }
}
