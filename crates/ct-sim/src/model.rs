//! The model seam between the driver and a physical system.

use crate::error::SimResult;

/// A system `dx/dt = f(t, x)` with discrete controls on the side.
///
/// `State` only needs vector-space arithmetic (`add`, `scale`), supplied by
/// the model so that states can be plain structs.
///
/// Discrete controller logic does not belong in `rhs`. An integrator may
/// evaluate `rhs` several times per step and again on a retried step, so
/// `rhs` only borrows the model immutably. Controllers advance in
/// [`TransientModel::sample_controls`], which the driver calls exactly once
/// per accepted step.
pub trait TransientModel {
    type State: Clone + std::fmt::Debug;

    /// Return the initial state at the start of the run.
    fn initial_state(&self) -> Self::State;

    /// Derivative `f(t, x)`.
    fn rhs(&self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Element-wise `a + b`.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// `scale · a`.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Restore run-scoped state (controllers, logs) before a run starting at `t0`.
    fn reset(&mut self, _t0: f64) {}

    /// Advance discrete controllers from the accepted state `x` at time `t`.
    ///
    /// Called once before each step; the decision is held for the whole step.
    fn sample_controls(&mut self, _t: f64, _x: &Self::State) -> SimResult<()> {
        Ok(())
    }

    /// Check a state produced by a step before it is accepted.
    fn check_state(&self, _t: f64, _x: &Self::State) -> SimResult<()> {
        Ok(())
    }
}
