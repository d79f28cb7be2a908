//! Simulation runner and result recording.

use tracing::{debug, info, warn};

use crate::error::{SimError, SimResult};
use crate::grid::TimeGrid;
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, faster, 1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Largest fixed sub-step between output times (seconds)
    pub max_dt: f64,
    /// Maximum number of accepted sub-steps (safety limit)
    pub max_steps: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
    /// Smallest sub-step a cutback may reach (seconds)
    pub min_dt: f64,
    /// Retries allowed for one sub-step
    pub max_retries: usize,
    /// Factor applied to dt on a retryable failure, in (0, 1)
    pub cutback_factor: f64,
    /// Factor applied to dt after a successful sub-step, >= 1
    pub grow_factor: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            max_dt: 10.0,
            max_steps: 1_000_000,
            integrator: IntegratorType::default(),
            min_dt: 1e-3,
            max_retries: 8,
            cutback_factor: 0.5,
            grow_factor: 2.0,
        }
    }
}

impl SimOptions {
    fn validate(&self) -> SimResult<()> {
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "max_dt must be positive",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if !(self.min_dt.is_finite() && self.min_dt > 0.0 && self.min_dt <= self.max_dt) {
            return Err(SimError::InvalidArg {
                what: "min_dt must be positive and no larger than max_dt",
            });
        }
        if !(self.cutback_factor > 0.0 && self.cutback_factor < 1.0) {
            return Err(SimError::InvalidArg {
                what: "cutback_factor must lie in (0, 1)",
            });
        }
        if !(self.grow_factor.is_finite() && self.grow_factor >= 1.0) {
            return Err(SimError::InvalidArg {
                what: "grow_factor must be at least 1",
            });
        }
        Ok(())
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

impl<S> SimRecord<S> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Iterate `(time, state)` samples in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &S)> + '_ {
        self.t.iter().copied().zip(self.x.iter())
    }

    pub fn last(&self) -> Option<(f64, &S)> {
        self.t.last().copied().zip(self.x.last())
    }
}

/// Progress report emitted after each output time is reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimProgress {
    pub time_s: f64,
    /// Fraction of the grid duration completed, in [0, 1]
    pub fraction: f64,
    /// Accepted sub-steps so far
    pub steps: usize,
}

/// Run a transient simulation over `grid` with fixed sub-steps.
pub fn run_sim<M: TransientModel>(
    model: &mut M,
    grid: &TimeGrid,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    run_sim_with_progress(model, grid, opts, None)
}

/// Run a transient simulation, reporting progress at every output time.
///
/// The state is advanced in sub-steps of at most `opts.max_dt`, shortened so
/// that every grid time is hit exactly. Before each sub-step the model's
/// controllers are sampled once from the accepted state. A retryable failure
/// repeats the sub-step from the same accepted state with a smaller dt.
pub fn run_sim_with_progress<M: TransientModel>(
    model: &mut M,
    grid: &TimeGrid,
    opts: &SimOptions,
    mut progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<SimRecord<M::State>> {
    opts.validate()?;

    let times = grid.points();
    let t0 = grid.start();
    let duration = grid.duration();

    model.reset(t0);
    let mut t = t0;
    let mut x = model.initial_state();
    model.check_state(t, &x)?;

    let mut t_record = Vec::with_capacity(times.len());
    let mut x_record = Vec::with_capacity(times.len());
    t_record.push(t);
    x_record.push(x.clone());

    info!(
        samples = times.len(),
        t_start = t0,
        t_end = grid.end(),
        max_dt = opts.max_dt,
        integrator = ?opts.integrator,
        "starting transient run"
    );

    let mut steps = 0_usize;
    let mut dt_trial = opts.max_dt;

    for &t_target in &times[1..] {
        while t < t_target {
            if steps >= opts.max_steps {
                return Err(SimError::StepLimit {
                    max_steps: opts.max_steps,
                    t_reached: t,
                });
            }

            model.sample_controls(t, &x)?;

            let remaining = t_target - t;
            let mut dt = dt_trial.min(remaining);
            let mut retries = 0;
            let x_next = loop {
                match attempt_step(model, opts.integrator, t, &x, dt) {
                    Ok(next) => break next,
                    Err(e) if e.is_retryable() => {
                        let next_dt = dt * opts.cutback_factor;
                        if retries >= opts.max_retries || next_dt < opts.min_dt {
                            return Err(SimError::StepUnderflow {
                                t_reached: t,
                                dt,
                                state: format!("{x:?}"),
                                reason: e.to_string(),
                            });
                        }
                        warn!(t, dt, next_dt, error = %e, "cutting back step");
                        dt = next_dt;
                        retries += 1;
                    }
                    Err(e) => return Err(e),
                }
            };

            // Snap to the target when the sub-step consumed the remainder.
            t = if dt >= remaining { t_target } else { t + dt };
            x = x_next;
            steps += 1;

            dt_trial = if retries > 0 {
                debug!(t, dt, retries, "step accepted after cutback");
                dt
            } else {
                (dt_trial * opts.grow_factor).min(opts.max_dt)
            };
        }

        t_record.push(t_target);
        x_record.push(x.clone());

        if let Some(report) = progress.as_deref_mut() {
            let fraction = if duration > 0.0 {
                ((t_target - t0) / duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            report(SimProgress {
                time_s: t_target,
                fraction,
                steps,
            });
        }
    }

    info!(steps, t_end = t, "transient run complete");

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}

fn attempt_step<M: TransientModel>(
    model: &M,
    integrator: IntegratorType,
    t: f64,
    x: &M::State,
    dt: f64,
) -> SimResult<M::State> {
    let next = match integrator {
        IntegratorType::RK4 => RK4.step(model, t, x, dt)?,
        IntegratorType::ForwardEuler => ForwardEuler.step(model, t, x, dt)?,
    };
    model.check_state(t + dt, &next)?;
    Ok(next)
}
