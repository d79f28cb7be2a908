//! Output time grids.

use crate::error::{SimError, SimResult};

/// Ordered, strictly increasing output times (s).
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    /// Build a grid from explicit points.
    pub fn from_points(points: Vec<f64>) -> SimResult<Self> {
        if points.is_empty() {
            return Err(SimError::InvalidGrid {
                what: "grid must contain at least one time",
                index: 0,
            });
        }
        for (i, t) in points.iter().enumerate() {
            if !t.is_finite() {
                return Err(SimError::InvalidGrid {
                    what: "grid times must be finite",
                    index: i,
                });
            }
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(SimError::InvalidGrid {
                    what: "grid times must be strictly increasing",
                    index: i + 1,
                });
            }
        }
        Ok(Self { points })
    }

    /// `samples` evenly spaced times from `t0` to `t_end`, both included.
    pub fn linspace(t0: f64, t_end: f64, samples: usize) -> SimResult<Self> {
        if samples < 2 {
            return Err(SimError::InvalidArg {
                what: "linspace needs at least two samples",
            });
        }
        if !(t0.is_finite() && t_end.is_finite()) || t_end <= t0 {
            return Err(SimError::InvalidArg {
                what: "linspace needs finite bounds with t_end > t0",
            });
        }
        let span = t_end - t0;
        let last = (samples - 1) as f64;
        let mut points: Vec<f64> = (0..samples)
            .map(|i| t0 + span * (i as f64) / last)
            .collect();
        // Land exactly on the requested end time.
        points[samples - 1] = t_end;
        Self::from_points(points)
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn start(&self) -> f64 {
        self.points[0]
    }

    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a grid holds at least one time.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
