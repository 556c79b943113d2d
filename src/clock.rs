//! Fixed-timestep accumulator for the caller's frame loop.
//!
//! ```
//! use tri::clock::Accumulator;
//!
//! let mut acc = Accumulator::new(1.0 / 60.0, 8);
//! // a 50 ms frame is three whole ticks
//! assert_eq!(acc.advance(0.05), 3);
//! ```

use log::warn;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    dt: f64,
    pending: f64,
    max_ticks: u32,
}

impl Accumulator {
    /// `max_ticks` caps catch-up per frame; leftover time past the cap is
    /// dropped.
    pub fn new(dt: Scalar, max_ticks: u32) -> Self {
        Accumulator {
            dt: dt as f64,
            pending: 0.0,
            max_ticks: max_ticks.max(1),
        }
    }

    pub fn from_config(cfg: &SimConfig, max_ticks: u32) -> Self {
        Self::new(cfg.dt, max_ticks)
    }

    /// Adds `elapsed` seconds and returns how many ticks are now due.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.pending += elapsed;
        }
        let mut ticks = 0;
        // small slack so 3 * dt worth of frame time really is 3 ticks
        let slack = self.dt * 1e-6;
        while self.pending + slack >= self.dt && ticks < self.max_ticks {
            self.pending -= self.dt;
            ticks += 1;
        }
        if ticks == self.max_ticks && self.pending + slack >= self.dt {
            warn!("dropping {:.3}s of simulation time, frame too slow", self.pending);
            self.pending = 0.0;
        }
        if self.pending < 0.0 {
            self.pending = 0.0;
        }
        ticks
    }

    /// Fraction of a tick still pending, for render interpolation.
    pub fn alpha(&self) -> f64 {
        self.pending / self.dt
    }
}
