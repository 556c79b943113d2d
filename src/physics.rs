//! The per-tick driver.
//!
//! `Physics` owns configuration and run state but not the bodies; each call
//! to [`Physics::step`] borrows the caller's collection for that tick only.
//!
//! Order within a tick:
//! 0. bodies already non-finite on entry are made inert,
//! 1. every unordered pair is tested and colliding pairs are resolved,
//! 2. bodies are integrated one at a time, each followed by the boundary
//!    check; the first crossing terminates the run and the remaining bodies
//!    are left untouched for this tick,
//! 3. bodies that picked up non-finite state are rolled back to where they
//!    were before the tick and marked inert.
//!
//! Stepping a terminated simulation returns [`SimError::Halted`].

use log::{debug, info, trace, warn};

use crate::collision::{self, Resolution};
use crate::forces::{AccelSet, NewtonianGravity};
use crate::integrator::{self, Step};
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    Terminated,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Pairs whose velocities were exchanged.
    pub collisions: Vec<(usize, usize)>,
    /// Colliding pairs with coincident centres, left unresolved.
    pub degenerate: Vec<(usize, usize)>,
    /// Bodies rolled back and made inert this tick.
    pub anomalies: Vec<usize>,
    /// Body that crossed the boundary, if any.
    pub crossed: Option<usize>,
}

impl StepReport {
    pub fn terminated(&self) -> bool {
        self.crossed.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    pos: Vec3,
    vel: Vec3,
    acc: Vec3,
}

impl Snapshot {
    fn of(body: &Body) -> Self {
        Snapshot {
            pos: body.pos,
            vel: body.vel,
            acc: body.acc,
        }
    }

    /// Pre-tick state, with any field that was already non-finite zeroed.
    fn restore(&self, body: &mut Body) {
        let finite_or_zero = |v: Vec3| {
            if v.iter().all(|c| c.is_finite()) {
                v
            } else {
                Vec3::zeros()
            }
        };
        body.pos = finite_or_zero(self.pos);
        body.vel = finite_or_zero(self.vel);
        body.acc = finite_or_zero(self.acc);
        body.force = Vec3::zeros();
    }
}

pub struct Physics {
    config: SimConfig,
    step: Step,
    state: SimState,
    forces: AccelSet,
    inert: Vec<bool>,
    snapshots: Vec<Snapshot>,
    extra: Vec<Vec3>,
    ticks: u64,
}

impl Physics {
    /// Fails if the configuration is invalid.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut forces = AccelSet::new();
        if let Some(g) = config.gravity {
            debug!("gravity enabled, G = {}", g.g);
            forces = forces.with(NewtonianGravity { g: g.g });
        }
        Ok(Physics {
            step: Step::from_config(&config),
            config,
            state: SimState::Running,
            forces,
            inert: Vec::new(),
            snapshots: Vec::new(),
            extra: Vec::new(),
            ticks: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn should_close(&self) -> bool {
        self.state == SimState::Terminated
    }

    /// Completed ticks since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_inert(&self, index: usize) -> bool {
        self.inert.get(index).copied().unwrap_or(false)
    }

    /// Back to `Running` with no inert bodies.
    pub fn reset(&mut self) {
        self.state = SimState::Running;
        self.inert.clear();
        self.ticks = 0;
    }

    /// Apply an impulse to `bodies[index]` between ticks.
    pub fn push(&self, bodies: &mut [Body], index: usize, force: Vec3) -> SimResult<()> {
        if !force.iter().all(|c| c.is_finite()) {
            return Err(SimError::NonFiniteForce(index));
        }
        let body = bodies.get_mut(index).ok_or(SimError::UnknownBody(index))?;
        body.push(force);
        trace!("push {} ({}) by {:?}", index, body.name, force);
        Ok(())
    }

    fn sync_len(&mut self, n: usize) {
        if self.inert.len() != n {
            if !self.inert.is_empty() {
                warn!("body count changed from {} to {}, clearing inert marks", self.inert.len(), n);
            }
            self.inert = vec![false; n];
        }
        self.extra.resize(n, Vec3::zeros());
    }

    /// Advance every body by one tick.
    pub fn step(&mut self, bodies: &mut [Body]) -> SimResult<StepReport> {
        if self.state == SimState::Terminated {
            return Err(SimError::Halted);
        }
        let n = bodies.len();
        self.sync_len(n);
        let mut report = StepReport::default();

        // bodies left non-finite between ticks must not reach the collision phase
        for (i, body) in bodies.iter_mut().enumerate() {
            if !self.inert[i] && !body.is_finite() {
                warn!("body {} ({}) is non-finite before the tick, marking inert", i, body.name);
                Snapshot::of(body).restore(body);
                self.inert[i] = true;
                report.anomalies.push(i);
            }
        }

        self.snapshots.clear();
        self.snapshots.extend(bodies.iter().map(Snapshot::of));

        let inert = &self.inert;
        let skip = |i: usize| inert[i];

        for (i, j) in collision::detect(bodies, self.config.collision_tolerance, skip) {
            let (a, b) = collision::pair_mut(bodies, i, j);
            match collision::resolve(a, b) {
                Resolution::Resolved => {
                    debug!("collision {} <-> {}", i, j);
                    report.collisions.push((i, j));
                }
                Resolution::Degenerate => {
                    warn!("bodies {} and {} share a centre, collision skipped", i, j);
                    report.degenerate.push((i, j));
                }
            }
        }

        if self.forces.is_empty() {
            for a in self.extra.iter_mut() {
                *a = Vec3::zeros();
            }
        } else {
            self.forces.accumulate(bodies, &skip, &mut self.extra);
        }

        let mut processed = n;
        for (i, body) in bodies.iter_mut().enumerate() {
            if self.inert[i] {
                continue;
            }
            integrator::integrate(body, &self.step, &self.extra[i]);

            if let Some(boundary) = self.config.boundary {
                if body.is_finite() && boundary.crossed(&body.pos) {
                    info!("body {} ({}) crossed {:?} >= {}, terminating", i, body.name, boundary.axis, boundary.threshold);
                    self.state = SimState::Terminated;
                    report.crossed = Some(i);
                    processed = i + 1;
                    break;
                }
            }
        }

        for (i, body) in bodies.iter_mut().enumerate().take(processed) {
            if !self.inert[i] && !body.is_finite() {
                warn!("body {} ({}) went non-finite, restoring and marking inert", i, body.name);
                self.snapshots[i].restore(body);
                self.inert[i] = true;
                report.anomalies.push(i);
            }
        }

        self.ticks += 1;
        trace!("tick {} done, {} collisions", self.ticks, report.collisions.len());
        Ok(report)
    }
}
