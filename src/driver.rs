//! Fixed-interval tick driver.
//!
//! Both simulations are passive: something outside has to decide when a tick
//! happens and how much time passes. [`TickDriver`] does that on a virtual
//! clock, so a front end (or a test) just reports elapsed time.

use qtty::{Quantity, Second};
use thiserror::Error;

/// Tolerance when comparing accumulated simulation times.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

/// Default cap on ticks fired by a single [`TickDriver::advance`] call.
pub const DEFAULT_MAX_TICKS_PER_ADVANCE: u64 = 1024;

/// A simulation that can be driven by [`TickDriver`].
pub trait Simulation {
    /// What a single tick reports.
    type Outcome;
    /// Read-only view for display.
    type Snapshot;

    /// Advances the simulation by one step.
    fn tick(&mut self) -> Self::Outcome;

    /// Lets simulation time pass without stepping.
    ///
    /// Simulations without deferred work can ignore this.
    fn advance_clock(&mut self, _dt: Quantity<Second>) {}

    /// Restores the initial state.
    fn reset(&mut self);

    fn snapshot(&self) -> Self::Snapshot;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DriverError {
    #[error("Tick interval must be positive and finite, got {0} s")]
    InvalidInterval(f64),

    #[error("Elapsed time must be non-negative and finite, got {0} s")]
    InvalidElapsed(f64),
}

/// Whether the driver is currently producing ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Playing,
}

/// Turns elapsed time into ticks at a fixed interval.
///
/// Ticks never overlap: each one runs to completion on `&mut` access to the
/// simulation before the next is considered. While stopped, time still
/// reaches the simulation clock but no ticks fire.
///
/// A single [`advance`](TickDriver::advance) fires at most
/// `max_ticks_per_advance` ticks; a longer backlog is skipped, though its
/// time still reaches the simulation clock.
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval: Quantity<Second>,
    /// Seconds left until the next tick.
    until_next: f64,
    state: DriverState,
    ticks: u64,
    max_ticks_per_advance: u64,
}

impl TickDriver {
    pub fn new(interval: Quantity<Second>) -> Result<Self, DriverError> {
        let v = interval.value();
        if !v.is_finite() || v <= 0.0 {
            return Err(DriverError::InvalidInterval(v));
        }
        Ok(Self {
            interval,
            until_next: v,
            state: DriverState::Stopped,
            ticks: 0,
            max_ticks_per_advance: DEFAULT_MAX_TICKS_PER_ADVANCE,
        })
    }

    /// Sets the per-call tick cap (at least 1).
    pub fn with_max_ticks_per_advance(mut self, max: u64) -> Self {
        self.max_ticks_per_advance = max.max(1);
        self
    }

    pub fn max_ticks_per_advance(&self) -> u64 {
        self.max_ticks_per_advance
    }

    pub fn interval(&self) -> Quantity<Second> {
        self.interval
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == DriverState::Playing
    }

    /// Total ticks fired since creation or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Starts ticking. The first tick fires one full interval from now.
    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        self.state = DriverState::Playing;
        self.until_next = self.interval.value();
        tracing::debug!(interval = self.interval.value(), "driver playing");
    }

    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
        tracing::debug!(ticks = self.ticks, "driver stopped");
    }

    /// Stops the driver and resets the simulation.
    pub fn reset<S: Simulation>(&mut self, sim: &mut S) {
        self.stop();
        self.ticks = 0;
        self.until_next = self.interval.value();
        sim.reset();
    }

    /// Lets `dt` pass, firing every tick that falls inside it.
    ///
    /// Time is handed to the simulation in slices that end exactly on tick
    /// boundaries, so deferred work due before a tick is applied first.
    ///
    /// Fails without touching the simulation if `dt` is negative or not
    /// finite.
    pub fn advance<S: Simulation>(
        &mut self,
        sim: &mut S,
        dt: Quantity<Second>,
    ) -> Result<Vec<S::Outcome>, DriverError> {
        let mut remaining = dt.value();
        if !remaining.is_finite() || remaining < 0.0 {
            return Err(DriverError::InvalidElapsed(remaining));
        }
        let mut outcomes = Vec::new();

        if !self.is_playing() {
            sim.advance_clock(Quantity::new(remaining));
            return Ok(outcomes);
        }

        let mut fired = 0;
        while self.until_next <= remaining + TIME_EPSILON {
            if fired == self.max_ticks_per_advance {
                let skipped = (remaining / self.interval.value()).floor();
                tracing::warn!(fired, skipped, "tick backlog skipped");
                // Keep the phase: the next tick lands where it would have.
                let phase = (remaining - self.until_next) % self.interval.value();
                self.until_next = self.interval.value() - phase;
                sim.advance_clock(Quantity::new(remaining));
                return Ok(outcomes);
            }
            let slice = self.until_next.min(remaining);
            remaining -= slice;
            sim.advance_clock(Quantity::new(slice));
            outcomes.push(sim.tick());
            fired += 1;
            self.ticks += 1;
            self.until_next = self.interval.value();
        }

        self.until_next -= remaining;
        sim.advance_clock(Quantity::new(remaining));
        Ok(outcomes)
    }
}

impl Default for TickDriver {
    /// One tick per second.
    fn default() -> Self {
        Self {
            interval: Quantity::new(1.0),
            until_next: 1.0,
            state: DriverState::Stopped,
            ticks: 0,
            max_ticks_per_advance: DEFAULT_MAX_TICKS_PER_ADVANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts ticks and accumulated time.
    #[derive(Debug, Default)]
    struct Counter {
        ticks: u32,
        clock: f64,
        tick_times: Vec<f64>,
    }

    impl Simulation for Counter {
        type Outcome = u32;
        type Snapshot = (u32, f64);

        fn tick(&mut self) -> u32 {
            self.ticks += 1;
            self.tick_times.push(self.clock);
            self.ticks
        }

        fn advance_clock(&mut self, dt: Quantity<Second>) {
            self.clock += dt.value();
        }

        fn reset(&mut self) {
            *self = Counter::default();
        }

        fn snapshot(&self) -> (u32, f64) {
            (self.ticks, self.clock)
        }
    }

    fn secs(v: f64) -> Quantity<Second> {
        Quantity::new(v)
    }

    #[test]
    fn rejects_bad_interval() {
        assert_eq!(
            TickDriver::new(secs(0.0)).unwrap_err(),
            DriverError::InvalidInterval(0.0)
        );
        assert!(TickDriver::new(secs(-1.0)).is_err());
        assert!(TickDriver::new(secs(f64::NAN)).is_err());
    }

    #[test]
    fn stopped_driver_never_ticks() {
        let mut driver = TickDriver::default();
        let mut sim = Counter::default();
        assert!(driver.advance(&mut sim, secs(10.0)).unwrap().is_empty());
        assert_eq!(sim.snapshot(), (0, 10.0));
    }

    #[test]
    fn fires_one_tick_per_interval() {
        let mut driver = TickDriver::new(secs(1.0)).unwrap();
        let mut sim = Counter::default();
        driver.play();

        assert_eq!(driver.advance(&mut sim, secs(3.5)).unwrap(), vec![1, 2, 3]);
        assert_eq!(sim.tick_times, vec![1.0, 2.0, 3.0]);
        assert_eq!(driver.advance(&mut sim, secs(0.25)).unwrap(), Vec::<u32>::new());
        assert_eq!(driver.advance(&mut sim, secs(0.25)).unwrap(), vec![4]);
        assert_eq!(driver.ticks(), 4);
        assert_eq!(sim.clock, 4.0);
    }

    #[test]
    fn small_steps_accumulate() {
        let mut driver = TickDriver::new(secs(0.5)).unwrap();
        let mut sim = Counter::default();
        driver.play();
        let mut fired = 0;
        for _ in 0..8 {
            fired += driver.advance(&mut sim, secs(0.125)).unwrap().len();
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn stop_pauses_and_play_restarts_interval() {
        let mut driver = TickDriver::new(secs(1.0)).unwrap();
        let mut sim = Counter::default();
        driver.play();
        driver.advance(&mut sim, secs(0.75)).unwrap();
        driver.stop();
        assert!(driver.advance(&mut sim, secs(5.0)).unwrap().is_empty());

        driver.play();
        assert!(driver.advance(&mut sim, secs(0.5)).unwrap().is_empty());
        assert_eq!(driver.advance(&mut sim, secs(0.5)).unwrap().len(), 1);
    }

    #[test]
    fn rejects_bad_elapsed_time() {
        let mut driver = TickDriver::default();
        let mut sim = Counter::default();
        driver.play();

        assert_eq!(
            driver.advance(&mut sim, secs(f64::INFINITY)).unwrap_err(),
            DriverError::InvalidElapsed(f64::INFINITY)
        );
        assert!(driver.advance(&mut sim, secs(f64::NAN)).is_err());
        assert!(driver.advance(&mut sim, secs(-0.5)).is_err());
        assert_eq!(sim.snapshot(), (0, 0.0));

        driver.stop();
        assert!(driver.advance(&mut sim, secs(f64::INFINITY)).is_err());
        assert_eq!(sim.clock, 0.0);
    }

    #[test]
    fn long_backlog_is_capped() {
        let mut driver = TickDriver::default().with_max_ticks_per_advance(10);
        let mut sim = Counter::default();
        driver.play();

        let fired = driver.advance(&mut sim, secs(1_000_000.5)).unwrap();
        assert_eq!(fired.len(), 10);
        assert_eq!(sim.clock, 1_000_000.5);

        // The skipped ticks keep their phase: next one is due at 1_000_001.
        assert!(driver.advance(&mut sim, secs(0.25)).unwrap().is_empty());
        assert_eq!(driver.advance(&mut sim, secs(0.25)).unwrap().len(), 1);
        assert_eq!(driver.ticks(), 11);
    }

    #[test]
    fn reset_stops_and_resets_simulation() {
        let mut driver = TickDriver::default();
        let mut sim = Counter::default();
        driver.play();
        driver.advance(&mut sim, secs(2.0)).unwrap();
        driver.reset(&mut sim);

        assert!(!driver.is_playing());
        assert_eq!(driver.ticks(), 0);
        assert_eq!(sim.snapshot(), (0, 0.0));
    }
}
