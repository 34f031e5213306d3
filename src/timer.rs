//! Distance-goal countdown engine.
//!
//! [`TimerEngine`] is a plain state machine driven by explicit `tick` calls,
//! so every property of the clock can be exercised without threads.
//! [`SharedTimer`] is the synchronization boundary used at runtime: the
//! ticker worker is the only caller of [`SharedTimer::tick`], while the input
//! loop only pauses, stops and takes snapshots.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub const CHECKPOINT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimerError {
    #[error("a goal is already running")]
    AlreadyRunning,
    #[error("distance goal must be a positive number of meters")]
    InvalidGoal,
    #[error("pace must be a positive number of meters per minute, got {0}")]
    InvalidRate(f64),
}

/// Distance and time covered at the moment an event was raised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub distance: f64,
    pub elapsed: Duration,
}

impl Progress {
    /// Whole seconds, as stored in session history.
    pub fn duration_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// Something the persistence side has to hear about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    /// In-progress snapshot, raised once per checkpoint boundary.
    Checkpoint(Progress),
    /// The goal was reached; the cycle is over.
    Completed(Progress),
    /// The user quit or replaced the goal before it was reached.
    Abandoned(Progress),
}

impl TimerEvent {
    pub fn progress(&self) -> Progress {
        match self {
            TimerEvent::Checkpoint(p) | TimerEvent::Completed(p) | TimerEvent::Abandoned(p) => *p,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TimerEvent::Completed(_))
    }
}

/// How the last goal cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Running,
    Paused,
}

/// Read-only copy of the engine handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSnapshot {
    pub distance_goal: u32,
    pub time_goal: Duration,
    pub elapsed: Duration,
    pub distance: f64,
    pub phase: Phase,
    pub outcome: Option<Outcome>,
}

impl TimerSnapshot {
    /// Fraction of the goal covered, clamped to `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.time_goal.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.time_goal.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn goal_minutes(&self) -> u64 {
        self.time_goal.as_secs() / 60
    }
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    rate: f64,
    distance_goal: u32,
    time_goal: Duration,
    elapsed: Duration,
    running: bool,
    paused: bool,
    checkpoint_interval: Duration,
    checkpoints_emitted: u64,
    outcome: Option<Outcome>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Duration::from_secs(CHECKPOINT_SECS))
    }
}

impl TimerEngine {
    pub fn new(checkpoint_interval: Duration) -> Self {
        Self {
            rate: 0.0,
            distance_goal: 0,
            time_goal: Duration::ZERO,
            elapsed: Duration::ZERO,
            running: false,
            paused: false,
            checkpoint_interval: checkpoint_interval.max(Duration::from_millis(1)),
            checkpoints_emitted: 0,
            outcome: None,
        }
    }

    /// Begin a new goal cycle. `rate` is in meters per minute.
    pub fn start(&mut self, distance_goal: u32, rate: f64) -> Result<(), TimerError> {
        if self.running {
            return Err(TimerError::AlreadyRunning);
        }
        if distance_goal == 0 {
            return Err(TimerError::InvalidGoal);
        }
        if !(rate.is_finite() && rate > 0.0) {
            return Err(TimerError::InvalidRate(rate));
        }

        // Tiny paces push the goal past what a Duration can hold.
        let time_goal = Duration::try_from_secs_f64(distance_goal as f64 / rate * 60.0)
            .map_err(|_| TimerError::InvalidRate(rate))?;

        self.rate = rate;
        self.distance_goal = distance_goal;
        self.time_goal = time_goal;
        self.elapsed = Duration::ZERO;
        self.running = true;
        self.paused = false;
        self.checkpoints_emitted = 0;
        self.outcome = None;
        Ok(())
    }

    /// Advance the clock by `delta` and report what happened.
    ///
    /// Elapsed time is accumulated as an integer [`Duration`], so boundary
    /// detection compares whole nanoseconds and summing many small deltas
    /// cannot land just short of a boundary.
    pub fn tick(&mut self, delta: Duration) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if !self.running || self.paused {
            return events;
        }

        self.elapsed += delta;

        // Each checkpoint reports the boundary it marks, not where this tick
        // landed.
        let interval = self.checkpoint_interval.as_nanos();
        let crossed = (self.elapsed.as_nanos() / interval) as u64;
        while self.checkpoints_emitted < crossed {
            self.checkpoints_emitted += 1;
            let boundary = interval * self.checkpoints_emitted as u128;
            let at = Duration::from_nanos(boundary as u64);
            events.push(TimerEvent::Checkpoint(self.progress_at(at)));
        }

        if self.elapsed >= self.time_goal {
            self.running = false;
            self.paused = false;
            self.outcome = Some(Outcome::Completed);
            events.push(TimerEvent::Completed(self.progress()));
        }

        events
    }

    pub fn pause(&mut self) -> bool {
        if self.running && !self.paused {
            self.paused = true;
            return true;
        }
        false
    }

    pub fn resume(&mut self) -> bool {
        if self.running && self.paused {
            self.paused = false;
            return true;
        }
        false
    }

    /// Returns the new paused state; a stopped timer stays unpaused.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.pause() {
            self.resume();
        }
        self.paused
    }

    /// Abandon the current cycle. Returns `None` when nothing is running.
    pub fn stop(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.paused = false;
        self.outcome = Some(Outcome::Abandoned);
        Some(TimerEvent::Abandoned(self.progress()))
    }

    pub fn distance_covered(&self) -> f64 {
        self.distance_at(self.elapsed)
    }

    fn distance_at(&self, elapsed: Duration) -> f64 {
        (elapsed.as_secs_f64() / 60.0) * self.rate
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn time_goal(&self) -> Duration {
        self.time_goal
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        match (self.running, self.paused) {
            (true, true) => Phase::Paused,
            (true, false) => Phase::Running,
            _ => Phase::Stopped,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            distance_goal: self.distance_goal,
            time_goal: self.time_goal,
            elapsed: self.elapsed,
            distance: self.distance_covered(),
            phase: self.phase(),
            outcome: self.outcome,
        }
    }

    fn progress(&self) -> Progress {
        self.progress_at(self.elapsed)
    }

    fn progress_at(&self, elapsed: Duration) -> Progress {
        Progress {
            distance: self.distance_at(elapsed),
            elapsed,
        }
    }
}

/// Receives persistence-worthy events from the engine.
pub trait SessionSink: Send + Sync + 'static {
    fn on_event(&self, event: &TimerEvent);
}

impl<S: SessionSink + ?Sized> SessionSink for Arc<S> {
    fn on_event(&self, event: &TimerEvent) {
        (**self).on_event(event)
    }
}

/// Cloneable handle to a mutex-guarded [`TimerEngine`].
#[derive(Debug, Clone, Default)]
pub struct SharedTimer {
    inner: Arc<Mutex<TimerEngine>>,
}

impl SharedTimer {
    pub fn new(engine: TimerEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// A panic on the other side of the lock leaves the engine in a
    /// consistent state (every method finishes its mutation before
    /// returning), so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, TimerEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&self, distance_goal: u32, rate: f64) -> Result<(), TimerError> {
        self.lock().start(distance_goal, rate)
    }

    /// Only the ticker worker calls this.
    pub fn tick(&self, delta: Duration) -> Vec<TimerEvent> {
        self.lock().tick(delta)
    }

    pub fn toggle_pause(&self) -> bool {
        self.lock().toggle_pause()
    }

    pub fn stop(&self) -> Option<TimerEvent> {
        self.lock().stop()
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.lock().snapshot()
    }
}
