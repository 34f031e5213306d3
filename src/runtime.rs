use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::timer::{SessionSink, SharedTimer, TimerEvent};

/// Unified event type consumed by the foreground loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm.
///
/// Polls on the calling thread instead of running a reader thread, so
/// nothing competes for stdin while a sub-mode reads whole lines.
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        match event::poll(timeout) {
            Ok(true) => {}
            Ok(false) => return Err(RecvTimeoutError::Timeout),
            Err(_) => return Err(RecvTimeoutError::Disconnected),
        }
        match event::read() {
            // Windows reports both press and release; only presses are commands.
            Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => Ok(AppEvent::Key(key)),
            Ok(CtEvent::Resize(_, _)) => Ok(AppEvent::Resize),
            Ok(_) => Err(RecvTimeoutError::Timeout),
            Err(_) => Err(RecvTimeoutError::Disconnected),
        }
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Runner that advances the foreground one event/frame at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to one frame interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// Background worker that advances a [`SharedTimer`] on a fixed cadence.
///
/// Each tick advances the timer by the wall-clock time since the previous
/// wake, so time spent in the sink (a synchronous save) is not lost. Every
/// tick's events go to the sink first (persistence) and then to the
/// foreground over the notice channel. The worker exits on its own once the
/// timer is no longer running, and within one wait when [`TickerWorker::stop`]
/// is called or the handle is dropped.
pub struct TickerWorker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TickerWorker {
    pub fn spawn<T, S>(
        timer: SharedTimer,
        ticker: T,
        sink: S,
        notices: Sender<TimerEvent>,
    ) -> Self
    where
        T: Ticker,
        S: SessionSink,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            let interval = ticker.interval();
            let mut last_wake = Instant::now();
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let now = Instant::now();
                let delta = now - last_wake;
                last_wake = now;
                if !timer.is_running() {
                    break;
                }
                for event in timer.tick(delta) {
                    sink.on_event(&event);
                    // The foreground may be gone during shutdown; persistence
                    // above has already happened.
                    let _ = notices.send(event);
                }
            }
            log::debug!("ticker worker exiting");
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Signal the worker and wait for it to exit.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("ticker worker panicked");
            }
        }
    }
}

impl Drop for TickerWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
