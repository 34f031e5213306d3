use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::chat::{ChatBot, ChatLog};
use crate::config::Config;
use crate::notify::{CompletionAlert, Notifier};
use crate::runtime::{FixedTicker, TickerWorker};
use crate::theme::Background;
use crate::timer::{SessionSink, SharedTimer, TimerEngine, TimerError, TimerEvent};
use crate::ui::TimerView;

/// What a key press asks the timer view to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Back,
    Quit,
    Interrupt,
    Chat,
    Stats,
    ColorPicker,
    NewTimer,
}

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Interrupt),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char(' ') => Some(Command::TogglePause),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'b' => Some(Command::Back),
                'q' => Some(Command::Quit),
                'c' => Some(Command::Chat),
                's' => Some(Command::Stats),
                'o' => Some(Command::ColorPicker),
                'n' => Some(Command::NewTimer),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Line-based screens that take over the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubMode {
    Chat,
    Stats,
    ColorPicker,
}

/// What the foreground loop does after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Suspend(SubMode),
    NewTimer,
    Quit,
    Interrupted,
}

/// Shown in place of the status line once a goal is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub distance: f64,
    pub advice: &'static str,
    pub wisdom: &'static str,
}

/// Stops the running goal cycle and persists the abandonment.
///
/// Cloned into the interrupt handler so a signal can end the cycle while the
/// foreground is blocked in a sub-mode.
#[derive(Clone)]
pub struct AbandonHandle {
    timer: SharedTimer,
    sink: Arc<dyn SessionSink>,
}

impl AbandonHandle {
    /// Returns false when no cycle was running.
    pub fn abandon(&self) -> bool {
        match self.timer.stop() {
            Some(event) => {
                log::info!("goal abandoned at {:?}", event.progress().elapsed);
                self.sink.on_event(&event);
                true
            }
            None => false,
        }
    }
}

/// Foreground state: owns the goal cycle, the ticker worker and everything
/// the renderer shows besides the timer itself.
pub struct App {
    pub username: String,
    pub background: Background,
    pub star_phase: u64,
    pub chat_log: ChatLog,
    pub bot: ChatBot,
    pub completion: Option<Completion>,
    rate: f64,
    ticker: FixedTicker,
    timer: SharedTimer,
    sink: Arc<dyn SessionSink>,
    notifier: Arc<dyn Notifier>,
    /// Break advice and wisdom for the running cycle, drawn at start so the
    /// notification and the panel agree.
    pending: (&'static str, &'static str),
    worker: Option<TickerWorker>,
    notice_tx: Sender<TimerEvent>,
    notice_rx: Receiver<TimerEvent>,
}

impl App {
    pub fn new(
        username: impl Into<String>,
        config: &Config,
        sink: Arc<dyn SessionSink>,
        notifier: Box<dyn Notifier>,
        bot: ChatBot,
    ) -> Self {
        let (notice_tx, notice_rx) = mpsc::channel();
        let engine = TimerEngine::new(Duration::from_secs(config.checkpoint_secs));
        Self {
            username: username.into(),
            background: config.background,
            star_phase: 0,
            chat_log: ChatLog::default(),
            bot,
            completion: None,
            rate: config.meters_per_minute,
            ticker: FixedTicker::new(Duration::from_millis(config.tick_rate_ms)),
            timer: SharedTimer::new(engine),
            sink,
            notifier: Arc::from(notifier),
            pending: ("", ""),
            worker: None,
            notice_tx,
            notice_rx,
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn timer(&self) -> &SharedTimer {
        &self.timer
    }

    pub fn abandon_handle(&self) -> AbandonHandle {
        AbandonHandle {
            timer: self.timer.clone(),
            sink: self.sink.clone(),
        }
    }

    /// Begin a goal cycle and the worker that drives it.
    pub fn start_goal(&mut self, distance_goal: u32) -> Result<(), TimerError> {
        if self.timer.is_running() {
            return Err(TimerError::AlreadyRunning);
        }
        self.stop_worker();
        self.timer.start(distance_goal, self.rate)?;
        self.completion = None;
        self.pending = (self.bot.break_advice(), self.bot.wisdom());
        let (advice, _) = self.pending;
        let sink = CompletionAlert::new(self.sink.clone(), self.notifier.clone(), advice);
        self.worker = Some(TickerWorker::spawn(
            self.timer.clone(),
            self.ticker,
            sink,
            self.notice_tx.clone(),
        ));
        log::info!(
            "{} started a {distance_goal}m goal at {}m/min",
            self.username,
            self.rate
        );
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match Command::from_key(key) {
            Some(command) => self.execute(command),
            None => Flow::Continue,
        }
    }

    pub fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::TogglePause => {
                let paused = self.timer.toggle_pause();
                log::debug!("paused: {paused}");
                Flow::Continue
            }
            Command::Back => Flow::Continue,
            Command::Quit => {
                self.end_cycle();
                Flow::Quit
            }
            Command::Interrupt => {
                self.end_cycle();
                Flow::Interrupted
            }
            Command::NewTimer => {
                self.end_cycle();
                Flow::NewTimer
            }
            Command::Chat => Flow::Suspend(SubMode::Chat),
            Command::Stats => Flow::Suspend(SubMode::Stats),
            Command::ColorPicker => Flow::Suspend(SubMode::ColorPicker),
        }
    }

    /// Apply timer notices that arrived since the last frame.
    pub fn drain_notices(&mut self) {
        while let Ok(event) = self.notice_rx.try_recv() {
            self.on_timer_event(event);
        }
    }

    pub fn on_timer_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Completed(progress) => {
                let (advice, wisdom) = self.pending;
                log::info!(
                    "{} reached the goal: {:.1}m in {}s",
                    self.username,
                    progress.distance,
                    progress.duration_secs()
                );
                self.completion = Some(Completion {
                    distance: progress.distance,
                    advice,
                    wisdom,
                });
            }
            TimerEvent::Checkpoint(progress) => {
                log::debug!("checkpoint at {}s", progress.duration_secs());
            }
            TimerEvent::Abandoned(_) => {}
        }
    }

    pub fn advance_frame(&mut self) {
        self.star_phase = self.star_phase.wrapping_add(1);
    }

    pub fn view(&self) -> TimerView<'_> {
        TimerView {
            snapshot: self.timer.snapshot(),
            username: &self.username,
            background: self.background,
            star_phase: self.star_phase,
            chat_log: &self.chat_log,
            completion: self.completion.as_ref(),
        }
    }

    /// Abandon (and persist) the running cycle, then stop the worker.
    fn end_cycle(&mut self) {
        self.abandon_handle().abandon();
        self.stop_worker();
    }

    fn stop_worker(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            worker.stop();
        }
    }
}

impl Drop for App {
    /// A cycle still running here was cut short by an error path; record it
    /// like any other abandonment.
    fn drop(&mut self) {
        self.end_cycle();
    }
}
