use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;

use cosmodoro::app::{App, Flow};
use cosmodoro::chat::ChatBot;
use cosmodoro::config::Config;
use cosmodoro::notify::SilentNotifier;
use cosmodoro::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use cosmodoro::stats::{StatsRecorder, StatsStore};
use cosmodoro::timer::{Phase, SessionSink};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn build(config: &Config, store: &Arc<Mutex<StatsStore>>) -> (App, Arc<StatsRecorder>) {
    let recorder = Arc::new(StatsRecorder::new(store.clone(), "ada"));
    let app = App::new(
        "ada",
        config,
        recorder.clone(),
        Box::new(SilentNotifier),
        ChatBot::seeded(11),
    );
    (app, recorder)
}

// Headless run of the foreground loop: the quit key after 45s of a 100m goal
// leaves one checkpoint and one abandonment on disk.
#[test]
fn headless_quit_mid_goal_persists_checkpoint_and_abandonment() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stats.json");
    let store = Arc::new(Mutex::new(StatsStore::open(&path)));

    // A one-minute tick keeps the background worker idle; time is advanced
    // by hand and its events delivered the way the worker would.
    let config = Config {
        tick_rate_ms: 60_000,
        ..Default::default()
    };
    let (mut app, recorder) = build(&config, &store);
    app.start_goal(100).unwrap();

    for event in app.timer().tick(Duration::from_secs(45)) {
        recorder.on_event(&event);
        app.on_timer_event(event);
    }

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    tx.send(key('q')).unwrap();

    let mut flow = Flow::Continue;
    for _ in 0..100u32 {
        flow = match runner.step() {
            AppEvent::Key(k) => app.handle_key(k),
            AppEvent::Resize | AppEvent::Tick => Flow::Continue,
        };
        if flow != Flow::Continue {
            break;
        }
    }
    assert_eq!(flow, Flow::Quit);

    let users = StatsStore::load(&path).unwrap();
    let record = &users["ada"];
    assert_eq!(record.session_count(), 2);
    assert_eq!(record.sessions[0].duration, 30);
    assert!((record.sessions[0].distance - 5.0).abs() < 1e-9);
    assert_eq!(record.sessions[1].duration, 45);
    assert!((record.sessions[1].distance - 7.5).abs() < 1e-9);
    assert!(record.sessions.iter().all(|s| !s.completed));
    assert_eq!(record.completed_sessions, 0);
    assert_eq!(record.total_time, 75);
}

// The real ticker worker drives a tiny goal to completion and the completion
// panel becomes visible to the renderer.
#[test]
fn headless_worker_completes_goal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stats.json");
    let store = Arc::new(Mutex::new(StatsStore::open(&path)));

    // 5m at 6000 m/min is 50ms of focus.
    let config = Config {
        meters_per_minute: 6000.0,
        tick_rate_ms: 5,
        ..Default::default()
    };
    let (mut app, _) = build(&config, &store);
    app.start_goal(5).unwrap();

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    let deadline = Instant::now() + Duration::from_secs(5);
    while app.completion.is_none() && Instant::now() < deadline {
        runner.step();
        app.drain_notices();
        app.advance_frame();
    }

    let completion = app.completion.clone().expect("goal should complete");
    assert!(completion.distance >= 5.0);
    assert!(!completion.advice.is_empty());
    assert_eq!(app.view().snapshot.phase, Phase::Stopped);

    let users = StatsStore::load(&path).unwrap();
    let record = &users["ada"];
    assert_eq!(record.completed_sessions, 1);
    assert!(record.sessions.last().unwrap().completed);

    // Quitting after completion records nothing further.
    let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    assert_eq!(app.handle_key(quit), Flow::Quit);
    let after = StatsStore::load(&path).unwrap();
    assert_eq!(after["ada"].session_count(), record.session_count());
}

#[test]
fn headless_pause_freezes_progress() {
    let dir = tempdir().unwrap();
    let store = Arc::new(Mutex::new(StatsStore::open(dir.path().join("stats.json"))));
    let config = Config {
        tick_rate_ms: 60_000,
        ..Default::default()
    };
    let (mut app, _) = build(&config, &store);
    app.start_goal(100).unwrap();

    app.timer().tick(Duration::from_secs(10));
    app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
    assert!(app.timer().tick(Duration::from_secs(120)).is_empty());

    let snapshot = app.view().snapshot;
    assert_eq!(snapshot.phase, Phase::Paused);
    assert_eq!(snapshot.elapsed, Duration::from_secs(10));
}
