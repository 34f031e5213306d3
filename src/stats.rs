use itertools::Itertools;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::session::{Session, UserRecord};
use crate::timer::{SessionSink, TimerEvent};

/// Everything persisted, keyed by username.
pub type StatsMap = BTreeMap<String, UserRecord>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read stats file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("stats file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write stats file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// File-backed session history.
///
/// Every [`StatsStore::record`] rewrites the whole file before returning.
/// Sessions arrive at most a few times a minute, so durability wins over
/// batching.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    users: StatsMap,
}

impl StatsStore {
    /// Open the store at `path`, starting empty when the file is missing or
    /// unreadable.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let users = match Self::load(&path) {
            Ok(users) => users,
            Err(e) => {
                log::warn!("starting with empty stats: {e}");
                StatsMap::new()
            }
        };
        Self { path, users }
    }

    pub fn load(path: &Path) -> Result<StatsMap, StoreError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StatsMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the full mapping through a sibling temp file so a crash mid-write
    /// never leaves a truncated history behind.
    pub fn save(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let data = serde_json::to_vec_pretty(&self.users).map_err(|e| write_err(e.into()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }

    /// Append a session for `username` and persist immediately.
    ///
    /// The in-memory record is updated even when the write fails, so the
    /// leaderboard stays accurate for the rest of the process.
    pub fn record(
        &mut self,
        username: &str,
        distance: f64,
        duration: u64,
        completed: bool,
    ) -> Result<(), StoreError> {
        self.record_session(username, Session::new(distance, duration, completed))
    }

    pub fn record_session(&mut self, username: &str, session: Session) -> Result<(), StoreError> {
        self.users
            .entry(username.to_string())
            .or_default()
            .push(session);
        self.save()
    }

    pub fn users(&self) -> &StatsMap {
        &self.users
    }

    pub fn user(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        leaderboard(&self.users)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub total_distance: f64,
    pub time: String,
    pub sessions: usize,
    pub completed: u32,
}

/// Users ranked by total distance, furthest first. Ties keep name order.
pub fn leaderboard(users: &StatsMap) -> Vec<LeaderboardRow> {
    users
        .iter()
        .sorted_by(|a, b| b.1.total_distance.total_cmp(&a.1.total_distance))
        .enumerate()
        .map(|(idx, (name, record))| LeaderboardRow {
            rank: idx + 1,
            name: name.clone(),
            total_distance: record.total_distance,
            time: record.formatted_time(),
            sessions: record.session_count(),
            completed: record.completed_sessions,
        })
        .collect()
}

/// Persists timer events for one user into a shared [`StatsStore`].
#[derive(Debug, Clone)]
pub struct StatsRecorder {
    store: Arc<Mutex<StatsStore>>,
    username: String,
}

impl StatsRecorder {
    pub fn new(store: Arc<Mutex<StatsStore>>, username: impl Into<String>) -> Self {
        Self {
            store,
            username: username.into(),
        }
    }
}

impl SessionSink for StatsRecorder {
    fn on_event(&self, event: &TimerEvent) {
        let progress = event.progress();
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = store.record(
            &self.username,
            progress.distance,
            progress.duration_secs(),
            event.is_completed(),
        ) {
            log::error!("could not persist session for {}: {e}", self.username);
        } else {
            log::debug!("recorded {event:?} for {}", self.username);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Progress;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use std::time::Duration;
    use tempfile::tempdir;

    fn fixed_session(distance: f64, duration: u64, completed: bool) -> Session {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_micro_opt(9, 30, 0, 250)
            .unwrap();
        Session::at(ts, distance, duration, completed)
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = StatsStore::open(dir.path().join("stats.json"));
        assert!(store.leaderboard().is_empty());
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "{{{").unwrap();

        assert_matches!(StatsStore::load(&path), Err(StoreError::Parse { .. }));
        assert!(StatsStore::open(&path).leaderboard().is_empty());
    }

    #[test]
    fn record_appends_and_updates_aggregates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut store = StatsStore::open(&path);

        store.record("ada", 7.5, 45, false).unwrap();
        let before = store.user("ada").unwrap().total_distance;
        store.record("ada", 100.0, 600, true).unwrap();

        let ada = store.user("ada").unwrap();
        assert_eq!(ada.session_count(), 2);
        assert_eq!(ada.total_distance - before, 100.0);
        assert_eq!(ada.total_time, 645);
        assert_eq!(ada.completed_sessions, 1);
    }

    #[test]
    fn record_is_durable_before_returning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut store = StatsStore::open(&path);
        store.record("grace", 5.0, 30, false).unwrap();

        let on_disk = StatsStore::load(&path).unwrap();
        assert_eq!(on_disk.get("grace"), store.user("grace"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn load_then_save_preserves_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(
            &path,
            r#"{
  "bob": {
    "sessions": [
      {"date": "2024-05-01T10:00:00.123456", "distance": 12.5, "duration": 75, "completed": false}
    ],
    "total_distance": 12.5,
    "total_time": 75,
    "completed_sessions": 0
  }
}"#,
        )
        .unwrap();

        let store = StatsStore::open(&path);
        let original: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        store.save().unwrap();
        let rewritten: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();

        assert_eq!(original, rewritten);
        assert_eq!(StatsStore::load(&path).unwrap(), *store.users());
    }

    #[test]
    fn completed_sessions_defaults_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(
            &path,
            r#"{"old": {"sessions": [], "total_distance": 0, "total_time": 0}}"#,
        )
        .unwrap();

        let store = StatsStore::open(&path);
        assert_eq!(store.user("old").unwrap().completed_sessions, 0);
    }

    #[test]
    fn save_failure_is_reported_but_memory_is_kept() {
        let dir = tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("stats.json");
        fs::create_dir(&path).unwrap();
        let mut store = StatsStore {
            path: path.clone(),
            users: StatsMap::new(),
        };

        assert_matches!(
            store.record_session("ada", fixed_session(1.0, 6, false)),
            Err(StoreError::Write { .. })
        );
        assert_eq!(store.user("ada").unwrap().session_count(), 1);
    }

    #[test]
    fn leaderboard_ranks_by_distance() {
        let mut users = StatsMap::new();
        for (name, distance) in [("ann", 50.0), ("cy", 300.0), ("bo", 120.0)] {
            users
                .entry(name.to_string())
                .or_default()
                .push(fixed_session(distance, 3700, true));
        }

        let rows = leaderboard(&users);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["cy", "bo", "ann"]);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[2].rank, 3);
        assert_eq!(rows[0].time, "1h 1m");
        assert_eq!(rows[0].completed, 1);
    }

    #[test]
    fn recorder_persists_each_event_kind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let store = Arc::new(Mutex::new(StatsStore::open(&path)));
        let recorder = StatsRecorder::new(store.clone(), "lin");

        let progress = Progress {
            distance: 5.0,
            elapsed: Duration::from_millis(30_400),
        };
        recorder.on_event(&TimerEvent::Checkpoint(progress));
        recorder.on_event(&TimerEvent::Abandoned(progress));
        recorder.on_event(&TimerEvent::Completed(progress));

        let on_disk = StatsStore::load(&path).unwrap();
        let lin = on_disk.get("lin").unwrap();
        assert_eq!(lin.session_count(), 3);
        assert_eq!(lin.total_time, 90);
        assert_eq!(lin.completed_sessions, 1);
        assert_eq!(
            lin.sessions.iter().map(|s| s.completed).collect::<Vec<_>>(),
            vec![false, false, true]
        );
    }
}
