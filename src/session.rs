use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// One recorded stretch of focus time. Never mutated after it is pushed
/// onto a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "date")]
    pub timestamp: NaiveDateTime,
    pub distance: f64,
    pub duration: u64,
    pub completed: bool,
}

impl Session {
    pub fn new(distance: f64, duration: u64, completed: bool) -> Self {
        Self::at(now_micros(), distance, duration, completed)
    }

    pub fn at(timestamp: NaiveDateTime, distance: f64, duration: u64, completed: bool) -> Self {
        Self {
            timestamp,
            distance,
            duration,
            completed,
        }
    }
}

/// Local wall-clock time truncated to microseconds, matching the precision
/// already present in existing stats files.
fn now_micros() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// A user's full history plus running aggregates.
///
/// The aggregates are only ever changed through [`UserRecord::push`], which
/// keeps `total_distance`, `total_time` and `completed_sessions` equal to the
/// sums over `sessions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub total_time: u64,
    #[serde(default)]
    pub completed_sessions: u32,
}

impl UserRecord {
    pub fn push(&mut self, session: Session) {
        self.total_distance += session.distance;
        self.total_time += session.duration;
        if session.completed {
            self.completed_sessions += 1;
        }
        self.sessions.push(session);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// `Hh Mm` rendering of the accumulated time.
    pub fn formatted_time(&self) -> String {
        let hours = self.total_time / 3600;
        let minutes = (self.total_time % 3600) / 60;
        format!("{hours}h {minutes}m")
    }
}
