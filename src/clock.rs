//! Wall-clock source for the session.
//!
//! The reducer never reads the clock; the session asks a [`Clock`] once per
//! dispatch and puts the answer into the action payload.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Utc};
use parking_lot::Mutex;

use crate::domain::CalendarDay;

pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;

    /// The calendar day streaks and quests are counted in.
    fn today(&self) -> CalendarDay;
}

/// Real time. "Today" is the local calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> CalendarDay {
        CalendarDay::new(Local::now().date_naive())
    }
}

/// Manually driven clock. Clones share the same instant, so a test can keep
/// one handle and advance the clock owned by a session.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock();
        *now += Duration::days(days);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    /// The UTC date of the current instant.
    fn today(&self) -> CalendarDay {
        CalendarDay::new(self.now.lock().date_naive())
    }
}
