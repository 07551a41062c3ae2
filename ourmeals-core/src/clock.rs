//! Timestamp source for `createdAt`, `updatedAt` and `generatedAt`.
//!
//! Clocks report millisecond precision, matching what gets persisted.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

use crate::timestamp;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        timestamp::truncate(Utc::now())
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(timestamp::truncate(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(timestamp::truncate(self.now.get() + by));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
