//! Tick timer service
//!
//! Turns a faster time source into ticks at the subscribed granularity.

use core::ops::BitOr;

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Set of calendar units that changed between two readings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);
    pub const ALL: Self = Self(0b11_1111);

    /// Units that changed from `prev` to `now`.
    ///
    /// The coarsest changed unit implies every finer one, so an hour jump
    /// that lands on the same minute still reports a minute change.
    pub fn changed(prev: &NaiveDateTime, now: &NaiveDateTime) -> Self {
        let coarsest = if prev.year() != now.year() {
            Self::YEAR
        } else if prev.month() != now.month() {
            Self::MONTH
        } else if prev.day() != now.day() {
            Self::DAY
        } else if prev.hour() != now.hour() {
            Self::HOUR
        } else if prev.minute() != now.minute() {
            Self::MINUTE
        } else if prev.second() != now.second() {
            Self::SECOND
        } else {
            return Self::NONE;
        };

        // Set the coarsest bit and all below it
        Self((coarsest.0 << 1) - 1)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TimeUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Fires when the subscribed unit changes
#[derive(Default)]
pub struct TickTimerService {
    /// Subscribed granularity, none while unsubscribed
    unit: Option<TimeUnits>,
    /// Time of the previous poll
    last: Option<NaiveDateTime>,
}

impl TickTimerService {
    pub const fn new() -> Self {
        Self {
            unit: None,
            last: None,
        }
    }

    /// Subscribe at `unit` granularity, counting changes from `now`
    pub fn subscribe(&mut self, unit: TimeUnits, now: NaiveDateTime) {
        debug!("Tick service subscribed");
        self.unit = Some(unit);
        self.last = Some(now);
    }

    pub fn unsubscribe(&mut self) {
        debug!("Tick service unsubscribed");
        self.unit = None;
        self.last = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.unit.is_some()
    }

    /// Feed the current time, returns the changed units when a tick is due.
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<TimeUnits> {
        let unit = self.unit?;
        let changed = match self.last.replace(now) {
            Some(prev) => TimeUnits::changed(&prev, &now),
            None => TimeUnits::ALL,
        };

        if changed.contains(unit) {
            Some(changed)
        } else {
            None
        }
    }
}
