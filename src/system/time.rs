//! Time keeping module for PineTime

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use embassy_time::Instant;

use minimal_watchface::ClockSource;

/// Local wall clock time observed at a known system instant
#[derive(Clone, Copy)]
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from UTC epoch seconds, observed now
    pub fn from_epoch(utc_secs: i64, utc_offset: i32) -> Option<Self> {
        let time = DateTime::from_timestamp(utc_secs + utc_offset as i64, 0)?.naive_utc();
        Some(Self {
            time,
            instant: Instant::now(),
        })
    }
}

/// Clock derived from a time reference and the uptime counter
#[derive(Clone, Copy)]
pub struct TimeManager {
    reference: TimeReference,
    clock_24h: bool,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference, clock_24h: bool) -> Self {
        Self {
            reference,
            clock_24h,
        }
    }

    /// Get current time
    pub fn get_time(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        let delta = TimeDelta::microseconds(elapsed.as_micros() as i64);
        self.reference
            .time
            .checked_add_signed(delta)
            .unwrap_or(self.reference.time)
    }
}

impl ClockSource for TimeManager {
    fn now(&self) -> NaiveDateTime {
        self.get_time()
    }

    fn is_24h_style(&self) -> bool {
        self.clock_24h
    }
}
