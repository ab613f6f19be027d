//! Time interval model.
//!
//! Slots are anchored to a calendar date, so intervals are expressed in
//! `NaiveDateTime` rather than time-of-day. This keeps arithmetic
//! monotonic even if a window were to reach midnight.
//!
//! # Rest gap
//! Two intervals *conflict* under a rest gap `g` when they overlap or when
//! the idle time between them is shorter than `g`. With `g = 0` this
//! degenerates to plain half-open overlap.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Duration of this window.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Duration of this window in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether `other` lies entirely inside this window (end inclusive).
    pub fn encloses(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Idle time between two non-overlapping windows, `None` if they overlap.
    pub fn gap_to(&self, other: &Self) -> Option<TimeDelta> {
        if self.overlaps(other) {
            None
        } else if self.end <= other.start {
            Some(other.start - self.end)
        } else {
            Some(self.start - other.end)
        }
    }

    /// Whether the two windows cannot both be held by one person or room
    /// that needs `rest_gap` of idle time between uses.
    pub fn conflicts_with(&self, other: &Self, rest_gap: TimeDelta) -> bool {
        match self.gap_to(other) {
            None => true,
            Some(gap) => gap < rest_gap,
        }
    }
}
