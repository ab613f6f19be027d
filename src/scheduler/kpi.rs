//! Timetable quality metrics (KPIs).
//!
//! Computes indicators a caller can use to compare the outcome of the
//! different optimization modes for the same roster.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Slot count | Number of time slots |
//! | Room count | Room assignments across slots |
//! | Seat utilization | Seated students / offered seats of rooms used |
//! | Span | First slot start to last slot end |
//! | Max concurrent rooms | Largest number of rooms running at once |
//! | Staff load | Positions held per teacher |

use std::collections::BTreeMap;

use crate::models::{GeneratedSlot, Timetable};

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableKpi {
    /// Number of slots.
    pub slot_count: usize,
    /// Number of room assignments.
    pub room_count: usize,
    /// Number of seated students.
    pub student_count: usize,
    /// Seated fraction of the seats in used rooms (0.0..=1.0).
    pub seat_utilization: f64,
    /// Minutes from the first start to the last end.
    pub span_minutes: i64,
    /// Largest number of rooms running at the same time.
    pub max_concurrent_rooms: usize,
    /// Positions (proctor or grader) held per teacher id.
    pub staff_load: BTreeMap<String, usize>,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable.
    pub fn calculate(timetable: &Timetable) -> Self {
        let slots = &timetable.slots;

        let seats: u64 = slots
            .iter()
            .flat_map(|s| s.rooms.iter())
            .map(|r| u64::from(r.capacity))
            .sum();
        let student_count = timetable.student_count();
        let seat_utilization = if seats == 0 {
            0.0
        } else {
            student_count as f64 / seats as f64
        };

        let span_minutes = match (
            slots.iter().map(|s| s.interval().start).min(),
            slots.iter().map(|s| s.interval().end).max(),
        ) {
            (Some(first), Some(last)) => (last - first).num_minutes(),
            _ => 0,
        };

        let mut staff_load = BTreeMap::new();
        for position in slots.iter().flat_map(|s| s.staff()) {
            if let Some(id) = position.teacher_id() {
                *staff_load.entry(id.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            slot_count: slots.len(),
            room_count: timetable.room_count(),
            student_count,
            seat_utilization,
            span_minutes,
            max_concurrent_rooms: max_concurrent_rooms(slots),
            staff_load,
        }
    }

    /// Number of distinct teachers holding a position.
    pub fn distinct_staff(&self) -> usize {
        self.staff_load.len()
    }

    /// Largest number of positions held by one teacher.
    pub fn max_staff_load(&self) -> usize {
        self.staff_load.values().copied().max().unwrap_or(0)
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_slots: usize, min_utilization: f64) -> bool {
        self.slot_count <= max_slots && self.seat_utilization >= min_utilization
    }
}

/// Peak room concurrency; slots are compared pairwise by overlap.
fn max_concurrent_rooms(slots: &[GeneratedSlot]) -> usize {
    slots
        .iter()
        .map(|slot| {
            let window = slot.interval();
            slots
                .iter()
                .filter(|other| other.interval().contains(window.start))
                .map(GeneratedSlot::room_count)
                .sum()
        })
        .max()
        .unwrap_or(0)
}
