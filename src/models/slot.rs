//! Generated slot model.
//!
//! A slot is one block of time during which one or more rooms run the exam
//! concurrently, together with the staff who proctor and grade each room.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{ExamCategory, RoomAssignment, StaffAssignment, TimeWindow};

/// Lifecycle status of a slot once handed to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Generated, not yet confirmed.
    Draft,
    /// Confirmed on the timetable.
    #[default]
    Scheduled,
    /// Exam took place.
    Completed,
    /// Withdrawn from the timetable.
    Cancelled,
}

/// One exam slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSlot {
    /// Subject the exam belongs to.
    pub subject_id: String,
    /// Semester the exam belongs to.
    pub semester_id: String,
    /// Lifecycle status.
    pub status: SlotStatus,
    /// Exam format.
    pub category: ExamCategory,
    /// Human-readable label (`prefix + separator + index`).
    pub label: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time of day.
    pub start_time: NaiveTime,
    /// End time of day.
    pub end_time: NaiveTime,
    /// Rooms running in this slot, each with its students.
    pub rooms: Vec<RoomAssignment>,
    /// One proctor per room, in room order.
    pub proctors: Vec<StaffAssignment>,
    /// One grader per room, in room order.
    pub graders: Vec<StaffAssignment>,
}

impl GeneratedSlot {
    /// The slot as a dated interval.
    pub fn interval(&self) -> TimeWindow {
        TimeWindow::new(
            self.date.and_time(self.start_time),
            self.date.and_time(self.end_time),
        )
    }

    /// Slot length (minutes).
    pub fn duration_minutes(&self) -> i64 {
        self.interval().duration_minutes()
    }

    /// Students seated across all rooms.
    pub fn student_count(&self) -> usize {
        self.rooms.iter().map(RoomAssignment::student_count).sum()
    }

    /// Number of rooms running.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Room identifiers, in room order.
    pub fn room_ids(&self) -> Vec<&str> {
        self.rooms.iter().map(|r| r.room_id.as_str()).collect()
    }

    /// Finds a room of this slot.
    pub fn room(&self, room_id: &str) -> Option<&RoomAssignment> {
        self.rooms.iter().find(|r| r.room_id == room_id)
    }

    /// Proctor position for a room.
    pub fn proctor_for(&self, room_id: &str) -> Option<&StaffAssignment> {
        self.proctors.iter().find(|s| s.room_id == room_id)
    }

    /// Grader position for a room.
    pub fn grader_for(&self, room_id: &str) -> Option<&StaffAssignment> {
        self.graders.iter().find(|s| s.room_id == room_id)
    }

    /// Proctor and grader positions, proctors first.
    pub fn staff(&self) -> impl Iterator<Item = &StaffAssignment> {
        self.proctors.iter().chain(self.graders.iter())
    }

    /// Whether every position in the slot is filled.
    pub fn is_fully_staffed(&self) -> bool {
        self.proctors.len() == self.rooms.len()
            && self.graders.len() == self.rooms.len()
            && self.staff().all(StaffAssignment::is_assigned)
    }
}
