//! Exam slot request model.
//!
//! The request is what a calling layer submits when it wants a timetable
//! for one exam of one subject: who sits the exam, where it may run, when,
//! and which optimization objective to prefer.
//!
//! # Time Representation
//! Durations and rest gaps are whole minutes. The daily window is a pair of
//! times of day applied to `start_date`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::RoomRef;

/// A student registered for the exam.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentRef {
    /// Unique student identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl StudentRef {
    /// Creates a new student reference.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Exam format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamCategory {
    /// Multiple-choice paper.
    #[default]
    MultipleChoice,
    /// Practical exam.
    Practice,
}

/// Input for one exam-slot generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSlotRequest {
    /// Label prefix for generated slots.
    pub slot_name: String,
    /// Subject the exam belongs to.
    pub subject_id: String,
    /// Semester the exam belongs to.
    pub semester_id: String,
    /// Registered students, in roster order.
    pub students: Vec<StudentRef>,
    /// Rooms the caller wants to use, with the seating to offer in each.
    pub rooms: Vec<RoomRef>,
    /// Exam format.
    pub category: ExamCategory,
    /// Calendar date of the exam.
    pub start_date: NaiveDate,
    /// Length of every slot (minutes).
    pub duration_minutes: i64,
    /// Earliest time of day a slot may start.
    pub start_time_in_day: NaiveTime,
    /// Latest time of day a slot may end.
    pub end_time_in_day: NaiveTime,
    /// Minimum idle time between two uses of a room or a teacher (minutes).
    pub rest_gap_minutes: i64,
    /// Minimize the number of rooms used.
    pub favor_fewer_rooms: bool,
    /// Minimize the number of time slots.
    pub favor_fewer_slots: bool,
}

impl ExamSlotRequest {
    /// Creates a request with an empty roster, no rooms, a 60 minute
    /// duration in an 08:00-17:00 window, and no rest gap.
    pub fn new(
        slot_name: impl Into<String>,
        subject_id: impl Into<String>,
        semester_id: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            slot_name: slot_name.into(),
            subject_id: subject_id.into(),
            semester_id: semester_id.into(),
            students: Vec::new(),
            rooms: Vec::new(),
            category: ExamCategory::default(),
            start_date,
            duration_minutes: 60,
            start_time_in_day: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            end_time_in_day: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            rest_gap_minutes: 0,
            favor_fewer_rooms: false,
            favor_fewer_slots: false,
        }
    }

    /// Adds a student to the roster.
    pub fn with_student(mut self, student: StudentRef) -> Self {
        self.students.push(student);
        self
    }

    /// Replaces the roster.
    pub fn with_students(mut self, students: Vec<StudentRef>) -> Self {
        self.students = students;
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: RoomRef) -> Self {
        self.rooms.push(room);
        self
    }

    /// Replaces the room list.
    pub fn with_rooms(mut self, rooms: Vec<RoomRef>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Sets the exam category.
    pub fn with_category(mut self, category: ExamCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the slot duration (minutes).
    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets the daily window.
    pub fn with_window(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time_in_day = start;
        self.end_time_in_day = end;
        self
    }

    /// Sets the rest gap (minutes).
    pub fn with_rest_gap(mut self, minutes: i64) -> Self {
        self.rest_gap_minutes = minutes;
        self
    }

    /// Sets the "fewer rooms" objective.
    pub fn favor_fewer_rooms(mut self, favor: bool) -> Self {
        self.favor_fewer_rooms = favor;
        self
    }

    /// Sets the "fewer slots" objective.
    pub fn favor_fewer_slots(mut self, favor: bool) -> Self {
        self.favor_fewer_slots = favor;
        self
    }

    /// Window start on the exam date.
    pub fn window_start(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time_in_day)
    }

    /// Window end on the exam date.
    pub fn window_end(&self) -> NaiveDateTime {
        self.start_date.and_time(self.end_time_in_day)
    }

    /// Length of the daily window (minutes). Negative if the window is inverted.
    pub fn window_minutes(&self) -> i64 {
        (self.window_end() - self.window_start()).num_minutes()
    }

    /// Number of registered students.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }
}
