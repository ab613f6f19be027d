//! Timetable (solution) model.
//!
//! A timetable is the ordered list of generated slots for one exam, plus
//! any invariant violations found when auditing it.

use serde::{Deserialize, Serialize};

use super::{GeneratedSlot, RoomAssignment, StaffAssignment};

/// A complete exam timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Slots in production order.
    pub slots: Vec<GeneratedSlot>,
    /// Invariant violations recorded by an audit.
    pub violations: Vec<Violation>,
}

/// An invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (student, room, teacher, or slot label).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A rostered student is seated nowhere.
    MissingStudent,
    /// A student is seated more than once.
    DuplicateStudent,
    /// A seated student is not on the roster.
    UnknownStudent,
    /// A room holds more students than its capacity.
    CapacityExceeded,
    /// A room is used twice without the required rest gap.
    RoomReused,
    /// A teacher holds positions in two rooms at overlapping times.
    StaffOverlap,
    /// A teacher's consecutive duties are closer than the rest gap.
    RestGapTooShort,
    /// A slot leaves the daily window.
    OutsideWindow,
    /// A slot's length differs from the requested duration.
    WrongDuration,
    /// A room lacks a proctor or grader.
    PendingStaff,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let severity = match violation_type {
            ViolationType::MissingStudent
            | ViolationType::DuplicateStudent
            | ViolationType::UnknownStudent => 100,
            ViolationType::CapacityExceeded | ViolationType::StaffOverlap => 95,
            ViolationType::RoomReused | ViolationType::OutsideWindow => 90,
            ViolationType::WrongDuration | ViolationType::RestGapTooShort => 80,
            ViolationType::PendingStaff => 50,
        };
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
            severity,
        }
    }
}

impl Timetable {
    /// Wraps generated slots.
    pub fn new(slots: Vec<GeneratedSlot>) -> Self {
        Self {
            slots,
            violations: Vec::new(),
        }
    }

    /// Adds a violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether the timetable has no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of room assignments across all slots.
    pub fn room_count(&self) -> usize {
        self.slots.iter().map(GeneratedSlot::room_count).sum()
    }

    /// Number of seated students across all slots.
    pub fn student_count(&self) -> usize {
        self.slots.iter().map(GeneratedSlot::student_count).sum()
    }

    /// Finds a slot by label.
    pub fn slot_by_label(&self, label: &str) -> Option<&GeneratedSlot> {
        self.slots.iter().find(|s| s.label == label)
    }

    /// Slot and room where a student sits.
    pub fn room_of_student(&self, student_id: &str) -> Option<(&GeneratedSlot, &RoomAssignment)> {
        self.slots.iter().find_map(|slot| {
            slot.rooms
                .iter()
                .find(|r| r.contains_student(student_id))
                .map(|r| (slot, r))
        })
    }

    /// Every position a teacher holds, with its slot.
    pub fn assignments_for_teacher(
        &self,
        teacher_id: &str,
    ) -> Vec<(&GeneratedSlot, &StaffAssignment)> {
        self.slots
            .iter()
            .flat_map(|slot| {
                slot.staff()
                    .filter(move |s| s.teacher_id() == Some(teacher_id))
                    .map(move |s| (slot, s))
            })
            .collect()
    }

    /// Unwraps the slots.
    pub fn into_slots(self) -> Vec<GeneratedSlot> {
        self.slots
    }
}

impl From<Vec<GeneratedSlot>> for Timetable {
    fn from(slots: Vec<GeneratedSlot>) -> Self {
        Self::new(slots)
    }
}
