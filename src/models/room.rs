//! Room model.
//!
//! A room is a physical exam venue with a fixed seating capacity. The
//! partitioner turns the roster into one [`RoomAssignment`] per room used.

use serde::{Deserialize, Serialize};

use super::StudentRef;

/// A room that can host an exam.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomRef {
    /// Unique room identifier.
    pub id: String,
    /// Number of students the room seats in one slot.
    pub capacity: u32,
}

impl RoomRef {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Students seated in one room for one slot.
///
/// Invariant: `students.len() <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAssignment {
    /// Room identifier.
    pub room_id: String,
    /// Effective capacity the room was packed against.
    pub capacity: u32,
    /// Seated students, in roster order.
    pub students: Vec<StudentRef>,
}

impl RoomAssignment {
    /// Creates an empty assignment for a room.
    pub fn new(room_id: impl Into<String>, capacity: u32) -> Self {
        Self {
            room_id: room_id.into(),
            capacity,
            students: Vec::new(),
        }
    }

    /// Number of seated students.
    #[inline]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Seats left.
    pub fn free_seats(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.students.len())
    }

    /// Whether no seat is left.
    pub fn is_full(&self) -> bool {
        self.free_seats() == 0
    }

    /// Whether the room holds no student.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Whether a student is seated here.
    pub fn contains_student(&self, student_id: &str) -> bool {
        self.students.iter().any(|s| s.id == student_id)
    }

    /// Seated fraction of capacity (0.0..=1.0). Zero for a zero-capacity room.
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.students.len() as f64 / f64::from(self.capacity)
        }
    }
}
