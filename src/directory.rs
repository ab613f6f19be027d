//! Collaborator directories.
//!
//! The engine never queries live storage. Callers implement these traits
//! over their own data layer; the generator takes one snapshot of each
//! directory before the pipeline starts and works on owned copies.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::models::{RoomRef, TeacherRef};

/// Source of physical rooms and their seating capacity.
pub trait RoomDirectory: Send + Sync + Debug {
    /// All known rooms, in a stable order.
    fn rooms(&self) -> Vec<RoomRef>;

    /// Looks up one room.
    fn room(&self, room_id: &str) -> Option<RoomRef> {
        self.rooms().into_iter().find(|r| r.id == room_id)
    }
}

/// Source of teachers qualified to staff a subject's exams.
pub trait TeacherDirectory: Send + Sync + Debug {
    /// Eligible teachers for a subject, in preference order.
    fn eligible_teachers(&self, subject_id: &str) -> Vec<TeacherRef>;
}

/// Room directory backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoomDirectory {
    rooms: Vec<RoomRef>,
}

impl InMemoryRoomDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room.
    pub fn with_room(mut self, room: RoomRef) -> Self {
        self.rooms.push(room);
        self
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl From<Vec<RoomRef>> for InMemoryRoomDirectory {
    fn from(rooms: Vec<RoomRef>) -> Self {
        Self { rooms }
    }
}

impl RoomDirectory for InMemoryRoomDirectory {
    fn rooms(&self) -> Vec<RoomRef> {
        self.rooms.clone()
    }

    fn room(&self, room_id: &str) -> Option<RoomRef> {
        self.rooms.iter().find(|r| r.id == room_id).cloned()
    }
}

/// Teacher directory keyed by subject id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeacherDirectory {
    by_subject: HashMap<String, Vec<TeacherRef>>,
}

impl InMemoryTeacherDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a teacher as eligible for a subject.
    pub fn with_teacher(mut self, subject_id: impl Into<String>, teacher: TeacherRef) -> Self {
        self.add(subject_id, teacher);
        self
    }

    /// Registers a teacher as eligible for a subject.
    pub fn add(&mut self, subject_id: impl Into<String>, teacher: TeacherRef) {
        self.by_subject
            .entry(subject_id.into())
            .or_default()
            .push(teacher);
    }

    /// Number of subjects with at least one teacher.
    pub fn subject_count(&self) -> usize {
        self.by_subject.len()
    }
}

impl TeacherDirectory for InMemoryTeacherDirectory {
    fn eligible_teachers(&self, subject_id: &str) -> Vec<TeacherRef> {
        self.by_subject.get(subject_id).cloned().unwrap_or_default()
    }
}
