//! Staff model.
//!
//! Every room in every slot needs a proctor (supervises the sitting) and a
//! grader (marks the submissions). Teachers come from the subject's
//! eligibility directory.
//!
//! An unfilled position is the explicit [`Assignee::Pending`] state, so
//! callers that persist or display staff lists must handle it.

use serde::{Deserialize, Serialize};

/// A teacher eligible to staff exams of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherRef {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl TeacherRef {
    /// Creates a new teacher reference.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Staff duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    /// Supervises the room during the slot.
    Proctor,
    /// Grades the room's submissions.
    Grader,
}

impl StaffRole {
    /// Lowercase role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proctor => "proctor",
            Self::Grader => "grader",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who holds a staff position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assignee {
    /// Filled by a teacher.
    Assigned {
        /// Teacher identifier.
        teacher_id: String,
        /// Teacher display name.
        name: String,
    },
    /// Not yet filled.
    Pending,
}

/// One staff position for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAssignment {
    /// Room identifier.
    pub room_id: String,
    /// Duty.
    pub role: StaffRole,
    /// Position holder.
    pub assignee: Assignee,
}

impl StaffAssignment {
    /// Creates a filled position.
    pub fn assigned(room_id: impl Into<String>, role: StaffRole, teacher: &TeacherRef) -> Self {
        Self {
            room_id: room_id.into(),
            role,
            assignee: Assignee::Assigned {
                teacher_id: teacher.id.clone(),
                name: teacher.name.clone(),
            },
        }
    }

    /// Creates an unfilled position.
    pub fn pending(room_id: impl Into<String>, role: StaffRole) -> Self {
        Self {
            room_id: room_id.into(),
            role,
            assignee: Assignee::Pending,
        }
    }

    /// Whether a teacher holds this position.
    pub fn is_assigned(&self) -> bool {
        matches!(self.assignee, Assignee::Assigned { .. })
    }

    /// Holder's teacher id, if filled.
    pub fn teacher_id(&self) -> Option<&str> {
        match &self.assignee {
            Assignee::Assigned { teacher_id, .. } => Some(teacher_id),
            Assignee::Pending => None,
        }
    }

    /// Holder's display name, if filled.
    pub fn display_name(&self) -> Option<&str> {
        match &self.assignee {
            Assignee::Assigned { name, .. } => Some(name),
            Assignee::Pending => None,
        }
    }
}
