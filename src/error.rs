//! Generation errors.
//!
//! Every error is terminal: the pipeline stops at the first one and returns
//! no partial timetable. Each variant carries the offending entity so the
//! caller can display or log it, and maps to a stable [`ErrorKind`] code.

use chrono::NaiveDateTime;

use crate::models::StaffRole;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Result type for slot generation.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Why a timetable could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Malformed or missing request field.
    #[error("invalid request field `{field}`: {message}")]
    Validation {
        /// Request field that failed.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// The rooms cannot seat the roster.
    #[error("insufficient capacity: {students} students, {capacity} seats")]
    InsufficientCapacity {
        /// Roster size.
        students: usize,
        /// Total seats offered.
        capacity: u64,
    },

    /// A slot would end after the daily window.
    #[error("slot '{slot}' would end at {end}, after the window end {window_end}")]
    TimeWindowExceeded {
        /// Label of the slot that does not fit.
        slot: String,
        /// Where the slot would end.
        end: NaiveDateTime,
        /// Where the window ends.
        window_end: NaiveDateTime,
    },

    /// The eligible pool ran out of teachers.
    #[error("insufficient staff: no {role} available for room '{room_id}' in slot '{slot}'")]
    InsufficientStaff {
        /// Room left without staff.
        room_id: String,
        /// Slot the room belongs to.
        slot: String,
        /// Position that could not be filled.
        role: StaffRole,
    },

    /// The same student is on the roster twice.
    #[error("duplicate student '{student_id}' in roster")]
    DuplicateStudent {
        /// Repeated student id.
        student_id: String,
    },
}

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `VALIDATION_ERROR`
    Validation,
    /// `INSUFFICIENT_CAPACITY`
    InsufficientCapacity,
    /// `TIME_WINDOW_EXCEEDED`
    TimeWindowExceeded,
    /// `INSUFFICIENT_STAFF`
    InsufficientStaff,
    /// `DUPLICATE_STUDENT`
    DuplicateStudent,
}

impl ErrorKind {
    /// Wire code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::InsufficientCapacity => "INSUFFICIENT_CAPACITY",
            Self::TimeWindowExceeded => "TIME_WINDOW_EXCEEDED",
            Self::InsufficientStaff => "INSUFFICIENT_STAFF",
            Self::DuplicateStudent => "DUPLICATE_STUDENT",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GenerationError {
    /// Error code of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::InsufficientCapacity { .. } => ErrorKind::InsufficientCapacity,
            Self::TimeWindowExceeded { .. } => ErrorKind::TimeWindowExceeded,
            Self::InsufficientStaff { .. } => ErrorKind::InsufficientStaff,
            Self::DuplicateStudent { .. } => ErrorKind::DuplicateStudent,
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for GenerationError {
    fn from(err: ValidationError) -> Self {
        match err.kind {
            ValidationErrorKind::DuplicateStudent => Self::DuplicateStudent {
                student_id: err.entity_id.unwrap_or_default(),
            },
            _ => Self::Validation {
                field: err.field,
                message: err.message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        let e = GenerationError::InsufficientCapacity {
            students: 25,
            capacity: 20,
        };
        assert_eq!(e.kind(), ErrorKind::InsufficientCapacity);
        assert_eq!(e.kind().as_str(), "INSUFFICIENT_CAPACITY");
        assert_eq!(e.to_string(), "insufficient capacity: 25 students, 20 seats");
    }

    #[test]
    fn test_staff_error_names_room() {
        let e = GenerationError::InsufficientStaff {
            room_id: "C".into(),
            slot: "Final - 1".into(),
            role: StaffRole::Proctor,
        };
        assert_eq!(e.kind().to_string(), "INSUFFICIENT_STAFF");
        assert!(e.to_string().contains("room 'C'"));
        assert!(e.to_string().contains("proctor"));
    }

    #[test]
    fn test_from_validation_error() {
        let dup = ValidationError::new(
            ValidationErrorKind::DuplicateStudent,
            "students",
            "student 's1' appears twice",
        )
        .with_entity("s1");
        assert_eq!(
            GenerationError::from(dup),
            GenerationError::DuplicateStudent {
                student_id: "s1".into()
            }
        );

        let other = ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            "duration_minutes",
            "must be positive",
        );
        let e = GenerationError::from(other);
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert!(e.to_string().contains("duration_minutes"));
    }
}
