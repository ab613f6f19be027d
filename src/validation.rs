//! Input validation for exam-slot requests.
//!
//! Checks structural integrity of a request before any computation.
//! Detects:
//! - Blank slot name, subject or semester ids
//! - Empty or duplicated rosters
//! - Empty or duplicated room lists and zero-capacity rooms
//! - Non-positive durations, inverted or too-short windows
//! - Negative rest gaps
//!
//! All findings are collected; the generator reports the first one.

use std::collections::HashSet;

use crate::models::ExamSlotRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Request field the error refers to.
    pub field: &'static str,
    /// Offending entity (student or room id), when there is one.
    pub entity_id: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A required identifier is blank.
    MissingField,
    /// The roster is empty.
    EmptyRoster,
    /// A student id appears more than once.
    DuplicateStudent,
    /// No room was offered.
    EmptyRooms,
    /// A room id appears more than once.
    DuplicateRoom,
    /// A room seats nobody.
    NonPositiveCapacity,
    /// Slot duration is zero or negative.
    NonPositiveDuration,
    /// Window end is not after window start.
    InvalidWindow,
    /// Window is shorter than one slot.
    WindowTooShort,
    /// Rest gap is negative.
    NegativeRestGap,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field,
            entity_id: None,
            message: message.into(),
        }
    }

    pub(crate) fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
}

/// Validates an exam-slot request.
///
/// Checks:
/// 1. Slot name, subject id and semester id are not blank
/// 2. At least one student, no duplicate student ids
/// 3. At least one room, no duplicate room ids, every capacity > 0
/// 4. Duration > 0
/// 5. Window end after window start, window at least one duration long
/// 6. Rest gap >= 0
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &ExamSlotRequest) -> ValidationResult {
    let mut errors = Vec::new();

    for (field, value) in [
        ("slot_name", &request.slot_name),
        ("subject_id", &request.subject_id),
        ("semester_id", &request.semester_id),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                field,
                format!("`{field}` must not be blank"),
            ));
        }
    }

    // Roster
    if request.students.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "students",
            "no students registered",
        ));
    }
    let mut student_ids = HashSet::new();
    for s in &request.students {
        if !student_ids.insert(s.id.as_str()) {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::DuplicateStudent,
                    "students",
                    format!("Duplicate student ID: {}", s.id),
                )
                .with_entity(&s.id),
            );
        }
    }

    // Rooms
    if request.rooms.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRooms,
            "rooms",
            "no rooms offered",
        ));
    }
    let mut room_ids = HashSet::new();
    for r in &request.rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::DuplicateRoom,
                    "rooms",
                    format!("Duplicate room ID: {}", r.id),
                )
                .with_entity(&r.id),
            );
        }
        if r.capacity == 0 {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::NonPositiveCapacity,
                    "rooms",
                    format!("Room '{}' has zero capacity", r.id),
                )
                .with_entity(&r.id),
            );
        }
    }

    // Timing
    if request.duration_minutes <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            "duration_minutes",
            format!("duration must be positive, got {}", request.duration_minutes),
        ));
    }

    let window = request.window_minutes();
    if window <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWindow,
            "end_time_in_day",
            format!(
                "window {}..{} has no positive length",
                request.start_time_in_day, request.end_time_in_day
            ),
        ));
    } else if request.duration_minutes > window {
        errors.push(ValidationError::new(
            ValidationErrorKind::WindowTooShort,
            "duration_minutes",
            format!(
                "a {} minute slot does not fit a {window} minute window",
                request.duration_minutes
            ),
        ));
    }

    if request.rest_gap_minutes < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeRestGap,
            "rest_gap_minutes",
            format!("rest gap must not be negative, got {}", request.rest_gap_minutes),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
