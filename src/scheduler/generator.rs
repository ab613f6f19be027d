//! Exam-slot generation pipeline.
//!
//! # Algorithm
//!
//! 1. Validate the request.
//! 2. Resolve requested rooms against the room directory snapshot.
//! 3. Partition the roster into room groups.
//! 4. Pack room groups into timed slots.
//! 5. Assign a proctor and a grader to every room.
//! 6. Assemble the ordered slot list.
//!
//! The first failing stage aborts the run; no partial timetable escapes.
//! Identical inputs always produce identical output.

use std::collections::HashMap;

use chrono::TimeDelta;
use tracing::{debug, info, warn};

use super::{assemble_slots, assign_staff, pack_slots, partition_students};
use crate::config::EngineConfig;
use crate::directory::{RoomDirectory, TeacherDirectory};
use crate::error::{GenerationError, Result};
use crate::models::{ExamSlotRequest, GeneratedSlot, RoomRef, TeacherRef};
use crate::validation::{validate_request, ValidationError};

/// Exam-slot generator.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent calls.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use exam_slots::models::{ExamSlotRequest, RoomRef, StudentRef, TeacherRef};
/// use exam_slots::scheduler::ExamSlotGenerator;
///
/// let rooms = vec![RoomRef::new("A", 20), RoomRef::new("B", 15)];
/// let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// let students = (1..=25)
///     .map(|i| StudentRef::new(format!("s{i}"), format!("Student {i}")))
///     .collect();
/// let request = ExamSlotRequest::new("Final", "MATH101", "2026S", date)
///     .with_students(students)
///     .with_rooms(rooms.clone())
///     .with_window(
///         NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     )
///     .favor_fewer_rooms(true)
///     .favor_fewer_slots(true);
/// let teachers = vec![TeacherRef::new("t1", "Kim"), TeacherRef::new("t2", "Lee")];
///
/// let slots = ExamSlotGenerator::new().generate(&request, &rooms, &teachers).unwrap();
/// assert_eq!(slots.len(), 1);
/// assert_eq!(slots[0].rooms[0].student_count(), 20);
/// assert_eq!(slots[0].rooms[1].student_count(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExamSlotGenerator {
    config: EngineConfig,
}

impl ExamSlotGenerator {
    /// Creates a generator with the default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates the timetable for a request.
    ///
    /// `available_rooms` is the room directory snapshot and
    /// `eligible_teachers` the subject's eligible staff, in preference order.
    #[tracing::instrument(
        name = "generate_exam_slots",
        skip_all,
        fields(
            subject = %request.subject_id,
            semester = %request.semester_id,
            students = request.students.len(),
        )
    )]
    pub fn generate(
        &self,
        request: &ExamSlotRequest,
        available_rooms: &[RoomRef],
        eligible_teachers: &[TeacherRef],
    ) -> Result<Vec<GeneratedSlot>> {
        let outcome = self.run(request, available_rooms, eligible_teachers);
        match &outcome {
            Ok(slots) => info!(
                slots = slots.len(),
                rooms = slots.iter().map(GeneratedSlot::room_count).sum::<usize>(),
                "exam slots generated"
            ),
            Err(err) => warn!(code = %err.kind(), error = %err, "exam slot generation aborted"),
        }
        outcome
    }

    /// Generates the timetable, taking snapshots of the given directories.
    pub fn generate_from(
        &self,
        request: &ExamSlotRequest,
        rooms: &dyn RoomDirectory,
        teachers: &dyn TeacherDirectory,
    ) -> Result<Vec<GeneratedSlot>> {
        let room_snapshot = rooms.rooms();
        let teacher_snapshot = teachers.eligible_teachers(&request.subject_id);
        self.generate(request, &room_snapshot, &teacher_snapshot)
    }

    fn run(
        &self,
        request: &ExamSlotRequest,
        available_rooms: &[RoomRef],
        eligible_teachers: &[TeacherRef],
    ) -> Result<Vec<GeneratedSlot>> {
        validate_request(request).map_err(first_error)?;

        let rooms = resolve_rooms(&request.rooms, available_rooms)?;
        let groups = partition_students(&request.students, &rooms, request.favor_fewer_rooms)?;
        let packed = pack_slots(groups, request, &self.config)?;

        let rest_gap = TimeDelta::try_minutes(request.rest_gap_minutes).unwrap_or(TimeDelta::MAX);
        let staff = assign_staff(&packed, eligible_teachers, rest_gap)?;

        Ok(assemble_slots(request, &self.config, packed, staff))
    }
}

/// Generates a timetable with the default configuration.
pub fn generate_exam_slots(
    request: &ExamSlotRequest,
    available_rooms: &[RoomRef],
    eligible_teachers: &[TeacherRef],
) -> Result<Vec<GeneratedSlot>> {
    ExamSlotGenerator::new().generate(request, available_rooms, eligible_teachers)
}

fn first_error(errors: Vec<ValidationError>) -> GenerationError {
    errors
        .into_iter()
        .next()
        .map_or_else(|| GenerationError::validation("request", "rejected"), Into::into)
}

/// Looks up every requested room in the directory snapshot.
///
/// The effective capacity is the smaller of what the caller offers and
/// what the directory says the room seats.
fn resolve_rooms(requested: &[RoomRef], directory: &[RoomRef]) -> Result<Vec<RoomRef>> {
    let mut known: HashMap<&str, &RoomRef> = HashMap::with_capacity(directory.len());
    for room in directory {
        known.entry(room.id.as_str()).or_insert(room);
    }

    requested
        .iter()
        .map(|room| -> Result<RoomRef> {
            let listed = known.get(room.id.as_str()).ok_or_else(|| {
                GenerationError::validation(
                    "rooms",
                    format!("room '{}' is not in the room directory", room.id),
                )
            })?;
            let capacity = room.capacity.min(listed.capacity);
            if capacity < room.capacity {
                debug!(
                    room = %room.id,
                    requested = room.capacity,
                    capacity,
                    "room capacity capped by directory"
                );
            }
            Ok(RoomRef::new(room.id.as_str(), capacity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{InMemoryRoomDirectory, InMemoryTeacherDirectory};
    use crate::error::ErrorKind;
    use crate::models::StudentRef;
    use chrono::{NaiveDate, NaiveTime};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn roster(n: usize) -> Vec<StudentRef> {
        (1..=n)
            .map(|i| StudentRef::new(format!("s{i:02}"), format!("Student {i}")))
            .collect()
    }

    fn teachers(n: usize) -> Vec<TeacherRef> {
        (1..=n)
            .map(|i| TeacherRef::new(format!("t{i}"), format!("Teacher {i}")))
            .collect()
    }

    fn request(students: usize, rooms: &[RoomRef]) -> ExamSlotRequest {
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        ExamSlotRequest::new("Final", "MATH101", "2026S", date)
            .with_students(roster(students))
            .with_rooms(rooms.to_vec())
            .with_duration(60)
            .with_window(hm(8, 0), hm(12, 0))
            .with_rest_gap(15)
    }

    #[test]
    fn test_fewer_rooms_single_slot() {
        let rooms = vec![RoomRef::new("A", 20), RoomRef::new("B", 15)];
        let req = request(25, &rooms).favor_fewer_rooms(true).favor_fewer_slots(true);

        let slots = generate_exam_slots(&req, &rooms, &teachers(2)).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].rooms[0].student_count(), 20);
        assert_eq!(slots[0].rooms[1].student_count(), 5);
        assert!(slots[0].is_fully_staffed());
    }

    #[test]
    fn test_validation_runs_first() {
        let rooms = vec![RoomRef::new("A", 1)];
        let mut req = request(3, &rooms);
        req.students.push(StudentRef::new("s01", "Again"));

        // Capacity is also short, but the duplicate is reported
        let err = generate_exam_slots(&req, &rooms, &teachers(1)).unwrap_err();
        assert_eq!(
            err,
            GenerationError::DuplicateStudent {
                student_id: "s01".into()
            }
        );
    }

    #[test]
    fn test_unknown_room_rejected() {
        let rooms = vec![RoomRef::new("A", 20)];
        let req = request(5, &[RoomRef::new("Z", 20)]);
        let err = generate_exam_slots(&req, &rooms, &teachers(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("'Z'"));
    }

    #[test]
    fn test_directory_caps_capacity() {
        let directory = vec![RoomRef::new("A", 10)];
        let req = request(15, &[RoomRef::new("A", 30)]);
        let err = generate_exam_slots(&req, &directory, &teachers(1)).unwrap_err();
        assert_eq!(
            err,
            GenerationError::InsufficientCapacity {
                students: 15,
                capacity: 10
            }
        );
    }

    #[test]
    fn test_requested_capacity_caps_directory() {
        let directory = vec![RoomRef::new("A", 40)];
        let req = request(10, &[RoomRef::new("A", 10)]);
        let slots = generate_exam_slots(&req, &directory, &teachers(1)).unwrap();
        assert_eq!(slots[0].rooms[0].capacity, 10);
    }

    #[test]
    fn test_generate_from_directories() {
        let rooms = InMemoryRoomDirectory::from(vec![RoomRef::new("A", 20), RoomRef::new("B", 20)]);
        let staff = InMemoryTeacherDirectory::new()
            .with_teacher("MATH101", TeacherRef::new("t1", "Kim"))
            .with_teacher("MATH101", TeacherRef::new("t2", "Lee"))
            .with_teacher("CS", TeacherRef::new("t9", "Other"));
        let req = request(30, &[RoomRef::new("A", 20), RoomRef::new("B", 20)])
            .favor_fewer_slots(true);

        let slots = ExamSlotGenerator::new()
            .generate_from(&req, &rooms, &staff)
            .unwrap();
        let used: Vec<&str> = slots[0].staff().filter_map(|s| s.teacher_id()).collect();
        assert!(used.iter().all(|id| *id == "t1" || *id == "t2"));
    }

    #[test]
    fn test_config_flows_into_labels() {
        let rooms = vec![RoomRef::new("A", 10), RoomRef::new("B", 10)];
        let req = request(20, &rooms);
        let generator = ExamSlotGenerator::new().with_config(
            EngineConfig::new()
                .with_label_separator(" #")
                .with_max_rooms_per_slot(1),
        );
        let slots = generator.generate(&req, &rooms, &teachers(1)).unwrap();
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Final #1", "Final #2"]);
        assert_eq!(generator.config().label_separator, " #");
    }
}
