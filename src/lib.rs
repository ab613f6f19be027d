//! Exam-slot generation engine.
//!
//! Turns a request to schedule one exam (a student roster, candidate rooms,
//! a daily time window and an exam length) into a concrete timetable:
//! students partitioned across rooms, rooms grouped into timed slots, and
//! every room staffed with a proctor and a grader.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ExamSlotRequest`, `RoomAssignment`,
//!   `GeneratedSlot`, `StaffAssignment`, `Timetable`, `TimeWindow`
//! - **`validation`**: Request integrity checks (roster, rooms, window)
//! - **`scheduler`**: The generation pipeline and timetable KPIs
//! - **`audit`**: Independent re-check of a generated timetable
//! - **`directory`**: Room and teacher directory seams
//! - **`config`**: Engine-level settings (labels, status, slot width)
//! - **`error`**: `GenerationError` and its stable error codes
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use exam_slots::generate_exam_slots;
//! use exam_slots::models::{ExamSlotRequest, RoomRef, StudentRef, TeacherRef};
//!
//! let rooms = vec![RoomRef::new("A", 10), RoomRef::new("B", 10)];
//! let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
//! let request = ExamSlotRequest::new("Midterm", "PHY", "2026F", date)
//!     .with_students((1..=20).map(|i| StudentRef::new(format!("s{i}"), "x")).collect())
//!     .with_rooms(rooms.clone())
//!     .with_window(
//!         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!         NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
//!     )
//!     .favor_fewer_slots(true);
//! let teachers = vec![TeacherRef::new("t1", "Kim"), TeacherRef::new("t2", "Lee")];
//!
//! let slots = generate_exam_slots(&request, &rooms, &teachers).unwrap();
//! assert_eq!(slots.len(), 1);
//! assert_eq!(slots[0].label, "Midterm - 1");
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Carter & Laporte (1996), "Recent Developments in Practical Examination Timetabling"

pub mod audit;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{ErrorKind, GenerationError, Result};
pub use scheduler::{generate_exam_slots, ExamSlotGenerator};
