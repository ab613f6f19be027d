//! Exam timetabling domain models.
//!
//! Provides the data types for describing an exam-slot request and the
//! timetable produced for it.
//!
//! # Domain Mappings
//!
//! | exam-slots | Scheduling term | Notes |
//! |------------|-----------------|-------|
//! | StudentRef | Job | Indivisible, seated exactly once |
//! | RoomRef | Machine | Capacity = seats per slot |
//! | TeacherRef | Operator | Proctors and grades |
//! | GeneratedSlot | Time bucket | Rooms run concurrently |
//! | Timetable | Schedule | Ordered slots + audit findings |

mod calendar;
mod request;
mod room;
mod slot;
mod staff;
mod timetable;

pub use calendar::TimeWindow;
pub use request::{ExamCategory, ExamSlotRequest, StudentRef};
pub use room::{RoomAssignment, RoomRef};
pub use slot::{GeneratedSlot, SlotStatus};
pub use staff::{Assignee, StaffAssignment, StaffRole, TeacherRef};
pub use timetable::{Timetable, Violation, ViolationType};
