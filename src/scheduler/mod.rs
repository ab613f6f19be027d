//! Exam-slot generation engine and timetable KPIs.
//!
//! Provides the generation pipeline and its stages, plus timetable
//! quality metrics.
//!
//! # Pipeline
//!
//! `validate → partition → pack → staff → assemble`. Each stage owns its
//! output and hands it to the next; the first error ends the run.
//!
//! | Stage | Objective flag | Strategy |
//! |-------|----------------|----------|
//! | [`partition_students`] | `favor_fewer_rooms` | FFD or proportional round-robin |
//! | [`pack_slots`] | `favor_fewer_slots` | one slot or staggered waves |
//! | [`assign_staff`] | none | greedy first-fit |
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Carter & Laporte (1996), "Recent Developments in Practical Examination Timetabling"

mod assemble;
mod generator;
mod kpi;
mod packing;
mod partition;
mod staffing;

pub use assemble::assemble_slots;
pub use generator::{generate_exam_slots, ExamSlotGenerator};
pub use kpi::TimetableKpi;
pub use packing::{pack_slots, PackedSlot};
pub use partition::partition_students;
pub use staffing::{assign_staff, SlotStaff};
