//! Proctor and grader assignment.
//!
//! # Algorithm
//!
//! Greedy first-fit, no backtracking:
//! 1. Collapse repeated teacher ids in the pool to their first occurrence.
//! 2. Walk slots in order, rooms in order; for each room pick the first
//!    free teacher as proctor, then the first free teacher as grader.
//! 3. A teacher is free for a room when none of their bookings in a
//!    *different* room conflicts with the room's interval (overlap, or
//!    idle time shorter than the rest gap). Holding both positions of the
//!    same room is allowed.
//!
//! Pool exhaustion aborts with [`GenerationError::InsufficientStaff`].
//!
//! # Complexity
//! O(p * t * b) where p=positions, t=teachers, b=bookings per teacher.

use std::collections::{HashMap, HashSet};

use chrono::TimeDelta;
use tracing::debug;

use super::packing::PackedSlot;
use crate::error::{GenerationError, Result};
use crate::models::{StaffAssignment, StaffRole, TeacherRef, TimeWindow};

/// Staff positions of one slot, parallel to its rooms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotStaff {
    /// One proctor per room.
    pub proctors: Vec<StaffAssignment>,
    /// One grader per room.
    pub graders: Vec<StaffAssignment>,
}

#[derive(Debug, Clone, Copy)]
struct Booking {
    slot: usize,
    room: usize,
    interval: TimeWindow,
}

/// Who is busy when.
#[derive(Debug)]
struct StaffLedger {
    bookings: HashMap<String, Vec<Booking>>,
    rest_gap: TimeDelta,
}

impl StaffLedger {
    fn new(rest_gap: TimeDelta) -> Self {
        Self {
            bookings: HashMap::new(),
            rest_gap,
        }
    }

    fn is_free(&self, teacher_id: &str, slot: usize, room: usize, interval: &TimeWindow) -> bool {
        self.bookings.get(teacher_id).map_or(true, |held| {
            held.iter().all(|b| {
                (b.slot == slot && b.room == room)
                    || !b.interval.conflicts_with(interval, self.rest_gap)
            })
        })
    }

    fn book(&mut self, teacher_id: &str, slot: usize, room: usize, interval: TimeWindow) {
        self.bookings
            .entry(teacher_id.to_string())
            .or_default()
            .push(Booking {
                slot,
                room,
                interval,
            });
    }
}

/// Assigns one proctor and one grader to every room of every slot.
pub fn assign_staff(
    slots: &[PackedSlot],
    teachers: &[TeacherRef],
    rest_gap: TimeDelta,
) -> Result<Vec<SlotStaff>> {
    let pool = distinct_pool(teachers);
    let mut ledger = StaffLedger::new(rest_gap);
    let mut staffed = Vec::with_capacity(slots.len());

    for (slot_idx, slot) in slots.iter().enumerate() {
        let mut staff = SlotStaff::default();
        for (room_idx, room) in slot.rooms.iter().enumerate() {
            for role in [StaffRole::Proctor, StaffRole::Grader] {
                let teacher = pool
                    .iter()
                    .find(|t| ledger.is_free(&t.id, slot_idx, room_idx, &slot.interval))
                    .ok_or_else(|| GenerationError::InsufficientStaff {
                        room_id: room.room_id.clone(),
                        slot: slot.label.clone(),
                        role,
                    })?;
                ledger.book(&teacher.id, slot_idx, room_idx, slot.interval);
                debug!(
                    slot = %slot.label,
                    room = %room.room_id,
                    %role,
                    teacher = %teacher.id,
                    "staff booked"
                );

                let position = StaffAssignment::assigned(room.room_id.as_str(), role, teacher);
                match role {
                    StaffRole::Proctor => staff.proctors.push(position),
                    StaffRole::Grader => staff.graders.push(position),
                }
            }
        }
        staffed.push(staff);
    }
    Ok(staffed)
}

fn distinct_pool(teachers: &[TeacherRef]) -> Vec<&TeacherRef> {
    let mut seen = HashSet::new();
    let pool: Vec<&TeacherRef> = teachers
        .iter()
        .filter(|t| seen.insert(t.id.as_str()))
        .collect();
    if pool.len() < teachers.len() {
        debug!(
            dropped = teachers.len() - pool.len(),
            "repeated teacher ids collapsed"
        );
    }
    pool
}
