//! Roster partitioning.
//!
//! # Algorithm
//!
//! **Fewer rooms** (first-fit decreasing):
//! 1. Stable-sort rooms by descending capacity (ties keep input order).
//! 2. Fill each room to capacity with the next students in roster order.
//! 3. Stop as soon as everyone is seated.
//!
//! **Balanced**:
//! 1. Give each room a quota proportional to its capacity, rounded with
//!    the largest-remainder method (ties to the earlier room).
//! 2. Deal students round-robin over the rooms in input order, skipping
//!    rooms whose quota is met.
//! 3. Drop rooms that received nobody.
//!
//! Both modes keep roster order inside every room.
//!
//! # Complexity
//! O(s + r log r) where s=students, r=rooms.
//!
//! # Reference
//! Johnson (1973), "Near-optimal bin packing algorithms" (FFD);
//! Balinski & Young (1982), "Fair Representation" (largest remainder)

use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::models::{RoomAssignment, RoomRef, StudentRef};

/// Splits the roster into one group per room used.
///
/// Fails with [`GenerationError::InsufficientCapacity`] when the rooms
/// together seat fewer students than the roster holds.
pub fn partition_students(
    students: &[StudentRef],
    rooms: &[RoomRef],
    favor_fewer_rooms: bool,
) -> Result<Vec<RoomAssignment>> {
    let capacity: u64 = rooms.iter().map(|r| u64::from(r.capacity)).sum();
    if capacity < students.len() as u64 {
        return Err(GenerationError::InsufficientCapacity {
            students: students.len(),
            capacity,
        });
    }

    let groups = if favor_fewer_rooms {
        fill_largest_first(students, rooms)
    } else {
        deal_proportionally(students, rooms)
    };

    debug!(
        rooms_used = groups.len(),
        rooms_offered = rooms.len(),
        favor_fewer_rooms,
        "roster partitioned"
    );
    Ok(groups)
}

fn fill_largest_first(students: &[StudentRef], rooms: &[RoomRef]) -> Vec<RoomAssignment> {
    let mut order: Vec<&RoomRef> = rooms.iter().collect();
    order.sort_by(|a, b| b.capacity.cmp(&a.capacity));

    let mut remaining = students;
    let mut groups = Vec::new();
    for room in order {
        if remaining.is_empty() {
            break;
        }
        let take = remaining.len().min(room.capacity as usize);
        if take == 0 {
            continue;
        }
        let (head, tail) = remaining.split_at(take);
        let mut group = RoomAssignment::new(room.id.as_str(), room.capacity);
        group.students = head.to_vec();
        groups.push(group);
        remaining = tail;
    }
    groups
}

fn deal_proportionally(students: &[StudentRef], rooms: &[RoomRef]) -> Vec<RoomAssignment> {
    let quotas = proportional_quotas(students.len(), rooms);
    let mut groups: Vec<RoomAssignment> = rooms
        .iter()
        .map(|r| RoomAssignment::new(r.id.as_str(), r.capacity))
        .collect();

    let k = groups.len();
    let mut cursor = 0;
    for student in students {
        let Some(idx) = (0..k)
            .map(|offset| (cursor + offset) % k)
            .find(|&i| groups[i].students.len() < quotas[i])
        else {
            // Quotas sum to the roster size, so this is unreachable.
            break;
        };
        groups[idx].students.push(student.clone());
        cursor = (idx + 1) % k;
    }

    groups.retain(|g| !g.is_empty());
    groups
}

/// Seats per room, proportional to capacity and summing to `students`.
///
/// Requires `students <= sum(capacity)`; then no quota exceeds its room.
pub(crate) fn proportional_quotas(students: usize, rooms: &[RoomRef]) -> Vec<usize> {
    let total: u128 = rooms.iter().map(|r| u128::from(r.capacity)).sum();
    if total == 0 {
        return vec![0; rooms.len()];
    }

    let n = students as u128;
    let mut quotas = Vec::with_capacity(rooms.len());
    let mut remainders = Vec::with_capacity(rooms.len());
    for (i, room) in rooms.iter().enumerate() {
        let share = n * u128::from(room.capacity);
        quotas.push((share / total) as usize);
        remainders.push((share % total, i));
    }

    let assigned: usize = quotas.iter().sum();
    let leftover = students.saturating_sub(assigned);

    // Largest remainder first, earlier room on ties
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take(leftover) {
        quotas[i] += 1;
    }
    quotas
}
