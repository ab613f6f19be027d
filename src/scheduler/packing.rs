//! Slot packing.
//!
//! # Algorithm
//!
//! **Fewer slots**: all room groups run concurrently in one slot that
//! starts at the window start.
//!
//! **Staggered**:
//! 1. Rooms per slot = configured cap, or `ceil(sqrt(rooms))` so that the
//!    slot count and the concurrency grow together.
//! 2. Slot count = `ceil(rooms / per_slot)`. Without a configured cap the
//!    count shrinks to the number of waves that fit the window.
//! 3. Rooms are spread so slot sizes differ by at most one (earlier slots
//!    take the extra room).
//! 4. Slot `k` starts at `window_start + k * (duration + rest_gap)`.
//!
//! Every slot must end by the window end; the first that does not aborts
//! the run with [`GenerationError::TimeWindowExceeded`]. Only a configured
//! cap can force more waves than the window holds.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{GenerationError, Result};
use crate::models::{ExamSlotRequest, RoomAssignment, TimeWindow};

/// Room groups placed in one time slot, before staffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedSlot {
    /// Position in production order (0-based).
    pub seq: usize,
    /// Slot label.
    pub label: String,
    /// Dated slot interval.
    pub interval: TimeWindow,
    /// Rooms running concurrently in this slot.
    pub rooms: Vec<RoomAssignment>,
}

/// Arranges room groups into timed slots.
pub fn pack_slots(
    rooms: Vec<RoomAssignment>,
    request: &ExamSlotRequest,
    config: &EngineConfig,
) -> Result<Vec<PackedSlot>> {
    if rooms.is_empty() {
        return Ok(Vec::new());
    }

    let sizes = if request.favor_fewer_slots {
        vec![rooms.len()]
    } else {
        let count = match config.max_rooms_per_slot {
            Some(cap) => rooms.len().div_ceil(cap.max(1)),
            None => {
                let wanted = rooms.len().div_ceil(ceil_sqrt(rooms.len()));
                let fit = waves_in_window(request);
                if fit < wanted {
                    debug!(wanted, fit, "slot count narrowed to the window");
                }
                wanted.min(fit).max(1)
            }
        };
        even_sizes(rooms.len(), count)
    };

    let window_end = request.window_end();
    let mut remaining = rooms.into_iter();
    let mut slots = Vec::with_capacity(sizes.len());
    for (seq, size) in sizes.into_iter().enumerate() {
        let label = config.slot_label(&request.slot_name, seq);
        let interval = match slot_interval(request, seq) {
            Some(interval) if interval.end <= window_end => interval,
            other => {
                return Err(GenerationError::TimeWindowExceeded {
                    slot: label,
                    end: other.map_or(NaiveDateTime::MAX, |w| w.end),
                    window_end,
                })
            }
        };
        debug!(
            slot = %label,
            start = %interval.start.time(),
            end = %interval.end.time(),
            rooms = size,
            "slot opened"
        );
        slots.push(PackedSlot {
            seq,
            label,
            interval,
            rooms: remaining.by_ref().take(size).collect(),
        });
    }
    Ok(slots)
}

/// Interval of the `seq`-th slot, `None` on arithmetic overflow.
fn slot_interval(request: &ExamSlotRequest, seq: usize) -> Option<TimeWindow> {
    let offset = if seq == 0 {
        0
    } else {
        let step = request
            .duration_minutes
            .checked_add(request.rest_gap_minutes)?;
        i64::try_from(seq).ok()?.checked_mul(step)?
    };
    let start = request
        .window_start()
        .checked_add_signed(TimeDelta::try_minutes(offset)?)?;
    let end = start.checked_add_signed(TimeDelta::try_minutes(request.duration_minutes)?)?;
    Some(TimeWindow::new(start, end))
}

/// Number of staggered slots that end by the window end.
fn waves_in_window(request: &ExamSlotRequest) -> usize {
    let slack = match request.window_minutes().checked_sub(request.duration_minutes) {
        Some(slack) if slack >= 0 => slack,
        _ => return 0,
    };
    match request.duration_minutes.checked_add(request.rest_gap_minutes) {
        Some(step) if step > 0 => {
            usize::try_from(slack / step).map_or(usize::MAX, |n| n.saturating_add(1))
        }
        _ => 1,
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let mut root = 0;
    while root * root < n {
        root += 1;
    }
    root
}

/// Splits `total` into `buckets` sizes differing by at most one.
fn even_sizes(total: usize, buckets: usize) -> Vec<usize> {
    if buckets == 0 {
        return Vec::new();
    }
    let base = total / buckets;
    let extra = total % buckets;
    (0..buckets).map(|i| base + usize::from(i < extra)).collect()
}
