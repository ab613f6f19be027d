//! Result assembly.
//!
//! Zips packed slots with their staff into [`GeneratedSlot`]s. Ordering is
//! inherited: slot sequence, then room order from the partitioner, then
//! staff positions in assignment order. Nothing is re-checked here.

use super::packing::PackedSlot;
use super::staffing::SlotStaff;
use crate::config::EngineConfig;
use crate::models::{ExamSlotRequest, GeneratedSlot};

/// Builds the final slot list.
pub fn assemble_slots(
    request: &ExamSlotRequest,
    config: &EngineConfig,
    slots: Vec<PackedSlot>,
    staff: Vec<SlotStaff>,
) -> Vec<GeneratedSlot> {
    slots
        .into_iter()
        .zip(staff)
        .map(|(slot, staff)| GeneratedSlot {
            subject_id: request.subject_id.clone(),
            semester_id: request.semester_id.clone(),
            status: config.default_status,
            category: request.category,
            label: slot.label,
            date: slot.interval.start.date(),
            start_time: slot.interval.start.time(),
            end_time: slot.interval.end.time(),
            rooms: slot.rooms,
            proctors: staff.proctors,
            graders: staff.graders,
        })
        .collect()
}
