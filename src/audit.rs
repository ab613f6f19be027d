//! Timetable audit.
//!
//! Re-checks a generated timetable against its request, independently of
//! the generator. Detects:
//! - Students missing, seated twice, or not on the roster
//! - Rooms over capacity or reused without the rest gap
//! - Slots outside the daily window or of the wrong length
//! - Teachers double-booked or without their rest gap
//! - Rooms lacking a proctor or grader

use std::collections::{BTreeMap, HashSet};

use chrono::TimeDelta;

use crate::models::{
    ExamSlotRequest, GeneratedSlot, StaffAssignment, TimeWindow, Timetable, Violation,
    ViolationType,
};

/// Audits slots against the request that produced them.
///
/// # Returns
/// Every violation found; empty when all invariants hold.
pub fn audit_timetable(request: &ExamSlotRequest, slots: &[GeneratedSlot]) -> Vec<Violation> {
    let rest_gap =
        TimeDelta::try_minutes(request.rest_gap_minutes.max(0)).unwrap_or(TimeDelta::MAX);
    let mut violations = Vec::new();
    check_coverage(request, slots, &mut violations);
    check_rooms(slots, rest_gap, &mut violations);
    check_timing(request, slots, &mut violations);
    check_staff(slots, rest_gap, &mut violations);
    violations
}

/// Audits a timetable in place, recording violations on it.
pub fn audit_into(request: &ExamSlotRequest, timetable: &mut Timetable) {
    for violation in audit_timetable(request, &timetable.slots) {
        timetable.add_violation(violation);
    }
}

fn check_coverage(request: &ExamSlotRequest, slots: &[GeneratedSlot], out: &mut Vec<Violation>) {
    let roster: HashSet<&str> = request.students.iter().map(|s| s.id.as_str()).collect();

    let mut seated: BTreeMap<&str, usize> = BTreeMap::new();
    for student in slots
        .iter()
        .flat_map(|s| s.rooms.iter())
        .flat_map(|r| r.students.iter())
    {
        *seated.entry(student.id.as_str()).or_insert(0) += 1;
    }

    for (&id, &count) in &seated {
        if !roster.contains(id) {
            out.push(Violation::new(
                ViolationType::UnknownStudent,
                id,
                format!("Student '{id}' is seated but not registered"),
            ));
        }
        if count > 1 {
            out.push(Violation::new(
                ViolationType::DuplicateStudent,
                id,
                format!("Student '{id}' is seated {count} times"),
            ));
        }
    }

    for student in &request.students {
        if !seated.contains_key(student.id.as_str()) {
            out.push(Violation::new(
                ViolationType::MissingStudent,
                &student.id,
                format!("Student '{}' has no seat", student.id),
            ));
        }
    }
}

fn check_rooms(slots: &[GeneratedSlot], rest_gap: TimeDelta, out: &mut Vec<Violation>) {
    let mut uses: Vec<(&str, &str, TimeWindow)> = Vec::new();
    for slot in slots {
        let mut in_slot = HashSet::new();
        for room in &slot.rooms {
            if room.student_count() > room.capacity as usize {
                out.push(Violation::new(
                    ViolationType::CapacityExceeded,
                    &room.room_id,
                    format!(
                        "Room '{}' in '{}' seats {} of {}",
                        room.room_id,
                        slot.label,
                        room.student_count(),
                        room.capacity
                    ),
                ));
            }
            if in_slot.insert(room.room_id.as_str()) {
                uses.push((room.room_id.as_str(), slot.label.as_str(), slot.interval()));
            } else {
                out.push(Violation::new(
                    ViolationType::RoomReused,
                    &room.room_id,
                    format!("Room '{}' appears twice in '{}'", room.room_id, slot.label),
                ));
            }
        }
    }

    for (i, (room_a, label_a, window_a)) in uses.iter().enumerate() {
        for (room_b, label_b, window_b) in &uses[i + 1..] {
            if room_a == room_b && window_a.conflicts_with(window_b, rest_gap) {
                out.push(Violation::new(
                    ViolationType::RoomReused,
                    *room_a,
                    format!("Room '{room_a}' is used by '{label_a}' and '{label_b}' without rest"),
                ));
            }
        }
    }
}

fn check_timing(request: &ExamSlotRequest, slots: &[GeneratedSlot], out: &mut Vec<Violation>) {
    let day = TimeWindow::new(
        slot_day(request, request.start_time_in_day),
        slot_day(request, request.end_time_in_day),
    );
    for slot in slots {
        let window = slot.interval();
        let on_day = TimeWindow::new(
            slot_day(request, slot.start_time),
            slot_day(request, slot.end_time),
        );
        if slot.date != request.start_date || !day.encloses(&on_day) || window.end < window.start {
            out.push(Violation::new(
                ViolationType::OutsideWindow,
                &slot.label,
                format!(
                    "Slot '{}' runs {} {}..{}, outside {}..{}",
                    slot.label,
                    slot.date,
                    slot.start_time,
                    slot.end_time,
                    request.start_time_in_day,
                    request.end_time_in_day
                ),
            ));
        }
        if window.duration_minutes() != request.duration_minutes {
            out.push(Violation::new(
                ViolationType::WrongDuration,
                &slot.label,
                format!(
                    "Slot '{}' lasts {} minutes, expected {}",
                    slot.label,
                    window.duration_minutes(),
                    request.duration_minutes
                ),
            ));
        }
    }
}

fn slot_day(request: &ExamSlotRequest, time: chrono::NaiveTime) -> chrono::NaiveDateTime {
    request.start_date.and_time(time)
}

fn check_staff(slots: &[GeneratedSlot], rest_gap: TimeDelta, out: &mut Vec<Violation>) {
    // teacher → (slot index, room id, interval)
    let mut duties: BTreeMap<&str, Vec<(usize, &str, TimeWindow)>> = BTreeMap::new();

    for (idx, slot) in slots.iter().enumerate() {
        for room in &slot.rooms {
            for (kind, positions) in [("proctor", &slot.proctors), ("grader", &slot.graders)] {
                let held: Vec<&StaffAssignment> = positions
                    .iter()
                    .filter(|p| p.room_id == room.room_id)
                    .collect();
                if held.len() != 1 || !held[0].is_assigned() {
                    out.push(Violation::new(
                        ViolationType::PendingStaff,
                        &room.room_id,
                        format!(
                            "Room '{}' in '{}' has {} assigned {kind}(s)",
                            room.room_id,
                            slot.label,
                            held.iter().filter(|p| p.is_assigned()).count()
                        ),
                    ));
                }
            }
        }
        for position in slot.staff() {
            if let Some(teacher) = position.teacher_id() {
                let entry = duties.entry(teacher).or_default();
                let key = (idx, position.room_id.as_str());
                if !entry.iter().any(|(s, r, _)| (*s, *r) == key) {
                    entry.push((idx, position.room_id.as_str(), slot.interval()));
                }
            }
        }
    }

    for (teacher, held) in &duties {
        for (i, (_, room_a, window_a)) in held.iter().enumerate() {
            for (_, room_b, window_b) in &held[i + 1..] {
                if window_a.overlaps(window_b) {
                    out.push(Violation::new(
                        ViolationType::StaffOverlap,
                        *teacher,
                        format!(
                            "Teacher '{teacher}' holds rooms '{room_a}' and '{room_b}' at once"
                        ),
                    ));
                } else if window_a.conflicts_with(window_b, rest_gap) {
                    out.push(Violation::new(
                        ViolationType::RestGapTooShort,
                        *teacher,
                        format!(
                            "Teacher '{teacher}' moves from '{room_a}' to '{room_b}' without rest"
                        ),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ExamCategory, RoomAssignment, RoomRef, SlotStatus, StaffRole, StudentRef, TeacherRef,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn request() -> ExamSlotRequest {
        ExamSlotRequest::new("F", "MATH", "S1", NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())
            .with_students(vec![
                StudentRef::new("s1", "Ana"),
                StudentRef::new("s2", "Bo"),
                StudentRef::new("s3", "Cy"),
            ])
            .with_room(RoomRef::new("A", 2))
            .with_room(RoomRef::new("B", 2))
            .with_duration(60)
            .with_window(hm(8, 0), hm(12, 0))
            .with_rest_gap(15)
    }

    fn slot(label: &str, start: NaiveTime, rooms: Vec<(&str, &[&str], &str)>) -> GeneratedSlot {
        let mut out = GeneratedSlot {
            subject_id: "MATH".into(),
            semester_id: "S1".into(),
            status: SlotStatus::Scheduled,
            category: ExamCategory::MultipleChoice,
            label: label.into(),
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            start_time: start,
            end_time: start + TimeDelta::minutes(60),
            rooms: Vec::new(),
            proctors: Vec::new(),
            graders: Vec::new(),
        };
        for (room, students, teacher) in rooms {
            let mut r = RoomAssignment::new(room, 2);
            for id in students {
                r.students.push(StudentRef::new(*id, *id));
            }
            out.rooms.push(r);
            let t = TeacherRef::new(teacher, teacher);
            out.proctors.push(StaffAssignment::assigned(room, StaffRole::Proctor, &t));
            out.graders.push(StaffAssignment::assigned(room, StaffRole::Grader, &t));
        }
        out
    }

    fn types(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type.clone()).collect()
    }

    #[test]
    fn test_clean_timetable() {
        let slots = vec![slot(
            "F - 1",
            hm(8, 0),
            vec![("A", &["s1", "s2"], "t1"), ("B", &["s3"], "t2")],
        )];
        assert!(audit_timetable(&request(), &slots).is_empty());
    }

    #[test]
    fn test_coverage_findings() {
        let slots = vec![slot(
            "F - 1",
            hm(8, 0),
            vec![("A", &["s1", "s1"], "t1"), ("B", &["zz"], "t2")],
        )];
        let found = types(&audit_timetable(&request(), &slots));
        assert!(found.contains(&ViolationType::DuplicateStudent));
        assert!(found.contains(&ViolationType::UnknownStudent));
        assert_eq!(
            found
                .iter()
                .filter(|t| **t == ViolationType::MissingStudent)
                .count(),
            2 // s2, s3
        );
    }

    #[test]
    fn test_capacity_and_room_reuse() {
        let slots = vec![
            slot("F - 1", hm(8, 0), vec![("A", &["s1", "s2", "s3"], "t1")]),
            slot("F - 2", hm(9, 5), vec![("A", &[], "t2")]),
        ];
        let found = types(&audit_timetable(&request(), &slots));
        assert!(found.contains(&ViolationType::CapacityExceeded));
        assert!(found.contains(&ViolationType::RoomReused));
    }

    #[test]
    fn test_window_and_duration() {
        let mut late = slot(
            "F - 1",
            hm(11, 30),
            vec![("A", &["s1", "s2"], "t1"), ("B", &["s3"], "t2")],
        );
        late.end_time = hm(12, 45);
        let found = types(&audit_timetable(&request(), &[late]));
        assert!(found.contains(&ViolationType::OutsideWindow));
        assert!(found.contains(&ViolationType::WrongDuration));
    }

    #[test]
    fn test_staff_overlap_and_rest_gap() {
        let overlapping = vec![slot(
            "F - 1",
            hm(8, 0),
            vec![("A", &["s1", "s2"], "t1"), ("B", &["s3"], "t1")],
        )];
        let found = types(&audit_timetable(&request(), &overlapping));
        assert!(found.contains(&ViolationType::StaffOverlap));

        let tight = vec![
            slot("F - 1", hm(8, 0), vec![("A", &["s1", "s2"], "t1")]),
            slot("F - 2", hm(9, 5), vec![("B", &["s3"], "t1")]),
        ];
        let found = types(&audit_timetable(&request(), &tight));
        assert_eq!(found, vec![ViolationType::RestGapTooShort]);
    }

    #[test]
    fn test_pending_staff() {
        let mut s = slot("F - 1", hm(8, 0), vec![("A", &["s1", "s2"], "t1"), ("B", &["s3"], "t2")]);
        s.graders[1] = StaffAssignment::pending("B", StaffRole::Grader);
        let found = types(&audit_timetable(&request(), &[s]));
        assert_eq!(found, vec![ViolationType::PendingStaff]);
    }

    #[test]
    fn test_audit_into_timetable() {
        let mut t = Timetable::new(vec![slot("F - 1", hm(8, 0), vec![("A", &["s1"], "t1")])]);
        audit_into(&request(), &mut t);
        assert!(!t.is_valid());
        assert!(t
            .violations
            .iter()
            .all(|v| v.violation_type == ViolationType::MissingStudent));
    }
}
