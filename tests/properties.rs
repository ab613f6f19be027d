//! Seeded sweeps over random requests.
//!
//! Every successful run must pass the audit; every failure must be one of
//! the resource shortfalls a valid request can hit.

use chrono::{NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use exam_slots::audit::audit_timetable;
use exam_slots::config::EngineConfig;
use exam_slots::models::{
    ExamCategory, ExamSlotRequest, GeneratedSlot, RoomRef, SlotStatus, StudentRef, TeacherRef,
};
use exam_slots::{ErrorKind, ExamSlotGenerator};

struct Case {
    request: ExamSlotRequest,
    rooms: Vec<RoomRef>,
    teachers: Vec<TeacherRef>,
}

fn random_case(rng: &mut StdRng) -> Case {
    let room_count = rng.random_range(1..=7);
    let rooms: Vec<RoomRef> = (0..room_count)
        .map(|i| RoomRef::new(format!("R{i}"), rng.random_range(1..=15)))
        .collect();
    let capacity: u32 = rooms.iter().map(|r| r.capacity).sum();
    let students = rng.random_range(1..=capacity as usize + 5);

    let teachers: Vec<TeacherRef> = (0..rng.random_range(0..=8))
        .map(|i| TeacherRef::new(format!("t{i}"), format!("Teacher {i}")))
        .collect();

    let end_hour = rng.random_range(10..=18);
    let request = ExamSlotRequest::new(
        "Quiz",
        "BIO",
        "2026F",
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
    )
    .with_students(
        (0..students)
            .map(|i| StudentRef::new(format!("s{i}"), format!("Student {i}")))
            .collect(),
    )
    .with_rooms(rooms.clone())
    .with_duration(rng.random_range(3..=12) * 10)
    .with_window(
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
    )
    .with_rest_gap(rng.random_range(0..=4) * 5)
    .favor_fewer_rooms(rng.random_bool(0.5))
    .favor_fewer_slots(rng.random_bool(0.5));

    Case {
        request,
        rooms,
        teachers,
    }
}

#[test]
fn test_random_requests_hold_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    let generator = ExamSlotGenerator::new();
    let mut succeeded = 0;

    for _ in 0..300 {
        let case = random_case(&mut rng);
        let capacity: usize = case.rooms.iter().map(|r| r.capacity as usize).sum();
        let outcome = generator.generate(&case.request, &case.rooms, &case.teachers);

        match outcome {
            Ok(slots) => {
                succeeded += 1;
                let violations = audit_timetable(&case.request, &slots);
                assert!(violations.is_empty(), "violations: {violations:?}");
                assert!(slots.iter().all(GeneratedSlot::is_fully_staffed));
                if case.request.favor_fewer_slots {
                    assert_eq!(slots.len(), 1);
                }
            }
            Err(err) => {
                match err.kind() {
                    ErrorKind::InsufficientCapacity => {
                        assert!(case.request.student_count() > capacity)
                    }
                    ErrorKind::TimeWindowExceeded | ErrorKind::InsufficientStaff => {
                        assert!(case.request.student_count() <= capacity)
                    }
                    other => panic!("unexpected error kind {other}: {err}"),
                }
            }
        }
    }
    assert!(succeeded > 0);
}

#[test]
fn test_fewer_rooms_never_uses_more_rooms() {
    let mut rng = StdRng::seed_from_u64(7);
    let generator = ExamSlotGenerator::new();
    let pool: Vec<TeacherRef> = (0..20)
        .map(|i| TeacherRef::new(format!("t{i}"), "x"))
        .collect();

    for _ in 0..100 {
        let case = random_case(&mut rng);
        let packed = case.request.clone().favor_fewer_slots(true);
        let compact =
            generator.generate(&packed.clone().favor_fewer_rooms(true), &case.rooms, &pool);
        let spread = generator.generate(&packed.favor_fewer_rooms(false), &case.rooms, &pool);
        if let (Ok(compact), Ok(spread)) = (compact, spread) {
            assert!(compact[0].room_count() <= spread[0].room_count());
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(2026);
    let generator = ExamSlotGenerator::new();

    for _ in 0..50 {
        let case = random_case(&mut rng);
        let first = generator.generate(&case.request, &case.rooms, &case.teachers);
        let second = generator.generate(&case.request, &case.rooms, &case.teachers);
        assert_eq!(first, second);
        if let (Ok(a), Ok(b)) = (first, second) {
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }
    }
}

#[test]
fn test_inputs_are_not_mutated() {
    let mut rng = StdRng::seed_from_u64(99);
    let case = random_case(&mut rng);
    let before = serde_json::to_string(&case.request).unwrap();
    let rooms = case.rooms.clone();
    let teachers = case.teachers.clone();

    let _ = ExamSlotGenerator::new().generate(&case.request, &case.rooms, &case.teachers);

    assert_eq!(serde_json::to_string(&case.request).unwrap(), before);
    assert_eq!(case.rooms, rooms);
    assert_eq!(case.teachers, teachers);
}

#[test]
fn test_slots_serialize_for_persistence() {
    let rooms = vec![RoomRef::new("A", 10), RoomRef::new("B", 10)];
    let request = ExamSlotRequest::new(
        "Lab",
        "CHEM",
        "2026F",
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
    )
    .with_students((0..12).map(|i| StudentRef::new(format!("s{i}"), "x")).collect())
    .with_rooms(rooms.clone())
    .with_category(ExamCategory::Practice);
    let generator = ExamSlotGenerator::new()
        .with_config(EngineConfig::new().with_status(SlotStatus::Draft));

    let slots = generator
        .generate(&request, &rooms, &[TeacherRef::new("t1", "Kim"), TeacherRef::new("t2", "Lee")])
        .unwrap();

    let json = serde_json::to_string(&slots).unwrap();
    let restored: Vec<GeneratedSlot> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, slots);
    assert!(restored.iter().all(|s| s.status == SlotStatus::Draft));
    assert!(restored.iter().all(|s| s.category == ExamCategory::Practice));
}

#[test]
fn test_generation_emits_tracing_events() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let rooms = vec![RoomRef::new("A", 5)];
    let request = ExamSlotRequest::new(
        "Oral",
        "LANG",
        "2026F",
        NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(),
    )
    .with_students(vec![StudentRef::new("s1", "Ana")])
    .with_rooms(rooms.clone());

    assert!(ExamSlotGenerator::new()
        .generate(&request, &rooms, &[TeacherRef::new("t1", "Kim")])
        .is_ok());
}

#[test]
fn test_config_round_trip() {
    let config = EngineConfig::new()
        .with_status(SlotStatus::Draft)
        .with_label_separator(" / ")
        .with_label_start_index(0)
        .with_max_rooms_per_slot(3);
    let json = serde_json::to_string(&config).unwrap();
    let restored: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
    assert_eq!(restored.slot_label("Quiz", 0), "Quiz / 0");

    let defaults: EngineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, EngineConfig::default());
}
