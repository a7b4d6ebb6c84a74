mod common;
use chrono::NaiveDate;
use common::{local_instant, open_pool, setup_test_db, test_config};
use shiftlog::core::attendance::Attendance;
use shiftlog::db::queries::{get_work_record, load_records_for_day};
use shiftlog::errors::AppError;
use shiftlog::models::work_status::WorkStatus;
use shiftlog::notify::NullNotifier;

#[test]
fn test_clock_in_is_idempotent() {
    let db = setup_test_db("clock_in_idempotent");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    let first = local_instant(2024, 3, 10, 9, 0);
    let id1 = att
        .clock_in(&mut pool, &NullNotifier, "alice", "main", None, first)
        .unwrap();
    let rec1 = get_work_record(&pool.conn, id1).unwrap().unwrap();

    let id2 = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 9, 5),
        )
        .unwrap();
    assert_eq!(id1, id2);

    // The second call must not reset the original clock-in instant
    let rec2 = get_work_record(&pool.conn, id2).unwrap().unwrap();
    assert_eq!(rec2.clock_in, rec1.clock_in);
    assert_eq!(rec2.clock_in, Some(first));
    assert!(rec2.status.is_working());
}

#[test]
fn test_clock_in_activates_schedule_placeholder() {
    let db = setup_test_db("clock_in_placeholder");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    // A placeholder left by the external shift planner, with stale fields
    pool.conn
        .execute_batch(
            "INSERT INTO work_records
                (owner_id, store_id, business_day, status, clock_out,
                 scheduled_end_time, created_at)
             VALUES ('alice', 'main', '2024-03-10', 'pending',
                     '2024-03-01T18:00:00.000+09:00',
                     '18:00', '2024-03-01T00:00:00.000+09:00');
             INSERT INTO work_breaks (work_record_id, break_start)
             VALUES (1, '2024-03-01T00:00:00.000+09:00');",
        )
        .unwrap();

    let now = local_instant(2024, 3, 10, 9, 0);
    let id = att
        .clock_in(&mut pool, &NullNotifier, "alice", "main", None, now)
        .unwrap();
    assert_eq!(id, 1);

    let rec = get_work_record(&pool.conn, id).unwrap().unwrap();
    assert!(rec.status.is_working());
    assert_eq!(rec.clock_in, Some(now));
    assert_eq!(rec.clock_out, None);
    assert_eq!(rec.scheduled_end_time, None);
    assert!(rec.breaks.is_empty());
}

#[test]
fn test_clock_out_requires_owner() {
    let db = setup_test_db("clock_out_owner");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    let now = local_instant(2024, 3, 10, 9, 0);
    let id = att
        .clock_in(&mut pool, &NullNotifier, "alice", "main", None, now)
        .unwrap();

    let err = att
        .clock_out(&mut pool, id, "bob", local_instant(2024, 3, 10, 18, 0))
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(i) if i == id));

    // The record is untouched
    let rec = get_work_record(&pool.conn, id).unwrap().unwrap();
    assert!(rec.status.is_working());
    assert_eq!(rec.clock_out, None);
}

#[test]
fn test_clock_out_unknown_record() {
    let db = setup_test_db("clock_out_missing");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    let err = att
        .clock_out(&mut pool, 999, "alice", local_instant(2024, 3, 10, 18, 0))
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(999)));
}

#[test]
fn test_double_start_break_is_rejected() {
    let db = setup_test_db("double_break");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    let id = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 9, 0),
        )
        .unwrap();

    att.start_break(&mut pool, id, "alice", local_instant(2024, 3, 10, 12, 0))
        .unwrap();
    let err = att
        .start_break(&mut pool, id, "alice", local_instant(2024, 3, 10, 12, 1))
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyOnBreak(i) if i == id));

    // Still exactly one open interval
    let rec = get_work_record(&pool.conn, id).unwrap().unwrap();
    assert_eq!(rec.breaks.iter().filter(|b| b.is_open()).count(), 1);
}

#[test]
fn test_end_break_without_open_interval() {
    let db = setup_test_db("no_active_break");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    let id = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 9, 0),
        )
        .unwrap();

    let err = att
        .end_break(&mut pool, id, "alice", local_instant(2024, 3, 10, 12, 0))
        .unwrap_err();
    assert!(matches!(err, AppError::NoActiveBreak(i) if i == id));
}

#[test]
fn test_break_cycle_and_worked_duration() {
    let db = setup_test_db("worked_duration");
    // Rounding on: the display fields round, the duration must not
    let mut cfg = test_config(&db);
    cfg.rounding_enabled = true;
    cfg.rounding_method = "nearest".to_string();
    cfg.rounding_granularity_minutes = 15;

    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&cfg);

    let id = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 9, 0),
        )
        .unwrap();
    att.start_break(&mut pool, id, "alice", local_instant(2024, 3, 10, 12, 0))
        .unwrap();
    att.end_break(&mut pool, id, "alice", local_instant(2024, 3, 10, 12, 30))
        .unwrap();
    att.clock_out(&mut pool, id, "alice", local_instant(2024, 3, 10, 18, 0))
        .unwrap();

    let rec = get_work_record(&pool.conn, id).unwrap().unwrap();
    assert!(rec.status.is_completed());
    // 09:00 → 18:00 minus a 30-minute break = 8h30m
    assert_eq!(rec.worked_minutes(local_instant(2024, 3, 10, 23, 0)), 510);
    assert_eq!(rec.scheduled_start_time.as_deref(), Some("09:00"));
    assert_eq!(rec.scheduled_end_time.as_deref(), Some("18:00"));
}

#[test]
fn test_open_record_duration_uses_reference_instant() {
    let db = setup_test_db("open_duration");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    let id = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 9, 0),
        )
        .unwrap();
    att.start_break(&mut pool, id, "alice", local_instant(2024, 3, 10, 12, 0))
        .unwrap();

    let rec = get_work_record(&pool.conn, id).unwrap().unwrap();
    // Open record and open break both measured to the reference: 3h
    // elapsed, 30m of which on break
    assert_eq!(rec.worked_minutes(local_instant(2024, 3, 10, 12, 30)), 180);
}

#[test]
fn test_day_boundary_isolation() {
    let db = setup_test_db("day_boundary");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    // 04:50 with an 05:00 rollover is still the 2024-03-09 business day
    let early = local_instant(2024, 3, 10, 4, 50);
    let id_early = att
        .clock_in(&mut pool, &NullNotifier, "alice", "main", None, early)
        .unwrap();
    let rec_early = get_work_record(&pool.conn, id_early).unwrap().unwrap();
    assert_eq!(
        rec_early.business_day,
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    );

    // 09:00 the same calendar day is a new business day: new record, the
    // first one untouched even though it is still working
    let id_late = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 9, 0),
        )
        .unwrap();
    assert_ne!(id_early, id_late);

    let rec_late = get_work_record(&pool.conn, id_late).unwrap().unwrap();
    assert_eq!(
        rec_late.business_day,
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    );

    let rec_early_after = get_work_record(&pool.conn, id_early).unwrap().unwrap();
    assert!(rec_early_after.status.is_working());
    assert_eq!(rec_early_after.clock_in, Some(early));
}

#[test]
fn test_second_cycle_creates_new_record() {
    let db = setup_test_db("second_cycle");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    let id1 = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 9, 0),
        )
        .unwrap();
    att.clock_out(&mut pool, id1, "alice", local_instant(2024, 3, 10, 13, 0))
        .unwrap();

    let id2 = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 15, 0),
        )
        .unwrap();
    assert_ne!(id1, id2);

    let records = load_records_for_day(&pool.conn, "main", Some("alice"), "2024-03-10").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, WorkStatus::Completed);
    assert_eq!(records[1].status, WorkStatus::Working);
}

#[test]
fn test_clock_out_is_idempotent_on_completed_record() {
    let db = setup_test_db("clock_out_completed");
    let mut pool = open_pool(&db);
    let att = Attendance::from_config(&test_config(&db));

    let id = att
        .clock_in(
            &mut pool,
            &NullNotifier,
            "alice",
            "main",
            None,
            local_instant(2024, 3, 10, 9, 0),
        )
        .unwrap();
    let out = local_instant(2024, 3, 10, 18, 0);
    att.clock_out(&mut pool, id, "alice", out).unwrap();
    att.clock_out(&mut pool, id, "alice", local_instant(2024, 3, 10, 19, 0))
        .unwrap();

    let rec = get_work_record(&pool.conn, id).unwrap().unwrap();
    assert_eq!(rec.clock_out, Some(out));
}
