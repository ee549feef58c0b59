use pingcal_core::{
    CalendarSession, CalendarStore, DateKey, DayMarking, PingDraft, PingPatch, SessionError,
};

fn date(raw: &str) -> DateKey {
    DateKey::new(raw).unwrap()
}

#[test]
fn new_session_starts_empty() {
    let session = CalendarSession::new();
    assert!(session.store().is_empty());
}

#[test]
fn session_threads_mutations_through_pure_store_ops() {
    let mut session = CalendarSession::new();
    let day = date("2025-06-02");

    let ping = session.add_ping(&day, PingDraft::new("#ff0000", 9).at_minute(30));
    assert_eq!(session.pings_for(&day).len(), 1);

    session.update_ping(
        &day,
        ping.id,
        PingPatch {
            hour: Some(10),
            ..PingPatch::default()
        },
    );
    assert_eq!(session.pings_for(&day)[0].hour, 10);

    session.remove_ping(&day, ping.id);
    assert!(session.pings_for(&day).is_empty());
    assert!(session.store().is_empty());
}

#[test]
fn session_seeded_from_markings_normalizes_legacy_data() {
    let markings = [(
        date("2025-10-30"),
        DayMarking::Legacy {
            color: Some("red".to_string()),
            hour: 0,
            marked: true,
        },
    )];
    let session = CalendarSession::with_markings(markings);

    let pings = session.pings_for(&date("2025-10-30"));
    assert_eq!(pings.len(), 1);
    assert_eq!(pings[0].color, "red");
    assert!(session.store().day(&date("2025-10-30")).unwrap().marked);
}

#[test]
fn replace_swaps_the_held_snapshot_wholesale() {
    let mut session = CalendarSession::new();
    let day = date("2025-06-02");
    session.add_ping(&day, PingDraft::new("#ff0000", 9));

    session.replace(CalendarStore::new());

    assert!(session.store().is_empty());
}

#[test]
fn queries_between_mutations_see_a_fixed_snapshot() {
    let mut session = CalendarSession::new();
    let day = date("2025-06-02");
    session.add_ping(&day, PingDraft::new("#ff0000", 9));

    // A derivation taken before a mutation is a value, not a live view.
    let snapshot = session.store().clone();
    let seen_before = snapshot.pings_for(&day);

    session.add_ping(&day, PingDraft::new("#00ff00", 10));

    assert_eq!(snapshot.pings_for(&day), seen_before);
    assert_eq!(session.pings_for(&day).len(), 2);
}

#[test]
fn not_initialized_error_names_the_wiring_mistake() {
    let message = SessionError::NotInitialized.to_string();
    assert!(message.contains("not initialized"));
    assert!(message.contains("before calling"));
}
