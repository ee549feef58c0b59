use pingcal_core::{
    project_month, project_week, CalendarStore, DateKey, MonthLayout, PingDraft, WeekLayout,
};

fn date(raw: &str) -> DateKey {
    DateKey::new(raw).unwrap()
}

fn day_with(drafts: Vec<PingDraft>) -> Vec<pingcal_core::Ping> {
    let day = date("2025-06-02");
    let mut store = CalendarStore::new();
    for draft in drafts {
        store = store.add(&day, draft).0;
    }
    store.pings_for(&day)
}

#[test]
fn month_position_is_proportional_to_minutes_since_midnight() {
    let layout = MonthLayout::default();
    let pings = day_with(vec![PingDraft::new("#ff0000", 12)]);

    let dots = project_month(&pings, &layout);

    // 12:00 is halfway through the day, so halfway down the 50-unit cell.
    assert_eq!(dots.len(), 1);
    assert!((dots[0].top - 25.0).abs() < 1e-4);
    assert_eq!(dots[0].right, 0.0);
    assert_eq!(dots[0].color, "#ff0000");
}

#[test]
fn month_midnight_ping_sits_at_the_top() {
    let pings = day_with(vec![PingDraft::new("#ff0000", 0)]);
    let dots = project_month(&pings, &MonthLayout::default());
    assert_eq!(dots[0].top, 0.0);
}

#[test]
fn month_unspecified_minute_reads_as_zero() {
    let layout = MonthLayout::default();
    let explicit = day_with(vec![PingDraft::new("#ff0000", 6).at_minute(0)]);
    let implicit = day_with(vec![PingDraft::new("#ff0000", 6)]);

    assert_eq!(
        project_month(&explicit, &layout)[0].top,
        project_month(&implicit, &layout)[0].top
    );
}

#[test]
fn month_late_ping_is_clamped_inside_the_cell() {
    let layout = MonthLayout::default();
    let pings = day_with(vec![PingDraft::new("#ff0000", 23).at_minute(59)]);

    let dots = project_month(&pings, &layout);

    assert!(dots[0].top <= layout.cell_height - layout.dot_diameter);
    assert_eq!(dots[0].top, layout.cell_height - layout.dot_diameter);
}

#[test]
fn month_dots_keep_creation_order_for_colliding_times() {
    let pings = day_with(vec![
        PingDraft::new("#first", 8),
        PingDraft::new("#second", 8),
    ]);

    let dots = project_month(&pings, &MonthLayout::default());

    assert_eq!(dots[0].color, "#first");
    assert_eq!(dots[1].color, "#second");
}

#[test]
fn month_overflow_wraps_into_columns_of_capacity_k() {
    let layout = MonthLayout::default();
    // 3*K + 1 pings: the last one must land in column 3 (0-based).
    let count = 3 * layout.column_capacity + 1;
    let pings = day_with((0..count).map(|_| PingDraft::new("#ff0000", 9)).collect());

    let dots = project_month(&pings, &layout);

    assert_eq!(dots.len(), count);
    let expected_offset = 3.0 * (layout.dot_diameter + layout.column_gap);
    assert_eq!(dots[count - 1].right, expected_offset);
    // Everyone in the first column sits flush with the origin.
    for dot in &dots[..layout.column_capacity] {
        assert_eq!(dot.right, 0.0);
    }
}

#[test]
fn month_projection_of_no_pings_is_empty() {
    assert!(project_month(&[], &MonthLayout::default()).is_empty());
}

#[test]
fn week_positions_use_the_taller_bar() {
    let layout = WeekLayout::default();
    let pings = day_with(vec![PingDraft::new("#ff0000", 12)]);

    let bar = project_week(&pings, &layout);

    assert_eq!(bar.markers.len(), 1);
    assert!((bar.markers[0].top - 80.0).abs() < 1e-4);
    assert_eq!(bar.ping_count, 1);
}

#[test]
fn week_late_ping_is_clamped_inside_the_bar() {
    let layout = WeekLayout::default();
    let pings = day_with(vec![PingDraft::new("#ff0000", 23).at_minute(59)]);

    let bar = project_week(&pings, &layout);

    assert_eq!(bar.markers[0].top, layout.bar_height - layout.marker_diameter);
}

#[test]
fn week_bar_reports_the_full_ping_count() {
    let pings = day_with(vec![
        PingDraft::new("#ff0000", 7),
        PingDraft::new("#00ff00", 12),
        PingDraft::new("#0000ff", 21),
    ]);

    let bar = project_week(&pings, &WeekLayout::default());

    assert_eq!(bar.ping_count, 3);
    assert_eq!(bar.markers.len(), 3);
}

#[test]
fn week_markers_keep_creation_order_for_colliding_times() {
    let pings = day_with(vec![
        PingDraft::new("#first", 8),
        PingDraft::new("#second", 8),
    ]);

    let bar = project_week(&pings, &WeekLayout::default());

    assert_eq!(bar.markers[0].color, "#first");
    assert_eq!(bar.markers[1].color, "#second");
}

#[test]
fn projections_carry_the_ping_id_as_view_key() {
    let pings = day_with(vec![PingDraft::new("#ff0000", 9)]);

    let dots = project_month(&pings, &MonthLayout::default());
    let bar = project_week(&pings, &WeekLayout::default());

    assert_eq!(dots[0].id, pings[0].id);
    assert_eq!(bar.markers[0].id, pings[0].id);
}
