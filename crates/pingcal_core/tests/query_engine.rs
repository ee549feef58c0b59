use pingcal_core::{
    count_in_range, filter_by_color, group_by_hour, is_valid_ping, CalendarStore, DateKey,
    PingDraft,
};

fn date(raw: &str) -> DateKey {
    DateKey::new(raw).unwrap()
}

/// Three days across two months: two pings in January, one in February.
fn sample_store() -> CalendarStore {
    let store = CalendarStore::new();
    let (store, _) = store.add(&date("2025-01-05"), PingDraft::new("#ff0000", 9).at_minute(30));
    let (store, _) = store.add(&date("2025-01-31"), PingDraft::new("#00ff00", 9));
    let (store, _) = store.add(&date("2025-02-01"), PingDraft::new("#ff0000", 18));
    store
}

#[test]
fn count_without_bounds_counts_everything() {
    let store = sample_store();
    assert_eq!(count_in_range(&store, None, None), 3);
}

#[test]
fn count_respects_inclusive_bounds() {
    let store = sample_store();
    let start = date("2025-01-01");
    let end = date("2025-01-31");

    assert_eq!(count_in_range(&store, Some(&start), Some(&end)), 2);
}

#[test]
fn count_with_single_bound_restricts_one_side() {
    let store = sample_store();
    let cutoff = date("2025-01-31");

    assert_eq!(count_in_range(&store, Some(&cutoff), None), 2);
    assert_eq!(count_in_range(&store, None, Some(&cutoff)), 2);
}

#[test]
fn count_with_inverted_bounds_yields_zero() {
    let store = sample_store();
    let start = date("2025-02-01");
    let end = date("2025-01-01");

    assert_eq!(count_in_range(&store, Some(&start), Some(&end)), 0);
}

#[test]
fn count_on_empty_store_is_zero() {
    assert_eq!(count_in_range(&CalendarStore::new(), None, None), 0);
}

#[test]
fn group_by_hour_for_one_day_uses_that_day_only() {
    let store = sample_store();
    let groups = group_by_hour(&store, Some(&date("2025-01-05")));

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[&9].len(), 1);
    assert_eq!(groups[&9][0].minute, Some(30));
}

#[test]
fn group_by_hour_across_all_days_flattens_first() {
    let store = sample_store();
    let groups = group_by_hour(&store, None);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[&9].len(), 2);
    assert_eq!(groups[&18].len(), 1);
}

#[test]
fn group_by_hour_has_no_entries_for_silent_hours() {
    let store = sample_store();
    let groups = group_by_hour(&store, None);

    assert!(!groups.contains_key(&0));
    assert!(!groups.contains_key(&23));
}

#[test]
fn group_by_hour_ignores_minutes_when_bucketing() {
    let store = CalendarStore::new();
    let day = date("2025-03-03");
    let (store, _) = store.add(&day, PingDraft::new("#ff0000", 7).at_minute(1));
    let (store, _) = store.add(&day, PingDraft::new("#ff0000", 7).at_minute(59));

    let groups = group_by_hour(&store, Some(&day));
    assert_eq!(groups[&7].len(), 2);
}

#[test]
fn filter_by_color_keeps_only_matching_pings() {
    let store = sample_store();
    let red = filter_by_color(&store, "#ff0000");

    assert_eq!(red.day_count(), 2);
    assert_eq!(red.total_pings(), 2);
    for (_, record) in red.iter_days() {
        assert!(record.pings.iter().all(|ping| ping.color == "#ff0000"));
    }
}

#[test]
fn filter_by_color_excludes_days_without_matches() {
    let store = sample_store();
    let green = filter_by_color(&store, "#00ff00");

    assert_eq!(green.day_count(), 1);
    assert!(green.day(&date("2025-01-05")).is_none());
    assert!(green.day(&date("2025-01-31")).is_some());
}

#[test]
fn filter_by_color_is_case_sensitive_exact_match() {
    let store = CalendarStore::new();
    let day = date("2025-03-03");
    let (store, _) = store.add(&day, PingDraft::new("#FF0000", 9));

    assert!(filter_by_color(&store, "#ff0000").is_empty());
    assert!(filter_by_color(&store, "#FF00").is_empty());
    assert_eq!(filter_by_color(&store, "#FF0000").total_pings(), 1);
}

#[test]
fn filter_by_color_subset_keeps_adding_monotonically() {
    let store = sample_store();
    let before_max = max_timestamp(&store);

    let subset = filter_by_color(&store, "#ff0000");
    let (subset, added) = subset.add(&date("2025-02-02"), PingDraft::new("#ff0000", 12));

    // The subset inherits the source's logical clock, so new pings still
    // order after everything the full store ever created.
    assert!(added.timestamp > before_max);
    assert_eq!(subset.total_pings(), 3);
}

#[test]
fn is_valid_ping_scenarios() {
    assert!(is_valid_ping(&PingDraft::new("#ff0000", 9).at_minute(30)));
    assert!(is_valid_ping(&PingDraft::new("#ff0000", 0)));
    assert!(!is_valid_ping(&PingDraft::new("", 25)));
    assert!(!is_valid_ping(&PingDraft::new("#ff0000", 24)));
    assert!(!is_valid_ping(&PingDraft::new("#ff0000", 9).at_minute(60)));
}

fn max_timestamp(store: &CalendarStore) -> u64 {
    store
        .iter_days()
        .flat_map(|(_, record)| record.pings.iter())
        .map(|ping| ping.timestamp)
        .max()
        .expect("store has pings")
}
