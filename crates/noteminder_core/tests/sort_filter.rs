use chrono::{FixedOffset, TimeZone};
use noteminder_core::{
    day_bounds, group_view, pinned, pinned_today, toggle_sort, Note, NoteImportance, SortConfig,
    SortDirection, SortKey,
};
use uuid::Uuid;

fn note(group: Uuid, content: &str, created_at: i64) -> Note {
    Note::new(group, content, created_at, 10)
}

fn contents(view: &[Note]) -> Vec<&str> {
    view.iter().map(|n| n.content.as_str()).collect()
}

#[test]
fn unsorted_view_keeps_insertion_order() {
    let group = Uuid::new_v4();
    let notes = vec![note(group, "c", 3), note(group, "a", 1), note(group, "b", 2)];

    let view = group_view(&notes, group, None, None);
    assert_eq!(contents(&view), vec!["c", "a", "b"]);
}

#[test]
fn view_filters_to_the_requested_group() {
    let group = Uuid::new_v4();
    let other = Uuid::new_v4();
    let notes = vec![note(group, "mine", 1), note(other, "theirs", 2)];

    let view = group_view(&notes, group, None, None);
    assert_eq!(contents(&view), vec!["mine"]);
}

#[test]
fn created_at_sort_orders_both_directions() {
    let group = Uuid::new_v4();
    let notes = vec![note(group, "c", 3), note(group, "a", 1), note(group, "b", 2)];

    let asc = group_view(
        &notes,
        group,
        Some(SortConfig {
            key: SortKey::CreatedAt,
            direction: SortDirection::Asc,
        }),
        None,
    );
    assert_eq!(contents(&asc), vec!["a", "b", "c"]);

    let desc = group_view(
        &notes,
        group,
        Some(SortConfig {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        }),
        None,
    );
    assert_eq!(contents(&desc), vec!["c", "b", "a"]);
}

#[test]
fn importance_sort_is_stable_for_equal_ranks() {
    let group = Uuid::new_v4();
    let mut first = note(group, "first-high", 1);
    first.importance = NoteImportance::High;
    let mut low = note(group, "low", 2);
    low.importance = NoteImportance::Low;
    let mut second = note(group, "second-high", 3);
    second.importance = NoteImportance::High;

    let view = group_view(
        &[first, low, second],
        group,
        Some(SortConfig {
            key: SortKey::Importance,
            direction: SortDirection::Desc,
        }),
        None,
    );
    // Equal ranks keep their input order in both directions.
    assert_eq!(contents(&view), vec!["first-high", "second-high", "low"]);
}

#[test]
fn reminder_sort_puts_disabled_reminders_lowest() {
    let group = Uuid::new_v4();
    let mut off = note(group, "off", 1);
    off.reminder_time = Some(50);
    let mut armed_late = note(group, "late", 2);
    armed_late.is_reminder_on = true;
    armed_late.reminder_time = Some(2_000);
    let mut armed_unset = note(group, "armed-unset", 3);
    armed_unset.is_reminder_on = true;
    let mut armed_early = note(group, "early", 4);
    armed_early.is_reminder_on = true;
    armed_early.reminder_time = Some(1_000);

    let view = group_view(
        &[off, armed_late, armed_unset, armed_early],
        group,
        Some(SortConfig {
            key: SortKey::ReminderTime,
            direction: SortDirection::Asc,
        }),
        None,
    );
    assert_eq!(contents(&view), vec!["off", "armed-unset", "early", "late"]);
}

#[test]
fn unset_optional_fields_hold_their_stable_position() {
    let group = Uuid::new_v4();
    let mut windowed = note(group, "windowed", 1);
    windowed.start_time = Some(500);
    let bare = note(group, "bare", 2);
    let mut earlier = note(group, "earlier", 3);
    earlier.start_time = Some(100);

    let view = group_view(
        &[windowed, bare, earlier],
        group,
        Some(SortConfig {
            key: SortKey::StartTime,
            direction: SortDirection::Asc,
        }),
        None,
    );
    // `bare` is incomparable and must not migrate to either end.
    assert_eq!(contents(&view), vec!["windowed", "bare", "earlier"]);
}

#[test]
fn triple_toggle_returns_to_insertion_order() {
    let group = Uuid::new_v4();
    let notes = vec![note(group, "c", 3), note(group, "a", 1), note(group, "b", 2)];

    let mut config = None;
    config = toggle_sort(config, SortKey::CreatedAt);
    config = toggle_sort(config, SortKey::CreatedAt);
    config = toggle_sort(config, SortKey::CreatedAt);
    assert_eq!(config, None);

    let view = group_view(&notes, group, config, None);
    assert_eq!(contents(&view), vec!["c", "a", "b"]);
}

#[test]
fn today_filter_includes_events_spanning_midnight() {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let noon_today = tz
        .with_ymd_and_hms(2024, 7, 3, 12, 0, 0)
        .unwrap()
        .timestamp_millis();
    let bounds = day_bounds(&tz, noon_today).unwrap();

    let group = Uuid::new_v4();
    let mut overnight = note(group, "overnight", 1);
    overnight.start_time = Some(
        tz.with_ymd_and_hms(2024, 7, 2, 23, 0, 0)
            .unwrap()
            .timestamp_millis(),
    );
    overnight.end_time = Some(
        tz.with_ymd_and_hms(2024, 7, 3, 1, 0, 0)
            .unwrap()
            .timestamp_millis(),
    );

    let mut yesterday_only = note(group, "yesterday", 2);
    yesterday_only.start_time = Some(
        tz.with_ymd_and_hms(2024, 7, 2, 9, 0, 0)
            .unwrap()
            .timestamp_millis(),
    );

    let windowless = note(group, "windowless", 3);

    let view = group_view(
        &[overnight, yesterday_only, windowless],
        group,
        None,
        Some(bounds),
    );
    assert_eq!(contents(&view), vec!["overnight"]);
}

#[test]
fn sticky_overlay_helpers_respect_pin_state_and_day_overlap() {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let noon_today = tz
        .with_ymd_and_hms(2024, 7, 3, 12, 0, 0)
        .unwrap()
        .timestamp_millis();
    let bounds = day_bounds(&tz, noon_today).unwrap();

    let group = Uuid::new_v4();
    let mut pinned_today_note = note(group, "pinned today", 1);
    pinned_today_note.is_pinned = true;
    pinned_today_note.start_time = Some(noon_today);

    let mut pinned_undated = note(group, "pinned undated", 2);
    pinned_undated.is_pinned = true;

    let mut unpinned_today = note(group, "unpinned today", 3);
    unpinned_today.start_time = Some(noon_today);

    let notes = [pinned_today_note, pinned_undated, unpinned_today];

    let all_pinned = pinned(&notes);
    assert_eq!(contents(&all_pinned), vec!["pinned today", "pinned undated"]);

    let todays = pinned_today(&notes, bounds);
    assert_eq!(contents(&todays), vec!["pinned today"]);
}
