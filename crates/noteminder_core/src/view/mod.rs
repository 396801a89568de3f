//! Sort/filter engine: read-only ordered views of one group's notes.
//!
//! # Responsibility
//! - Derive a filtered, ordered snapshot of a group's notes for display.
//! - Own the sort-toggle state machine used by repeated header clicks.
//!
//! # Invariants
//! - Sorting is stable: equal effective values keep their input order.
//! - Filtering and sorting never mutate the store; views are snapshots.

use crate::model::group::GroupId;
use crate::model::note::Note;
use crate::timeutil::TimeRange;
use std::cmp::Ordering;

/// Comparable keys for the notebook table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    StartTime,
    EndTime,
    Importance,
    Status,
    ReminderTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Active sort selection; `None` at the engine boundary means insertion
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Advances the sort-toggle state machine for a header click.
///
/// Same key cycles `None -> Asc -> Desc -> None`; a different key jumps
/// straight to `Asc`.
pub fn toggle_sort(current: Option<SortConfig>, key: SortKey) -> Option<SortConfig> {
    match current {
        Some(config) if config.key == key => match config.direction {
            SortDirection::Asc => Some(SortConfig {
                key,
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc => None,
        },
        _ => Some(SortConfig {
            key,
            direction: SortDirection::Asc,
        }),
    }
}

/// Derives the ordered/filtered view of one group's notes.
///
/// `today` restricts the view to notes whose event interval overlaps the
/// given local-day range; notes without a `start_time` are excluded by that
/// filter.
pub fn group_view(
    notes: &[Note],
    group_id: GroupId,
    sort: Option<SortConfig>,
    today: Option<TimeRange>,
) -> Vec<Note> {
    let mut view: Vec<Note> = notes
        .iter()
        .filter(|note| note.group_id == group_id)
        .filter(|note| match today {
            Some(range) => note.overlaps(range.start_ms, range.end_ms),
            None => true,
        })
        .cloned()
        .collect();

    if let Some(config) = sort {
        view.sort_by(|a, b| {
            let ordering = compare_by_key(a, b, config.key);
            match config.direction {
                SortDirection::Asc => ordering,
                // Equal stays Equal, so descending is stable too.
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    view
}

/// All pinned notes across groups, for the sticky overlay.
pub fn pinned(notes: &[Note]) -> Vec<Note> {
    notes.iter().filter(|note| note.is_pinned).cloned().collect()
}

/// Pinned notes whose event interval overlaps the given local day.
pub fn pinned_today(notes: &[Note], today: TimeRange) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| note.is_pinned && note.overlaps(today.start_ms, today.end_ms))
        .cloned()
        .collect()
}

fn compare_by_key(a: &Note, b: &Note, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::StartTime => compare_optional(a.start_time, b.start_time),
        SortKey::EndTime => compare_optional(a.end_time, b.end_time),
        SortKey::Importance => a.importance.rank().cmp(&b.importance.rank()),
        SortKey::Status => a.status.cmp(&b.status),
        SortKey::ReminderTime => reminder_sort_value(a).cmp(&reminder_sort_value(b)),
    }
}

/// Effective reminder sort value: off or unset reminders sort lowest.
fn reminder_sort_value(note: &Note) -> i64 {
    if note.is_reminder_on {
        note.reminder_time.unwrap_or(0)
    } else {
        -1
    }
}

/// Unset optional fields are incomparable and hold their stable position.
fn compare_optional(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        _ => Ordering::Equal,
    }
}
