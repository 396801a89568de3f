//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by table, sticky, and report views.
//! - Provide the effective-interval and rank helpers the engines sort and
//!   clamp on.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once at creation and never mutated.
//! - `position` is meaningful only while `is_pinned`, but is retained across
//!   unpin so the next pin restores the old spot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Execution state of a note.
///
/// The ordinal declaration order (`Todo < InProgress < Partial < Done`) is
/// the comparison order used by status sorting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NoteStatus {
    /// Created but not started.
    #[default]
    Todo,
    /// Work is in progress.
    InProgress,
    /// Partially completed.
    Partial,
    /// Completed.
    Done,
}

impl NoteStatus {
    /// Parses a persisted status string; unknown values map to `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "partial" => Some(Self::Partial),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Urgency of a note, ranked for sorting via [`NoteImportance::rank`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteImportance {
    High,
    #[default]
    Medium,
    Low,
}

impl NoteImportance {
    /// Numeric rank used by importance sorting: HIGH=3, MEDIUM=2, LOW=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Parses a persisted importance string; unknown values map to `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Screen coordinates of a pinned note, in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canonical scheduling unit: a note that can carry an event window, a
/// reminder, and a pinned canvas position.
///
/// Persisted JSON uses camelCase field names so blobs written by earlier
/// versions of the application stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable global ID.
    pub id: NoteId,
    /// Owning group, as a non-owning lookup key.
    pub group_id: super::group::GroupId,
    /// Free text body.
    pub content: String,
    /// Creation timestamp in epoch milliseconds, set once.
    pub created_at: i64,
    /// Optional event start in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Optional event end; absent means "same as start" for overlap math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Optional free-text event location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: NoteStatus,
    pub importance: NoteImportance,
    /// Reminder flag; a note with the flag on and no `reminder_time` is
    /// never triggerable.
    pub is_reminder_on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<i64>,
    pub is_pinned: bool,
    pub position: Position,
    /// Draw order; higher draws above lower.
    pub z_index: i64,
}

impl Note {
    /// Creates an unpinned `Todo` note with a generated stable ID.
    pub fn new(
        group_id: super::group::GroupId,
        content: impl Into<String>,
        created_at: i64,
        z_index: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            content: content.into(),
            created_at,
            start_time: None,
            end_time: None,
            location: None,
            status: NoteStatus::Todo,
            importance: NoteImportance::Medium,
            is_reminder_on: false,
            reminder_time: None,
            is_pinned: false,
            position: Position::default(),
            z_index,
        }
    }

    /// Event end with the "absent end equals start" rule applied.
    ///
    /// Returns `None` when the note has no event window at all.
    pub fn effective_end(&self) -> Option<i64> {
        self.end_time.or(self.start_time)
    }

    /// Interval-overlap check against `[range_start, range_end]`.
    ///
    /// Notes without a `start_time` never overlap anything.
    pub fn overlaps(&self, range_start: i64, range_end: i64) -> bool {
        match (self.start_time, self.effective_end()) {
            (Some(start), Some(end)) => start <= range_end && end >= range_start,
            _ => false,
        }
    }
}
