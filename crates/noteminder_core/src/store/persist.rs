//! Lenient blob codec for the persisted note/group collections.
//!
//! # Responsibility
//! - Encode collections to the JSON blob shape the persistence boundary
//!   carries.
//! - Decode blobs written by any earlier version, substituting defaults per
//!   field instead of surfacing errors.
//!
//! # Invariants
//! - A malformed top-level blob decodes to an empty collection.
//! - A malformed element is skipped; a malformed field falls back to its
//!   default.
//! - Notes pointing at unknown groups are re-homed to the first group.

use crate::model::group::{Group, GroupId};
use crate::model::note::{Note, NoteImportance, NoteStatus, Position};
use log::warn;
use serde::Deserialize;
use uuid::Uuid;

pub const NOTES_KEY: &str = "noteminder.notes";
pub const GROUPS_KEY: &str = "noteminder.groups";

/// Permissive wire shape for one persisted note.
///
/// Identifiers arrive as strings so one bad UUID cannot poison the whole
/// collection; enum fields arrive as raw strings for the same reason.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNote {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    start_time: Option<i64>,
    #[serde(default)]
    end_time: Option<i64>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    importance: Option<String>,
    #[serde(default)]
    is_reminder_on: bool,
    #[serde(default)]
    reminder_time: Option<i64>,
    #[serde(default)]
    is_pinned: bool,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    z_index: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredGroup {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Decodes the groups blob; malformed content degrades to an empty list.
pub(crate) fn decode_groups(raw: &str) -> Vec<Group> {
    let elements: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(elements) => elements,
        Err(err) => {
            warn!("event=blob_decode module=store status=degraded kind=groups error={err}");
            return Vec::new();
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let stored: StoredGroup = match serde_json::from_value(value) {
                Ok(stored) => stored,
                Err(err) => {
                    warn!(
                        "event=blob_decode module=store status=skipped kind=group index={index} error={err}"
                    );
                    return None;
                }
            };
            Some(Group {
                id: parse_id(stored.id.as_deref()),
                name: stored
                    .name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| format!("Notebook {}", index + 1)),
            })
        })
        .collect()
}

/// Decodes the notes blob against an already-decoded group list.
///
/// `fallback_created_at` stamps notes persisted without a creation time;
/// `groups` must be non-empty (the store guarantees a default group first).
pub(crate) fn decode_notes(raw: &str, fallback_created_at: i64, groups: &[Group]) -> Vec<Note> {
    let Some(fallback_group) = groups.first().map(|group| group.id) else {
        return Vec::new();
    };

    let elements: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(elements) => elements,
        Err(err) => {
            warn!("event=blob_decode module=store status=degraded kind=notes error={err}");
            return Vec::new();
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let stored: StoredNote = match serde_json::from_value(value) {
                Ok(stored) => stored,
                Err(err) => {
                    warn!(
                        "event=blob_decode module=store status=skipped kind=note index={index} error={err}"
                    );
                    return None;
                }
            };
            Some(restore_note(stored, fallback_created_at, fallback_group, groups))
        })
        .collect()
}

fn restore_note(
    stored: StoredNote,
    fallback_created_at: i64,
    fallback_group: GroupId,
    groups: &[Group],
) -> Note {
    let group_id = stored
        .group_id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .filter(|candidate| groups.iter().any(|group| group.id == *candidate))
        .unwrap_or(fallback_group);

    Note {
        id: parse_id(stored.id.as_deref()),
        group_id,
        content: stored.content,
        created_at: stored.created_at.unwrap_or(fallback_created_at),
        start_time: stored.start_time,
        end_time: stored.end_time,
        location: stored.location,
        status: stored
            .status
            .as_deref()
            .and_then(NoteStatus::parse)
            .unwrap_or_default(),
        importance: stored
            .importance
            .as_deref()
            .and_then(NoteImportance::parse)
            .unwrap_or_default(),
        is_reminder_on: stored.is_reminder_on,
        reminder_time: stored.reminder_time,
        is_pinned: stored.is_pinned,
        position: stored.position.unwrap_or_default(),
        z_index: stored.z_index.unwrap_or(0),
    }
}

fn parse_id(raw: Option<&str>) -> Uuid {
    raw.and_then(|value| Uuid::parse_str(value).ok())
        .unwrap_or_else(Uuid::new_v4)
}
