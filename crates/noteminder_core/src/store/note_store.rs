//! Canonical note/group store.
//!
//! # Responsibility
//! - Own the note and group collections and the z-order counter.
//! - Serialize every mutation (edits, pin placement, scheduler commands)
//!   through one owner.
//! - Round-trip both collections through the persistence boundary with
//!   lenient recovery.
//!
//! # Invariants
//! - At least one group exists at all times; deleting the last group is
//!   rejected with no state change.
//! - `z_index` values come from a single monotonically increasing counter;
//!   no two notes receive the same value from the same mutation.
//! - Operations on unknown ids are rejected as no-ops.

use super::persist;
use crate::clock::Clock;
use crate::layout::{self, Viewport};
use crate::model::group::{Group, GroupId};
use crate::model::note::{Note, NoteId, Position};
use crate::storage::{BlobStore, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Name given to the group that is created when none survives a load.
pub const DEFAULT_GROUP_NAME: &str = "My Notebook 1";

/// Counter floor; restored collections never hand out a value at or below
/// their highest persisted `z_index`.
const INITIAL_Z_INDEX: i64 = 10;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from store mutations and persistence round-trips.
#[derive(Debug)]
pub enum StoreError {
    NoteNotFound(NoteId),
    GroupNotFound(GroupId),
    /// Deleting the last remaining group is forbidden.
    LastGroup,
    /// Group names must not be blank after trimming.
    InvalidGroupName,
    /// Persistence boundary failure.
    Storage(StorageError),
    /// Collection could not be encoded for saving.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::LastGroup => write!(f, "cannot delete the last remaining group"),
            Self::InvalidGroupName => write!(f, "group name must not be blank"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Sole owner of the mutable note/group collections.
///
/// A multi-threaded host wraps the store in one `Mutex`; the scheduler does
/// exactly that.
pub struct NoteStore {
    notes: Vec<Note>,
    groups: Vec<Group>,
    max_z_index: i64,
    clock: Arc<dyn Clock>,
}

impl NoteStore {
    /// Creates a store with one default group and no notes.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            notes: Vec::new(),
            groups: vec![Group::new(DEFAULT_GROUP_NAME)],
            max_z_index: INITIAL_Z_INDEX,
            clock,
        }
    }

    /// Notes in iteration order: newest first, then manual order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get_note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Snapshot of one group's notes in store iteration order.
    pub fn notes_in_group(&self, group_id: GroupId) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| note.group_id == group_id)
            .cloned()
            .collect()
    }

    /// Creates an unpinned `Todo` note at the front of the collection.
    pub fn add_note(&mut self, group_id: GroupId, content: impl Into<String>) -> StoreResult<NoteId> {
        self.require_group(group_id)?;
        let z_index = self.next_z_index();
        let note = Note::new(group_id, content, self.clock.now_ms(), z_index);
        let id = note.id;
        self.notes.insert(0, note);
        Ok(id)
    }

    /// Replaces a note's editable fields wholesale.
    ///
    /// `created_at` and `z_index` are preserved from the stored note:
    /// creation stamps are set once, and draw order only moves through
    /// [`NoteStore::bring_to_front`] and the pin paths.
    pub fn update_note(&mut self, updated: Note) -> StoreResult<()> {
        self.require_group(updated.group_id)?;
        let existing = self
            .notes
            .iter_mut()
            .find(|note| note.id == updated.id)
            .ok_or(StoreError::NoteNotFound(updated.id))?;
        let created_at = existing.created_at;
        let z_index = existing.z_index;
        *existing = updated;
        existing.created_at = created_at;
        existing.z_index = z_index;
        Ok(())
    }

    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            return Err(StoreError::NoteNotFound(id));
        }
        Ok(())
    }

    /// Moves a note within its group's manual order.
    ///
    /// Indices address positions inside the group's filtered sequence; out
    /// of range indices leave the collection untouched.
    pub fn reorder_notes(&mut self, group_id: GroupId, from: usize, to: usize) -> StoreResult<()> {
        self.require_group(group_id)?;
        let mut grouped: Vec<Note> = Vec::new();
        let mut others: Vec<Note> = Vec::new();
        for note in self.notes.drain(..) {
            if note.group_id == group_id {
                grouped.push(note);
            } else {
                others.push(note);
            }
        }
        if from < grouped.len() && to < grouped.len() {
            let moved = grouped.remove(from);
            grouped.insert(to, moved);
        }
        grouped.extend(others);
        self.notes = grouped;
        Ok(())
    }

    /// Assigns a fresh topmost `z_index` to one note.
    pub fn bring_to_front(&mut self, id: NoteId) -> StoreResult<i64> {
        let z_index = self.max_z_index + 1;
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(StoreError::NoteNotFound(id))?;
        note.z_index = z_index;
        self.max_z_index = z_index;
        Ok(z_index)
    }

    pub fn create_group(&mut self, name: impl Into<String>) -> GroupId {
        let name = name.into();
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            format!("Notebook {}", self.groups.len() + 1)
        } else {
            trimmed.to_string()
        };
        let group = Group::new(name);
        let id = group.id;
        self.groups.push(group);
        id
    }

    pub fn rename_group(&mut self, id: GroupId, name: impl Into<String>) -> StoreResult<()> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidGroupName);
        }
        let group = self
            .groups
            .iter_mut()
            .find(|group| group.id == id)
            .ok_or(StoreError::GroupNotFound(id))?;
        group.name = trimmed.to_string();
        Ok(())
    }

    /// Deletes a group and cascades to its notes.
    ///
    /// The last remaining group is protected; the call is rejected with no
    /// state change.
    pub fn delete_group(&mut self, id: GroupId) -> StoreResult<()> {
        self.require_group(id)?;
        if self.groups.len() <= 1 {
            return Err(StoreError::LastGroup);
        }
        self.groups.retain(|group| group.id != id);
        let before = self.notes.len();
        self.notes.retain(|note| note.group_id != id);
        info!(
            "event=group_deleted module=store status=ok cascaded_notes={}",
            before - self.notes.len()
        );
        Ok(())
    }

    /// Moves a group within the shelf order; out-of-range indices are a
    /// no-op.
    pub fn reorder_groups(&mut self, from: usize, to: usize) {
        if from < self.groups.len() && to < self.groups.len() {
            let moved = self.groups.remove(from);
            self.groups.insert(to, moved);
        }
    }

    /// Pins one note, placing it via the layout engine.
    ///
    /// Pinning an already-pinned note is a no-op: its position and draw
    /// order are left untouched.
    pub fn pin_note(
        &mut self,
        id: NoteId,
        anchor: Option<Position>,
        viewport: Viewport,
    ) -> StoreResult<()> {
        let z_index = self.max_z_index + 1;
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(StoreError::NoteNotFound(id))?;
        if note.is_pinned {
            return Ok(());
        }
        note.position = layout::single_pin_position(anchor, viewport);
        note.is_pinned = true;
        note.z_index = z_index;
        self.max_z_index = z_index;
        Ok(())
    }

    /// Unpins one note; the position is retained for the next pin.
    pub fn unpin_note(&mut self, id: NoteId) -> StoreResult<()> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(StoreError::NoteNotFound(id))?;
        note.is_pinned = false;
        Ok(())
    }

    /// Pins a batch of notes onto the grid computed for `canvas_width`.
    ///
    /// Ids are honored in input order; unknown and already-pinned ids are
    /// skipped without disturbing anything. Returns how many notes were
    /// newly pinned.
    pub fn batch_pin(&mut self, ids: &[NoteId], canvas_width: f64) -> usize {
        let cols = layout::column_count(canvas_width);
        let mut pinned = 0;
        for id in ids {
            let Some(note) = self.notes.iter_mut().find(|note| note.id == *id) else {
                continue;
            };
            if note.is_pinned {
                continue;
            }
            note.position = layout::batch_slot(pinned, cols);
            note.is_pinned = true;
            self.max_z_index += 1;
            note.z_index = self.max_z_index;
            pinned += 1;
        }
        pinned
    }

    /// Scheduler command: turn a fired reminder off.
    pub fn dismiss_reminder(&mut self, id: NoteId) -> StoreResult<()> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(StoreError::NoteNotFound(id))?;
        note.is_reminder_on = false;
        Ok(())
    }

    /// Scheduler command: push a fired reminder to a later instant, keeping
    /// it armed.
    pub fn snooze_reminder(&mut self, id: NoteId, until_ms: i64) -> StoreResult<()> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(StoreError::NoteNotFound(id))?;
        note.reminder_time = Some(until_ms);
        note.is_reminder_on = true;
        Ok(())
    }

    /// Restores both collections from the persistence boundary.
    ///
    /// Malformed blobs degrade to defaults (see `persist`); a surviving
    /// empty group list is replaced by one default group, and the z-order
    /// counter resumes above the highest restored value.
    pub fn load(&mut self, storage: &dyn BlobStore) -> StoreResult<()> {
        let mut groups = match storage.load(persist::GROUPS_KEY)? {
            Some(raw) => persist::decode_groups(&raw),
            None => Vec::new(),
        };
        if groups.is_empty() {
            groups.push(Group::new(DEFAULT_GROUP_NAME));
        }

        let now = self.clock.now_ms();
        let notes = match storage.load(persist::NOTES_KEY)? {
            Some(raw) => persist::decode_notes(&raw, now, &groups),
            None => Vec::new(),
        };

        self.max_z_index = notes
            .iter()
            .map(|note| note.z_index)
            .fold(INITIAL_Z_INDEX, i64::max);
        info!(
            "event=store_load module=store status=ok groups={} notes={}",
            groups.len(),
            notes.len()
        );
        self.groups = groups;
        self.notes = notes;
        Ok(())
    }

    /// Persists both collections through the persistence boundary.
    pub fn save(&self, storage: &dyn BlobStore) -> StoreResult<()> {
        let notes = serde_json::to_string(&self.notes).map_err(StoreError::Encode)?;
        let groups = serde_json::to_string(&self.groups).map_err(StoreError::Encode)?;
        storage.save(persist::NOTES_KEY, &notes)?;
        storage.save(persist::GROUPS_KEY, &groups)?;
        Ok(())
    }

    fn next_z_index(&mut self) -> i64 {
        self.max_z_index += 1;
        self.max_z_index
    }

    fn require_group(&self, id: GroupId) -> StoreResult<()> {
        if self.groups.iter().any(|group| group.id == id) {
            Ok(())
        } else {
            warn!("event=store_mutation module=store status=rejected reason=group_not_found");
            Err(StoreError::GroupNotFound(id))
        }
    }
}
