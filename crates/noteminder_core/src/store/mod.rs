//! Store layer: the sole owner of mutable note/group state.
//!
//! # Responsibility
//! - Serialize all collection writes through [`NoteStore`].
//! - Keep persistence encoding (and its lenient recovery rules) behind the
//!   `persist` codec.
//!
//! # Invariants
//! - One group always exists.
//! - The z-order counter is owned here and nowhere else.

mod persist;

pub mod note_store;

pub use note_store::{NoteStore, StoreError, StoreResult, DEFAULT_GROUP_NAME};
pub use persist::{GROUPS_KEY, NOTES_KEY};
