//! Scheduling and layout core for NoteMinder.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod layout;
pub mod logging;
pub mod model;
pub mod report;
pub mod sched;
pub mod storage;
pub mod store;
pub mod timeutil;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use layout::{batch_slot, column_count, single_pin_position, Viewport};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::group::{Group, GroupId};
pub use model::note::{Note, NoteId, NoteImportance, NoteStatus, Position};
pub use report::{weekly_report, ReportLine, WorkHourReport, WorkWindow, NO_EVENTS_PLACEHOLDER};
pub use sched::{
    find_due_note, ActiveAlert, LogNotifier, Notifier, ReminderScheduler, DUE_WINDOW_MS,
    POLL_PERIOD_MS,
};
pub use storage::{BlobStore, MemoryBlobStore, SqliteBlobStore, StorageError, StorageResult};
pub use store::{NoteStore, StoreError, StoreResult, DEFAULT_GROUP_NAME, GROUPS_KEY, NOTES_KEY};
pub use timeutil::{day_bounds, week_bounds, TimeRange};
pub use view::{group_view, pinned, pinned_today, toggle_sort, SortConfig, SortDirection, SortKey};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
