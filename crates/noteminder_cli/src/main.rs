//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `noteminder_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use noteminder_core::{NoteStore, SystemClock};
use std::sync::Arc;

fn main() {
    let store = NoteStore::new(Arc::new(SystemClock));
    println!("noteminder_core version={}", noteminder_core::core_version());
    println!(
        "noteminder_core groups={} notes={}",
        store.groups().len(),
        store.notes().len()
    );
}
