//! Pin layout engine: deterministic canvas placement for pinned notes.
//!
//! # Responsibility
//! - Compute the target position for a single pin, anchored or centered.
//! - Compute non-overlapping grid slots for a batch pin, with a
//!   reproducible organic jitter.
//!
//! # Invariants
//! - Placement is a pure function of its inputs; repeated calls with the
//!   same arguments yield identical positions.
//! - The jitter is derived from the slot's row/column, never from a random
//!   source.

use crate::model::note::Position;

/// Horizontal offset from an anchor (or center) to the note's left edge,
/// half of the conventional 280px note footprint.
const ANCHOR_OFFSET_X: f64 = 140.0;
/// Vertical offset from an explicit anchor to the note's top edge.
const ANCHOR_OFFSET_Y: f64 = 20.0;
/// Vertical offset from the viewport center to the note's top edge.
const CENTER_OFFSET_Y: f64 = 100.0;

/// Grid geometry for batch pinning.
const GRID_ORIGIN_X: f64 = 50.0;
const GRID_ORIGIN_Y: f64 = 80.0;
const COLUMN_STRIDE: f64 = 300.0;
const ROW_STRIDE: f64 = 320.0;
const GRID_MARGIN: f64 = 100.0;
const WOBBLE_X_AMPLITUDE: f64 = 10.0;
const WOBBLE_Y_AMPLITUDE: f64 = 30.0;

/// Canvas dimensions supplied by the caller; the core has no dependency on
/// any windowing API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Number of grid columns available on a canvas of the given width.
pub fn column_count(canvas_width: f64) -> usize {
    let cols = ((canvas_width - GRID_MARGIN) / COLUMN_STRIDE).floor() as i64;
    cols.max(1) as usize
}

/// Target position for a single pin.
///
/// With an explicit anchor the note hangs just under the pointer; without
/// one it is centered in the viewport using the fixed note footprint.
pub fn single_pin_position(anchor: Option<Position>, viewport: Viewport) -> Position {
    match anchor {
        Some(at) => Position::new(at.x - ANCHOR_OFFSET_X, at.y - ANCHOR_OFFSET_Y),
        None => Position::new(
            viewport.width / 2.0 - ANCHOR_OFFSET_X,
            viewport.height / 2.0 - CENTER_OFFSET_Y,
        ),
    }
}

/// Grid slot for the `index`-th newly pinned note of a batch (0-indexed, in
/// input order), on a grid of `cols` columns.
///
/// The sin/cos jitter keeps the grid from looking machine-stamped while
/// staying fully reproducible.
pub fn batch_slot(index: usize, cols: usize) -> Position {
    let cols = cols.max(1);
    let col = index % cols;
    let row = index / cols;
    let x = GRID_ORIGIN_X + col as f64 * COLUMN_STRIDE + (row as f64).cos() * WOBBLE_X_AMPLITUDE;
    let y = GRID_ORIGIN_Y + row as f64 * ROW_STRIDE + (col as f64).sin() * WOBBLE_Y_AMPLITUDE;
    Position::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::{batch_slot, column_count, single_pin_position, Position, Viewport};

    #[test]
    fn column_count_floors_and_never_drops_below_one() {
        assert_eq!(column_count(1000.0), 3);
        assert_eq!(column_count(700.0), 2);
        assert_eq!(column_count(120.0), 1);
        assert_eq!(column_count(0.0), 1);
    }

    #[test]
    fn anchored_pin_hangs_under_the_pointer() {
        let viewport = Viewport::new(1920.0, 1080.0);
        let at = single_pin_position(Some(Position::new(500.0, 400.0)), viewport);
        assert_eq!(at, Position::new(360.0, 380.0));
    }

    #[test]
    fn centered_pin_uses_the_fixed_footprint() {
        let at = single_pin_position(None, Viewport::new(1920.0, 1080.0));
        assert_eq!(at, Position::new(820.0, 440.0));
    }

    #[test]
    fn batch_slots_walk_the_grid_row_major() {
        // First row has no vertical jitter at column 0 (sin 0 = 0) and no
        // horizontal jitter anywhere (cos 0 = 1 scaled by 10).
        let first = batch_slot(0, 2);
        assert_eq!(first, Position::new(60.0, 80.0));

        let second = batch_slot(1, 2);
        assert!((second.x - 360.0).abs() < 1e-9);
        assert!((second.y - (80.0 + 1.0_f64.sin() * 30.0)).abs() < 1e-9);

        let third = batch_slot(2, 2);
        assert!((third.x - (50.0 + 1.0_f64.cos() * 10.0)).abs() < 1e-9);
        assert!((third.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn batch_slots_are_reproducible() {
        for index in 0..12 {
            assert_eq!(batch_slot(index, 3), batch_slot(index, 3));
        }
    }
}
