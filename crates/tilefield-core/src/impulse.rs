//! Pointer-move heat injection.

use std::f32::consts::TAU;

use crate::grid::{clamp01, Grid};
use crate::hash::{cell_hash, SALT_BASE, SALT_HOLD, SALT_PHASE};
use crate::pointer::PointerLatch;
use crate::settings::Settings;

/// Raise `target` (and reset `hold`) around the pointer if it moved since the
/// previous call. Returns the number of cells touched.
///
/// Impulses only ever raise a cell's target; they never lower it.
pub fn deposit(
    grid: &mut Grid,
    latch: &mut PointerLatch,
    settings: &Settings,
    now_ms: f64,
) -> usize {
    let Some(pointer) = latch.take_move() else {
        return 0;
    };

    let pitch = settings.pitch();
    let r = settings.radius.max(1.0);
    let r2 = r * r;
    let Some((cols, rows)) = grid.cell_range(pointer, r, pitch) else {
        return 0;
    };

    let now_s = (now_ms / 1000.0) as f32;
    let mut touched = 0;
    for row in rows {
        for col in cols.clone() {
            let center = Grid::cell_center(col, row, pitch, settings.tile_size);
            let d2 = pointer.distance_squared(center);
            if d2 > r2 {
                continue;
            }
            let t = 1.0 - d2.sqrt() / r;
            let eased = t * t;

            let idx = grid.index(col, row);
            let base = cell_hash(idx, SALT_BASE) * 2.0 - 1.0;
            let wobble = (now_s * 2.0 + cell_hash(idx, SALT_PHASE) * TAU).sin();
            let v = 1.0 + settings.variation * (0.6 * base + 0.4 * wobble);
            let amount = clamp01(eased * v);

            grid.target[idx] = grid.target[idx].max(amount);
            grid.hold[idx] = settings.hold_ms.max(0.0) * (0.85 + 0.3 * cell_hash(idx, SALT_HOLD));
            touched += 1;
        }
    }
    touched
}
