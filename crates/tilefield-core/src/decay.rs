//! Per-cell rise / hold / fade integration.

use crate::grid::{clamp01, Grid};

/// Heat below this snaps to exactly zero so decay terminates.
pub const HEAT_EPSILON: f32 = 0.001;
/// Heat within this distance of its target counts as having arrived.
pub const ARRIVAL_TOLERANCE: f32 = 0.01;
/// Frame interval assumed for the very first frame.
pub const FIRST_FRAME_DT_MS: f32 = 16.67;

/// Implicit state of a cell, derived from its three scalars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellPhase {
    Rising,
    Holding,
    Decaying,
    Idle,
}

impl CellPhase {
    pub fn of(heat: f32, target: f32, hold: f32) -> Self {
        if target > heat {
            CellPhase::Rising
        } else if hold > 0.0 {
            CellPhase::Holding
        } else if heat > 0.0 {
            CellPhase::Decaying
        } else {
            CellPhase::Idle
        }
    }
}

/// Per-frame rates, clamped to \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayRates {
    pub dt_ms: f32,
    pub rise: f32,
    pub fade: f32,
}

impl DecayRates {
    pub fn new(dt_ms: f32, rise_ms: f32, fade_ms: f32) -> Self {
        let dt_ms = dt_ms.max(0.0);
        Self {
            dt_ms,
            rise: clamp01(dt_ms / rise_ms.max(1.0)),
            fade: clamp01(dt_ms / fade_ms.max(1.0)),
        }
    }
}

/// Advance one cell by one frame.
#[inline]
pub fn step_cell(heat: &mut f32, target: &mut f32, hold: &mut f32, rates: DecayRates) {
    let tgt = *target;
    if tgt > *heat {
        *heat += (tgt - *heat) * rates.rise;
    } else if *hold > 0.0 {
        *hold = (*hold - rates.dt_ms).max(0.0);
    } else {
        *heat = (*heat - *heat * rates.fade).max(0.0);
        if *heat < HEAT_EPSILON {
            *heat = 0.0;
        }
    }
    if *heat >= tgt - ARRIVAL_TOLERANCE {
        *target = 0.0;
    }
}

/// Advance every cell of `grid` by one frame, without painting.
pub fn step_grid(grid: &mut Grid, rates: DecayRates) {
    let Grid {
        heat, target, hold, ..
    } = grid;
    for ((h, t), hd) in heat.iter_mut().zip(target.iter_mut()).zip(hold.iter_mut()) {
        step_cell(h, t, hd, rates);
    }
}
