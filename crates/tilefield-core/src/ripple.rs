//! Click/tap ripples: rings that expand in discrete tile steps and write heat
//! directly where they cross a cell.

use std::f32::consts::TAU;

use glam::Vec2;
use smallvec::SmallVec;

use crate::grid::{clamp01, Grid};
use crate::hash::{cell_hash, SALT_BASE, SALT_HOT, SALT_PHASE};
use crate::settings::Settings;

/// Maximum number of concurrently active ripples; older ones are evicted.
pub const MAX_RIPPLES: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub origin: Vec2,
    pub start_ms: f64,
}

impl Ripple {
    #[inline]
    pub fn age_ms(&self, now_ms: f64) -> f32 {
        (now_ms - self.start_ms) as f32
    }
}

/// Ripple parameters after the divisor clamps have been applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleShape {
    pub pitch: f32,
    pub step_px: f32,
    pub core_amp: f32,
    pub shoulder_amp: f32,
    pub core_half: f32,
    pub shoulder_half: f32,
    pub fade_distance: f32,
    pub fade_steps: f32,
    pub speed: f32,
    pub duration_ms: f32,
    pub variation: f32,
    pub hot_chance: f32,
    pub hot_boost: f32,
    pub wobble_speed: f32,
    pub hold_ms: f32,
}

impl RippleShape {
    pub fn from_settings(s: &Settings) -> Self {
        let pitch = s.pitch();
        let r = &s.ripple;
        let core_half = (r.core_width / 2.0).max(1.0);
        Self {
            pitch,
            step_px: pitch * r.step_tiles.max(1.0),
            core_amp: r.core,
            shoulder_amp: r.shoulder,
            core_half,
            shoulder_half: (r.shoulder_width / 2.0).max(core_half + 1.0),
            fade_distance: r.fade_distance.max(1.0),
            fade_steps: r.fade_steps.max(1.0),
            speed: r.speed,
            duration_ms: r.duration_ms,
            variation: clamp01(r.variation),
            hot_chance: clamp01(r.hot_chance),
            hot_boost: r.hot_boost.max(1.0),
            wobble_speed: r.wobble_speed,
            hold_ms: s.hold_ms.max(0.0) * 0.25,
        }
    }

    /// Stepped ring radius at `age_ms`.
    #[inline]
    pub fn ring_radius(&self, age_ms: f32) -> f32 {
        quantize(age_ms / 1000.0 * self.speed, self.step_px)
    }

    /// Banded radial fade at quantized distance `dist`.
    #[inline]
    pub fn radial_fade(&self, dist: f32) -> f32 {
        let fade = clamp01(1.0 - dist / self.fade_distance);
        (fade * self.fade_steps).ceil() / self.fade_steps
    }
}

/// Snap `v` to the nearest multiple of `q`.
#[inline]
pub fn quantize(v: f32, q: f32) -> f32 {
    (v / q).round() * q
}

/// Active ripples, oldest first.
#[derive(Clone, Debug, Default)]
pub struct RippleSet {
    active: SmallVec<[Ripple; MAX_RIPPLES + 1]>,
}

impl RippleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a ripple at `origin`, evicting the oldest past [`MAX_RIPPLES`].
    pub fn spawn(&mut self, origin: Vec2, now_ms: f64) {
        self.active.push(Ripple {
            origin,
            start_ms: now_ms,
        });
        while self.active.len() > MAX_RIPPLES {
            let evicted = self.active.remove(0);
            log::debug!("[ripple] evicted ripple started at {:.1}ms", evicted.start_ms);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ripple> {
        self.active.iter()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Age every ripple, drop the expired ones and stamp the rest onto `grid`.
    ///
    /// Ripples bypass the target/rise path: they raise `heat` immediately and
    /// extend `hold` to a quarter of the configured hold time. Overlapping
    /// writes compose by max, so values stay in \[0, 1\].
    pub fn apply(&mut self, grid: &mut Grid, shape: &RippleShape, tile_size: f32, now_ms: f64) {
        if self.active.is_empty() {
            return;
        }
        let now_s = (now_ms / 1000.0) as f32;
        for i in (0..self.active.len()).rev() {
            let ripple = self.active[i];
            let age = ripple.age_ms(now_ms);
            if age > shape.duration_ms {
                self.active.remove(i);
                continue;
            }
            stamp_ring(grid, shape, tile_size, ripple.origin, age, now_s);
        }
    }
}

fn stamp_ring(
    grid: &mut Grid,
    shape: &RippleShape,
    tile_size: f32,
    origin: Vec2,
    age: f32,
    now_s: f32,
) {
    let pitch = shape.pitch;
    let ring_r = shape.ring_radius(age);
    let outer = ring_r + shape.shoulder_half + shape.step_px;
    let Some((cols, rows)) = grid.cell_range(origin, outer, pitch) else {
        return;
    };

    let life = 1.0 - age / shape.duration_ms.max(1.0);

    for row in rows {
        for col in cols.clone() {
            let center = Grid::cell_center(col, row, pitch, tile_size);
            let dist = quantize(center.distance(origin), pitch);
            let dr = (dist - ring_r).abs();
            if dr > shape.shoulder_half {
                continue;
            }
            let amp = if dr <= shape.core_half {
                shape.core_amp
            } else {
                shape.shoulder_amp
            };
            let fade = shape.radial_fade(dist);

            let idx = grid.index(col, row);
            let base = cell_hash(idx, SALT_BASE) * 2.0 - 1.0;
            let wobble = (now_s * shape.wobble_speed + cell_hash(idx, SALT_PHASE) * TAU).sin();
            let v = 1.0 + shape.variation * (0.6 * base + 0.4 * wobble);
            let hot = if cell_hash(idx, SALT_HOT) < shape.hot_chance {
                shape.hot_boost
            } else {
                1.0
            };

            let amount = clamp01(amp * fade * life * v * hot);
            grid.heat[idx] = grid.heat[idx].max(amount);
            grid.hold[idx] = grid.hold[idx].max(shape.hold_ms);
        }
    }
}
