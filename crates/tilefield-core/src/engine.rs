//! The per-frame pipeline tying grid, impulses, ripples and decay together.
//!
//! A frame runs, in order: resize check, clear, grid-line blit, impulse
//! deposition, ripple stamping, then one combined decay/paint sweep over all
//! cells. Input handlers only touch the pointer latch and the ripple list, so
//! everything they record is visible in the next frame's output.

use glam::Vec2;

use crate::decay::{self, DecayRates, FIRST_FRAME_DT_MS};
use crate::error::EngineError;
use crate::grid::{clamp01, Grid, Viewport};
use crate::impulse;
use crate::pointer::PointerLatch;
use crate::ripple::{RippleSet, RippleShape};
use crate::settings::Settings;
use crate::surface::{GridLineCache, Rect, Surface};

/// What happened during one frame; handy for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub dt_ms: f32,
    pub resized: bool,
    pub grid_layer_rebuilt: bool,
    pub impulse_cells: usize,
    pub active_ripples: usize,
    pub lit_cells: usize,
}

pub struct BackgroundAnimation {
    settings: Settings,
    shape: RippleShape,
    viewport: Viewport,
    grid: Grid,
    pointer: PointerLatch,
    ripples: RippleSet,
    grid_lines: GridLineCache,
    last_frame_ms: Option<f64>,
}

impl BackgroundAnimation {
    /// Resolve settings from a JSON overrides document and size the grid for
    /// `viewport`.
    pub fn from_json(json: &str, viewport: Viewport) -> Result<Self, EngineError> {
        let settings = Settings::from_json(json)?;
        Self::try_new(settings, viewport)
    }

    /// Like [`BackgroundAnimation::new`], but rejects a viewport the grid
    /// cannot be sized for.
    pub fn try_new(settings: Settings, viewport: Viewport) -> Result<Self, EngineError> {
        if !viewport.width.is_finite() || !viewport.height.is_finite() {
            return Err(EngineError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self::new(settings, viewport))
    }

    /// `viewport` must be finite; see [`BackgroundAnimation::try_new`].
    pub fn new(settings: Settings, viewport: Viewport) -> Self {
        let shape = RippleShape::from_settings(&settings);
        let mut grid = Grid::new();
        grid.ensure(viewport, settings.pitch());
        Self {
            settings,
            shape,
            viewport,
            grid,
            pointer: PointerLatch::default(),
            ripples: RippleSet::new(),
            grid_lines: GridLineCache::new(),
            last_frame_ms: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn ripples(&self) -> &RippleSet {
        &self.ripples
    }

    pub fn pointer(&self) -> PointerLatch {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Record a new viewport and resize the grid if needed. Returns `true`
    /// when the grid was reallocated.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        self.grid.ensure(viewport, self.settings.pitch())
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer.record_move(pos);
    }

    pub fn pointer_down(&mut self, pos: Vec2, now_ms: f64) {
        self.ripples.spawn(pos, now_ms);
    }

    /// Frame interval since the previous call (first frame: ~16.67ms).
    fn advance_clock(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) as f32).max(0.0),
            None => FIRST_FRAME_DT_MS,
        };
        self.last_frame_ms = Some(now_ms);
        dt
    }

    /// Run the simulation half of a frame without drawing anything.
    pub fn step(&mut self, now_ms: f64) -> FrameStats {
        let dt_ms = self.advance_clock(now_ms);
        let resized = self.grid.ensure(self.viewport, self.settings.pitch());
        let impulse_cells = self.inject(now_ms);
        let rates = DecayRates::new(dt_ms, self.settings.rise_ms, self.settings.fade_ms);
        decay::step_grid(&mut self.grid, rates);
        FrameStats {
            dt_ms,
            resized,
            grid_layer_rebuilt: false,
            impulse_cells,
            active_ripples: self.ripples.len(),
            lit_cells: self.grid.heat.iter().filter(|h| **h > 0.0).count(),
        }
    }

    /// Run one full frame onto `surface`.
    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> FrameStats {
        let dt_ms = self.advance_clock(now_ms);
        let resized = self.grid.ensure(self.viewport, self.settings.pitch());

        surface.clear(self.settings.bg_color, self.viewport);
        let grid_layer_rebuilt =
            self.grid_lines
                .draw(surface, &self.grid, self.viewport, &self.settings);

        let impulse_cells = self.inject(now_ms);

        let s = &self.settings;
        let rates = DecayRates::new(dt_ms, s.rise_ms, s.fade_ms);
        let pitch = s.pitch();
        let cols = self.grid.cols();
        let Grid {
            heat, target, hold, ..
        } = &mut self.grid;

        let mut lit_cells = 0;
        for (idx, ((h, t), hd)) in heat
            .iter_mut()
            .zip(target.iter_mut())
            .zip(hold.iter_mut())
            .enumerate()
        {
            let rect = Rect {
                x: (idx % cols) as f32 * pitch,
                y: (idx / cols) as f32 * pitch,
                w: s.tile_size,
                h: s.tile_size,
            };
            surface.fill_rect(rect, s.tile_color, s.tile_alpha);

            decay::step_cell(h, t, hd, rates);

            if *h > 0.0 {
                surface.fill_rect(rect, s.illuminate_color, clamp01(*h) * s.illuminate_max_alpha);
                lit_cells += 1;
            }
        }

        FrameStats {
            dt_ms,
            resized,
            grid_layer_rebuilt,
            impulse_cells,
            active_ripples: self.ripples.len(),
            lit_cells,
        }
    }

    /// Clear all heat, pending input and ripples; keeps settings and viewport.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.ripples.clear();
        self.pointer = PointerLatch::default();
        self.grid_lines.invalidate();
        self.last_frame_ms = None;
    }

    fn inject(&mut self, now_ms: f64) -> usize {
        let touched = impulse::deposit(&mut self.grid, &mut self.pointer, &self.settings, now_ms);
        self.ripples
            .apply(&mut self.grid, &self.shape, self.settings.tile_size, now_ms);
        touched
    }
}
