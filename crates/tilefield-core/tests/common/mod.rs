#![allow(dead_code)]

use tilefield_core::{Color, GridLine, LineStyle, Rect, Surface, Viewport};

/// Surface double that records what the engine asked it to draw.
#[derive(Default)]
pub struct RecordingSurface {
    pub clears: Vec<Color>,
    pub rects: Vec<(Rect, Color, f32)>,
    pub layer_rebuilds: Vec<(Viewport, usize, LineStyle)>,
    pub blits: usize,
    /// Remaining layer rebuilds that should report failure.
    pub failing_rebuilds: usize,
}

impl RecordingSurface {
    pub fn take_rects(&mut self) -> Vec<(Rect, Color, f32)> {
        std::mem::take(&mut self.rects)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color, _viewport: Viewport) {
        self.clears.push(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f32) {
        self.rects.push((rect, color, alpha));
    }

    fn rebuild_grid_layer(
        &mut self,
        viewport: Viewport,
        lines: &[GridLine],
        style: LineStyle,
    ) -> bool {
        if self.failing_rebuilds > 0 {
            self.failing_rebuilds -= 1;
            return false;
        }
        self.layer_rebuilds.push((viewport, lines.len(), style));
        true
    }

    fn blit_grid_layer(&mut self) {
        self.blits += 1;
    }
}

/// Viewport that yields a `cols` x `rows` lattice at `pitch`.
pub fn viewport_for(cols: usize, rows: usize, pitch: f32) -> Viewport {
    Viewport::new((cols - 1) as f32 * pitch, (rows - 1) as f32 * pitch, 1.0)
}
