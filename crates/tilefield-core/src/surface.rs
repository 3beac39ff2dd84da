//! Drawing-surface seam between the simulation and a concrete canvas.

use glam::Vec2;

use crate::color::Color;
use crate::grid::{Grid, Viewport};
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub alpha: f32,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub from: Vec2,
    pub to: Vec2,
}

/// Everything the animation needs from a 2D drawing target, in CSS pixels.
///
/// Grid lines are drawn into a surface-owned cached layer only when the grid
/// geometry changes; every frame just blits that layer.
pub trait Surface {
    /// Fill the whole viewport with an opaque color.
    fn clear(&mut self, color: Color, viewport: Viewport);
    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f32);
    /// Redraw the cached grid-line layer from scratch. Returns `false` if the
    /// layer could not be built; the next frame will try again.
    fn rebuild_grid_layer(
        &mut self,
        viewport: Viewport,
        lines: &[GridLine],
        style: LineStyle,
    ) -> bool;
    /// Composite the cached grid-line layer over the current frame.
    fn blit_grid_layer(&mut self);
}

/// Everything that invalidates the cached grid-line layer.
#[derive(Clone, Copy, Debug, PartialEq)]
struct GridGeometry {
    cols: usize,
    rows: usize,
    pitch: f32,
    viewport: Viewport,
}

/// Tracks when the surface's grid-line layer must be redrawn.
#[derive(Clone, Debug, Default)]
pub struct GridLineCache {
    geometry: Option<GridGeometry>,
}

impl GridLineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the layer if the geometry changed, then blit it. Returns `true`
    /// when a rebuild succeeded. A failed rebuild leaves the geometry
    /// unrecorded so it is retried on the next draw.
    pub fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        grid: &Grid,
        viewport: Viewport,
        settings: &Settings,
    ) -> bool {
        let geometry = GridGeometry {
            cols: grid.cols(),
            rows: grid.rows(),
            pitch: settings.pitch(),
            viewport,
        };
        let mut rebuilt = false;
        if self.geometry != Some(geometry) {
            let lines = grid_lines(grid.cols(), grid.rows(), geometry.pitch, viewport);
            let style = LineStyle {
                color: settings.grid_line_color,
                alpha: settings.grid_line_alpha,
                width: settings.grid_line_width,
            };
            rebuilt = surface.rebuild_grid_layer(viewport, &lines, style);
            self.geometry = rebuilt.then_some(geometry);
        }
        surface.blit_grid_layer();
        rebuilt
    }

    /// Force a rebuild on the next draw (e.g. after the surface lost its layer).
    pub fn invalidate(&mut self) {
        self.geometry = None;
    }
}

/// Vertical lines at `k * pitch + 0.5` for `k in 0..=cols`, then horizontal
/// lines for `k in 0..=rows`, each spanning the full viewport.
pub fn grid_lines(cols: usize, rows: usize, pitch: f32, viewport: Viewport) -> Vec<GridLine> {
    let mut lines = Vec::with_capacity(cols + rows + 2);
    for x in 0..=cols {
        let px = x as f32 * pitch + 0.5;
        lines.push(GridLine {
            from: Vec2::new(px, 0.0),
            to: Vec2::new(px, viewport.height),
        });
    }
    for y in 0..=rows {
        let py = y as f32 * pitch + 0.5;
        lines.push(GridLine {
            from: Vec2::new(0.0, py),
            to: Vec2::new(viewport.width, py),
        });
    }
    lines
}
