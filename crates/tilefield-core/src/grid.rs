//! Per-cell heat state for the tile lattice.

use glam::Vec2;

/// CSS-pixel size of the drawing area plus its (clamped) device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr: dpr.clamp(MIN_DPR, MAX_DPR),
        }
    }
}

pub const MIN_DPR: f32 = 1.0;
pub const MAX_DPR: f32 = 2.0;

/// Three flat buffers (`heat`, `target`, `hold`) indexed `row * cols + col`.
///
/// All three always have length `cols * rows`; they are reallocated together
/// (zero-filled) whenever the lattice dimensions change.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cols: usize,
    rows: usize,
    pub heat: Vec<f32>,
    pub target: Vec<f32>,
    pub hold: Vec<f32>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lattice dimensions needed to cover `viewport` at `pitch` spacing.
    #[inline]
    pub fn dims_for(viewport: Viewport, pitch: f32) -> (usize, usize) {
        let pitch = pitch.max(1.0);
        let cols = (viewport.width / pitch).ceil() as usize + 1;
        let rows = (viewport.height / pitch).ceil() as usize + 1;
        (cols, rows)
    }

    /// Resize to cover `viewport`. Returns `true` when the buffers were
    /// reallocated, which discards all accumulated heat.
    pub fn ensure(&mut self, viewport: Viewport, pitch: f32) -> bool {
        let (cols, rows) = Self::dims_for(viewport, pitch);
        if cols == self.cols && rows == self.rows {
            return false;
        }
        log::debug!(
            "[grid] realloc {}x{} -> {}x{}",
            self.cols,
            self.rows,
            cols,
            rows
        );
        self.cols = cols;
        self.rows = rows;
        let n = cols * rows;
        self.heat = vec![0.0; n];
        self.target = vec![0.0; n];
        self.hold = vec![0.0; n];
        true
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Inclusive cell range whose tiles may intersect the square of half-size
    /// `reach` around `center`, clamped to the lattice. `None` when the square
    /// lies entirely outside it.
    pub fn cell_range(
        &self,
        center: Vec2,
        reach: f32,
        pitch: f32,
    ) -> Option<(std::ops::RangeInclusive<usize>, std::ops::RangeInclusive<usize>)> {
        if self.is_empty() {
            return None;
        }
        let axis = |c: f32, n: usize| {
            let lo = ((c - reach) / pitch).floor().max(0.0);
            let hi = ((c + reach) / pitch).ceil().min((n - 1) as f32);
            (lo <= hi).then(|| lo as usize..=hi as usize)
        };
        Some((axis(center.x, self.cols)?, axis(center.y, self.rows)?))
    }

    /// Center of the tile at (`col`, `row`) in CSS pixels.
    #[inline]
    pub fn cell_center(col: usize, row: usize, pitch: f32, tile_size: f32) -> Vec2 {
        Vec2::new(
            col as f32 * pitch + tile_size * 0.5,
            row as f32 * pitch + tile_size * 0.5,
        )
    }

    /// Zero every buffer without reallocating.
    pub fn clear(&mut self) {
        self.heat.fill(0.0);
        self.target.fill(0.0);
        self.hold.fill(0.0);
    }
}

#[inline]
pub(crate) fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}
