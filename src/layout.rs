// Viewport and backing-store math for the full-window canvas. Pure so it can
// be exercised by host-side tests.

use tilefield_core::Viewport;

/// Build the simulation viewport from `innerWidth`/`innerHeight` and a raw
/// `devicePixelRatio` (which may be 0 or NaN on odd hosts).
#[inline]
pub fn viewport_from_window(inner_width: f64, inner_height: f64, raw_dpr: f64) -> Viewport {
    let dpr = if raw_dpr.is_finite() && raw_dpr > 0.0 {
        raw_dpr as f32
    } else {
        1.0
    };
    Viewport::new(inner_width as f32, inner_height as f32, dpr)
}

/// Canvas backing-store size in device pixels: `floor(css * dpr)`, at least 1.
#[inline]
pub fn backing_size(viewport: Viewport) -> (u32, u32) {
    let w = (viewport.width * viewport.dpr).floor() as u32;
    let h = (viewport.height * viewport.dpr).floor() as u32;
    (w.max(1), h.max(1))
}

/// CSS length string for inline `style.width/height`.
#[inline]
pub fn css_px(v: f32) -> String {
    format!("{}px", v)
}
