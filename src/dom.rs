use anyhow::{anyhow, Context};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::layout;
use tilefield_core::Viewport;

#[inline]
pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow!("no window"))
}

#[inline]
pub fn document(window: &web::Window) -> anyhow::Result<web::Document> {
    window.document().ok_or_else(|| anyhow!("no document"))
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{} is not a <canvas>", id))
}

/// Opaque 2D context: the animation always paints its own background, so the
/// compositor never has to blend the canvas with the page.
pub fn opaque_context_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    let opts = js_sys::Object::new();
    js_sys::Reflect::set(&opts, &JsValue::from_str("alpha"), &JsValue::FALSE)
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas
        .get_context_with_context_options("2d", &opts)
        .map_err(|e| anyhow!("{:?}", e))?
        .context("2d context unavailable")?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("{:?}", e))
}

pub fn current_viewport(window: &web::Window) -> Viewport {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    layout::viewport_from_window(w, h, window.device_pixel_ratio())
}

/// Match the canvas backing store to `viewport` and reset the transform so
/// drawing happens in CSS pixels.
pub fn sync_canvas(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
    viewport: Viewport,
) {
    let (w_px, h_px) = layout::backing_size(viewport);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &layout::css_px(viewport.width));
    _ = style.set_property("height", &layout::css_px(viewport.height));
    let dpr = viewport.dpr as f64;
    if let Err(e) = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
        log::error!("set_transform failed: {:?}", e);
    }
}
