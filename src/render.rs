use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::layout;
use tilefield_core::{Color, GridLine, LineStyle, Rect, Surface, Viewport};

/// Offscreen canvas holding the pre-stroked grid lines.
struct GridLayer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    viewport: Viewport,
}

/// [`Surface`] backed by a `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    document: web::Document,
    ctx: web::CanvasRenderingContext2d,
    grid_layer: Option<GridLayer>,
    // fill color currently set on `ctx`
    fill: Option<Color>,
}

impl CanvasSurface {
    pub fn new(document: web::Document, ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            document,
            ctx,
            grid_layer: None,
            fill: None,
        }
    }

    pub fn context(&self) -> &web::CanvasRenderingContext2d {
        &self.ctx
    }

    /// Forget cached context state; resizing a canvas resets it.
    pub fn reset_state(&mut self) {
        self.fill = None;
    }

    #[inline]
    fn set_fill(&mut self, color: Color) {
        if self.fill != Some(color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.fill = Some(color);
        }
    }

    fn ensure_layer(&mut self) -> anyhow::Result<&mut GridLayer> {
        if self.grid_layer.is_none() {
            let canvas = self
                .document
                .create_element("canvas")
                .map_err(|e| anyhow!("{:?}", e))?
                .dyn_into::<web::HtmlCanvasElement>()
                .map_err(|_| anyhow!("created element is not a canvas"))?;
            let ctx = canvas
                .get_context("2d")
                .map_err(|e| anyhow!("{:?}", e))?
                .ok_or_else(|| anyhow!("offscreen 2d context unavailable"))?
                .dyn_into::<web::CanvasRenderingContext2d>()
                .map_err(|e| anyhow!("{:?}", e))?;
            self.grid_layer = Some(GridLayer {
                canvas,
                ctx,
                viewport: Viewport::new(0.0, 0.0, 1.0),
            });
        }
        self.grid_layer
            .as_mut()
            .ok_or_else(|| anyhow!("grid layer missing"))
    }

    fn paint_layer(
        &mut self,
        viewport: Viewport,
        lines: &[GridLine],
        style: LineStyle,
    ) -> anyhow::Result<()> {
        let layer = self.ensure_layer()?;
        let (w_px, h_px) = layout::backing_size(viewport);
        // resizing clears the bitmap and resets the transform
        layer.canvas.set_width(w_px);
        layer.canvas.set_height(h_px);
        layer.viewport = viewport;

        let ctx = &layer.ctx;
        let dpr = viewport.dpr as f64;
        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|e| anyhow!("{:?}", e))?;
        ctx.clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
        ctx.set_global_alpha(style.alpha as f64);
        ctx.set_stroke_style_str(&style.color.to_css());
        ctx.set_line_width(style.width as f64);
        for line in lines {
            ctx.begin_path();
            ctx.move_to(line.from.x as f64, line.from.y as f64);
            ctx.line_to(line.to.x as f64, line.to.y as f64);
            ctx.stroke();
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: Color, viewport: Viewport) {
        _ = self.ctx.set_global_composite_operation("source-over");
        self.ctx.set_global_alpha(1.0);
        self.set_fill(color);
        self.ctx
            .fill_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.set_fill(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn rebuild_grid_layer(
        &mut self,
        viewport: Viewport,
        lines: &[GridLine],
        style: LineStyle,
    ) -> bool {
        match self.paint_layer(viewport, lines, style) {
            Ok(()) => true,
            Err(e) => {
                log::error!("grid layer rebuild failed: {:?}", e);
                self.grid_layer = None;
                false
            }
        }
    }

    fn blit_grid_layer(&mut self) {
        let Some(layer) = &self.grid_layer else {
            return;
        };
        self.ctx.set_global_alpha(1.0);
        let vp = layer.viewport;
        if let Err(e) = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            &layer.canvas,
            0.0,
            0.0,
            vp.width as f64,
            vp.height as f64,
        ) {
            log::error!("grid layer blit failed: {:?}", e);
        }
    }
}
