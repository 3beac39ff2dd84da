use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::anyhow;
use glam::Vec2;
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::render::CanvasSurface;
use crate::tick::TickSlot;
use tilefield_core::{BackgroundAnimation, CancelToken};

/// Everything the animation-frame callback and the input handlers share.
pub struct FrameContext {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub surface: CanvasSurface,
    pub anim: BackgroundAnimation,
    pub token: CancelToken,
    pub origin: Instant,
    pub frames: u64,
}

impl FrameContext {
    /// Milliseconds since the session started; shared by frames and input.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    pub fn frame(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        let now = self.now_ms();
        let stats = self.anim.frame(now, &mut self.surface);
        self.frames += 1;
        if stats.resized {
            let g = self.anim.grid();
            log::debug!("[frame] grid now {}x{}", g.cols(), g.rows());
        }
        if self.frames % 600 == 0 {
            log::debug!(
                "[frame] #{} dt={:.2}ms lit={} ripples={}",
                self.frames,
                stats.dt_ms,
                stats.lit_cells,
                stats.active_ripples
            );
        }
    }

    pub fn resize(&mut self) {
        let viewport = dom::current_viewport(&self.window);
        dom::sync_canvas(&self.canvas, self.surface.context(), viewport);
        self.surface.reset_state();
        self.anim.set_viewport(viewport);
    }

    pub fn pointer_move(&mut self, client: Vec2) {
        self.anim.pointer_move(client);
    }

    pub fn pointer_down(&mut self, client: Vec2) {
        let now = self.now_ms();
        self.anim.pointer_down(client, now);
    }
}

type Tick = TickSlot<Closure<dyn FnMut()>>;

/// Self-rescheduling `requestAnimationFrame` loop.
pub struct FrameLoop {
    window: web::Window,
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Cancel the pending frame and release the callback. Idempotent.
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            _ = self.window.cancel_animation_frame(id);
        }
        self.tick.release();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> anyhow::Result<FrameLoop> {
    let (window, token) = {
        let ctx = frame_ctx.borrow();
        (ctx.window.clone(), ctx.token.clone())
    };
    let tick: Tick = TickSlot::new();
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_inner = tick.clone();
    let pending_inner = pending.clone();
    let window_inner = window.clone();
    tick.install(Closure::wrap(Box::new(move || {
        pending_inner.set(None);
        if token.is_cancelled() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        let requested =
            tick_inner.with(|cb| window_inner.request_animation_frame(cb.as_ref().unchecked_ref()));
        match requested {
            Some(Ok(id)) => pending_inner.set(Some(id)),
            Some(Err(e)) => log::error!("requestAnimationFrame failed: {:?}", e),
            None => {}
        }
    }) as Box<dyn FnMut()>));

    let id = tick.arm(
        |cb| {
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("requestAnimationFrame unavailable: {:?}", e))
        },
        || anyhow!("frame callback missing"),
    )?;
    pending.set(Some(id));

    Ok(FrameLoop {
        window,
        tick,
        pending,
    })
}
