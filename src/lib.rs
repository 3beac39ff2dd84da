#![cfg(target_arch = "wasm32")]
//! Browser front-end: paints the tilefield animation on a full-window canvas.
//!
//! ```js
//! import init, { mount } from "./pkg/tilefield_web.js";
//! await init();
//! const handle = mount("bg-canvas", JSON.stringify({ preset: "header-dark" }));
//! // later, when the view goes away:
//! handle.dispose();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::prelude::*;

use tilefield_core::{BackgroundAnimation, CancelToken};

mod dom;
mod events;
mod frame;
mod layout;
mod render;
mod tick;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tilefield-web loaded");
    Ok(())
}

struct Session {
    token: CancelToken,
    frame_loop: frame::FrameLoop,
    listeners: events::Listeners,
}

/// Owning handle for one running animation. Disposing (or dropping) it stops
/// frame scheduling and removes every listener in one step.
#[wasm_bindgen]
pub struct AnimationHandle {
    session: Option<Session>,
}

#[wasm_bindgen]
impl AnimationHandle {
    pub fn dispose(&mut self) {
        if let Some(mut s) = self.session.take() {
            s.token.cancel();
            s.frame_loop.stop();
            s.listeners.release();
            log::info!("[mount] animation disposed");
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.token.is_cancelled())
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Start the animation on `<canvas id=canvas_id>`.
///
/// `options_json` holds camelCase overrides (optionally with a `preset`). Any
/// missing precondition (window, canvas, 2D context, animation frames) fails
/// the call without leaving listeners or frames behind.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, options_json: Option<String>) -> Result<AnimationHandle, JsValue> {
    mount_inner(canvas_id, options_json.as_deref().unwrap_or("")).map_err(|e| {
        log::error!("mount error: {:?}", e);
        JsValue::from_str(&format!("{:#}", e))
    })
}

fn mount_inner(canvas_id: &str, options_json: &str) -> anyhow::Result<AnimationHandle> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let ctx = dom::opaque_context_2d(&canvas)?;

    let viewport = dom::current_viewport(&window);
    let anim = BackgroundAnimation::from_json(options_json, viewport)?;
    dom::sync_canvas(&canvas, &ctx, viewport);

    let token = CancelToken::new();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        window: window.clone(),
        canvas,
        surface: render::CanvasSurface::new(document, ctx),
        anim,
        token: token.clone(),
        origin: Instant::now(),
        frames: 0,
    }));

    let listeners = events::wire_window_listeners(&window, &frame_ctx)?;
    let frame_loop = frame::start_loop(frame_ctx.clone())?;

    {
        let c = frame_ctx.borrow();
        let g = c.anim.grid();
        log::info!(
            "[mount] #{} {}x{} css px @{}x, grid {}x{}, {} listeners",
            canvas_id,
            viewport.width,
            viewport.height,
            viewport.dpr,
            g.cols(),
            g.rows(),
            listeners.len()
        );
    }

    Ok(AnimationHandle {
        session: Some(Session {
            token,
            frame_loop,
            listeners,
        }),
    })
}
