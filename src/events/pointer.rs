use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use web_sys as web;

use super::{Listener, Listeners};
use crate::frame::FrameContext;

#[inline]
fn client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Register `resize`, `pointermove` and `pointerdown` on the window.
///
/// Either all three are registered or none are: on failure the listeners
/// acquired so far are dropped (and thereby removed) before returning.
pub fn wire_window_listeners(
    window: &web::Window,
    frame_ctx: &Rc<RefCell<FrameContext>>,
) -> anyhow::Result<Listeners> {
    let target: &web::EventTarget = window.as_ref();
    let mut listeners = Listeners::default();

    let ctx = frame_ctx.clone();
    listeners.push(Listener::passive(target, "resize", move |_: web::Event| {
        let mut c = ctx.borrow_mut();
        if !c.token.is_cancelled() {
            c.resize();
        }
    })?);

    let ctx = frame_ctx.clone();
    listeners.push(Listener::passive(
        target,
        "pointermove",
        move |ev: web::PointerEvent| {
            ctx.borrow_mut().pointer_move(client_pos(&ev));
        },
    )?);

    let ctx = frame_ctx.clone();
    listeners.push(Listener::passive(
        target,
        "pointerdown",
        move |ev: web::PointerEvent| {
            ctx.borrow_mut().pointer_down(client_pos(&ev));
        },
    )?);

    Ok(listeners)
}
