use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use common::{FrameScheduler, FrameToken};
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::js_err;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// The one `requestAnimationFrame` callback plus the frame it is queued for.
/// Shared between the scheduler and whoever installs the callback.
#[derive(Clone, Default)]
pub struct FrameSlot {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<(FrameToken, i32)>>>,
}

impl FrameSlot {
    pub fn install(&self, mut on_frame: impl FnMut(FrameToken, f64) + 'static) {
        let pending = self.pending.clone();
        let closure = Closure::wrap(Box::new(move |time: f64| {
            if let Some((token, _)) = pending.take() {
                on_frame(token, time);
            }
        }) as Box<dyn FnMut(f64)>);

        *self.callback.borrow_mut() = Some(closure);
    }
}

pub struct RafScheduler {
    window: Window,
    slot: FrameSlot,
}

impl RafScheduler {
    pub fn new(window: Window, slot: FrameSlot) -> Self {
        Self { window, slot }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self, token: FrameToken) -> Result<()> {
        let callback = self.slot.callback.borrow();
        let callback = callback.as_ref().context("Frame callback not installed")?;

        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(js_err)
            .context("requestAnimationFrame failed")?;
        self.slot.pending.set(Some((token, id)));
        Ok(())
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let Some((pending, id)) = self.slot.pending.get() else {
            return;
        };
        if pending != token {
            return;
        }

        self.slot.pending.set(None);
        if let Err(e) = self.window.cancel_animation_frame(id) {
            warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}
