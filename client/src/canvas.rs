use anyhow::{anyhow, Context, Result};
use common::Surface;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::js_err;

/// `Surface` backed by a canvas 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)
            .context("Failed to get 2d context")?
            .context("2d context is null")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("Failed to cast to 2d context"))?;

        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(x, y, width, height);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str, font: &str) -> Result<()> {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.set_font(font);
        self.ctx.fill_text(text, x, y).map_err(js_err)
    }
}
