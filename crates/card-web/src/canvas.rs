use crate::dom;
use card_core::{LocalRect, Rgba, Surface2d, Viewport};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Surface2d`] over a Canvas2D context. Drawing happens in CSS pixels; the
/// context transform scales to the backing store.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            canvas,
            ctx,
            viewport: Viewport::new(0.0, 0.0, 1.0),
        })
    }
}

impl Surface2d for CanvasSurface {
    fn fit(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        dom::sync_canvas_backing_size(&self.canvas, viewport);
        let r = viewport.pixel_ratio() as f64;
        let _ = self.ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_rotated_rect(&mut self, origin: Vec2, rotation: f32, rect: LocalRect, color: Rgba) {
        self.ctx.save();
        let _ = self.ctx.translate(origin.x as f64, origin.y as f64);
        let _ = self.ctx.rotate(rotation as f64);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        self.ctx.restore();
    }

    fn set_visible(&mut self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        let _ = self.canvas.style().set_property("display", display);
    }
}
