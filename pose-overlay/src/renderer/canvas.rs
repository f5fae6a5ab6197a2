//! Canvas 2D surface - immediate-mode drawing on an HtmlCanvasElement

use super::surface::{Color, DrawSurface};
use crate::error::OverlayError;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, OverlayError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| OverlayError::ContextUnavailable)?
            .ok_or(OverlayError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| OverlayError::ContextUnavailable)?;

        Ok(Self { canvas, context })
    }
}

impl DrawSurface for Canvas2dSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Resizing resets the context state, styles are set again per render
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.context.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.context.set_stroke_style_str(&color.to_css());
    }

    fn set_fill_color(&mut self, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.context.begin_path();
        self.context.move_to(from.0, from.1);
        self.context.line_to(to.0, to.1);
        self.context.stroke();
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64) {
        self.context.begin_path();
        if self
            .context
            .arc(center.0, center.1, radius, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.context.fill();
        }
    }
}
