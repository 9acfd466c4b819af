use std::f64::consts::PI;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::surface::{Paint, Rect, Surface, TextAlign};
use crate::geometry::{Color, Point};

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
	width: f64,
	height: f64,
	font_family: &'a str,
}

impl<'a> CanvasSurface<'a> {
	/// Wrap a context whose canvas is `width` x `height`.
	pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64, font_family: &'a str) -> Self {
		Self {
			ctx,
			width,
			height,
			font_family,
		}
	}

	fn finish_path(&self, paint: &Paint) {
		if let Some(fill) = paint.fill {
			self.ctx.set_fill_style_str(&fill.to_string());
			self.ctx.fill();
		}
		if let Some(stroke) = paint.stroke {
			self.ctx.set_stroke_style_str(&stroke.to_string());
			self.ctx.set_line_width(paint.line_width);
			self.ctx.stroke();
		}
	}
}

impl Surface for CanvasSurface<'_> {
	fn clear(&mut self, background: Color) {
		self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
		self.ctx.set_fill_style_str(&background.to_string());
		self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
	}

	fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) {
		if paint.is_invisible() {
			return;
		}
		self.ctx.begin_path();
		self.ctx.move_to(from.x, from.y);
		self.ctx.line_to(to.x, to.y);
		self.finish_path(paint);
	}

	fn draw_rounded_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
		if paint.is_invisible() || rect.width <= 0.0 || rect.height <= 0.0 {
			return;
		}
		let r = radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
		let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
		self.ctx.begin_path();
		if r >= w / 2.0 && (w - h).abs() < f64::EPSILON {
			let c = rect.center();
			if let Err(e) = self.ctx.arc(c.x, c.y, r, 0.0, 2.0 * PI) {
				warn!("canvas: arc failed: {e:?}");
				return;
			}
		} else {
			self.ctx.move_to(x + r, y);
			let corners = [
				(x + w, y, x + w, y + h),
				(x + w, y + h, x, y + h),
				(x, y + h, x, y),
				(x, y, x + w, y),
			];
			for (x1, y1, x2, y2) in corners {
				if let Err(e) = self.ctx.arc_to(x1, y1, x2, y2, r) {
					warn!("canvas: arc_to failed: {e:?}");
					return;
				}
			}
			self.ctx.close_path();
		}
		self.finish_path(paint);
	}

	fn draw_curve(&mut self, from: Point, control: Point, to: Point, paint: &Paint) {
		if paint.is_invisible() {
			return;
		}
		self.ctx.begin_path();
		self.ctx.move_to(from.x, from.y);
		self.ctx.quadratic_curve_to(control.x, control.y, to.x, to.y);
		// A curve is never filled.
		self.finish_path(&Paint { fill: None, ..*paint });
	}

	fn draw_text(&mut self, text: &str, at: Point, size: f64, align: TextAlign, paint: &Paint) {
		let Some(fill) = paint.fill else {
			return;
		};
		self.ctx.set_font(&format!("{size}px {}", self.font_family));
		self.ctx.set_text_align(match align {
			TextAlign::Start => "start",
			TextAlign::Center => "center",
			TextAlign::End => "end",
		});
		self.ctx.set_text_baseline("middle");
		self.ctx.set_fill_style_str(&fill.to_string());
		if let Err(e) = self.ctx.fill_text(text, at.x, at.y) {
			warn!("canvas: fill_text failed: {e:?}");
		}
	}
}

/// The canvas's 2D context, sized to `width` x `height`.
pub fn context_2d(canvas: &HtmlCanvasElement, width: f64, height: f64) -> Option<CanvasRenderingContext2d> {
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);
	match canvas.get_context("2d") {
		Ok(Some(ctx)) => ctx.dyn_into().ok(),
		Ok(None) => {
			warn!("canvas: no 2d context");
			None
		}
		Err(e) => {
			warn!("canvas: get_context failed: {e:?}");
			None
		}
	}
}

/// Pointer position relative to the canvas's top-left corner.
pub fn event_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Schedule `callback` for the next animation frame; returns the request handle.
pub fn request_frame(callback: &Closure<dyn FnMut()>) -> Option<i32> {
	let window = web_sys::window()?;
	match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
		Ok(handle) => Some(handle),
		Err(e) => {
			warn!("canvas: request_animation_frame failed: {e:?}");
			None
		}
	}
}

/// Cancel a frame scheduled by [`request_frame`].
pub fn cancel_frame(handle: i32) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Err(e) = window.cancel_animation_frame(handle) {
		warn!("canvas: cancel_animation_frame failed: {e:?}");
	}
}
