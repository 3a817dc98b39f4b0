use std::collections::HashMap;
use std::f64::consts::TAU;

use duel_core::{AssetKey, Rect, Rgba, Surface, TextAlign, TextStyle, Vec2};
use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// [`Surface`] over a browser 2D context.
///
/// Draw calls that the browser rejects are logged and skipped.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<AssetKey, HtmlImageElement>,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        images: HashMap<AssetKey, HtmlImageElement>,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            ctx,
            images,
            width,
            height,
        }
    }

    fn rect_path(&self, r: Rect, radius: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.begin_path();
        if radius <= 0.0 {
            ctx.rect(r.x, r.y, r.width, r.height);
            return Ok(());
        }
        let (x0, y0, x1, y1) = (r.x, r.y, r.x + r.width, r.y + r.height);
        ctx.move_to(x0 + radius, y0);
        ctx.arc_to(x1, y0, x1, y1, radius)?;
        ctx.arc_to(x1, y1, x0, y1, radius)?;
        ctx.arc_to(x0, y1, x0, y0, radius)?;
        ctx.arc_to(x0, y0, x1, y0, radius)?;
        ctx.close_path();
        Ok(())
    }
}

fn css(c: Rgba) -> String {
    format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, c.a as f64 / 255.0)
}

fn check(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!("canvas {} failed: {:?}", op, e);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: f64, fill: Rgba) {
        self.ctx.set_fill_style_str(&css(fill));
        if corner_radius <= 0.0 {
            self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            return;
        }
        check("fill_rect", self.rect_path(rect, corner_radius));
        self.ctx.fill();
    }

    fn stroke_rect(&mut self, rect: Rect, corner_radius: f64, stroke: Rgba, line_width: f64) {
        self.ctx.set_stroke_style_str(&css(stroke));
        self.ctx.set_line_width(line_width);
        check("stroke_rect", self.rect_path(rect, corner_radius));
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, diameter: f64, fill: Rgba) {
        self.ctx.set_fill_style_str(&css(fill));
        self.ctx.begin_path();
        check("arc", self.ctx.arc(center.x, center.y, diameter / 2.0, 0.0, TAU));
        self.ctx.fill();
    }

    fn draw_image(&mut self, key: AssetKey, src: Option<Rect>, dst: Rect) {
        let Some(img) = self.images.get(&key) else {
            warn!("no image for {:?}", key);
            return;
        };
        let result = match src {
            Some(s) => self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img, s.x, s.y, s.width, s.height, dst.x, dst.y, dst.width, dst.height,
                ),
            None => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img, dst.x, dst.y, dst.width, dst.height,
            ),
        };
        check("draw_image", result);
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle) {
        let weight = if style.bold { "bold " } else { "" };
        self.ctx.set_font(&format!("{}{}px sans-serif", weight, style.size));
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        if let Some((outline, width)) = style.outline {
            self.ctx.set_stroke_style_str(&css(outline));
            self.ctx.set_line_width(width);
            check("stroke_text", self.ctx.stroke_text(text, at.x, at.y));
        }
        self.ctx.set_fill_style_str(&css(style.fill));
        check("fill_text", self.ctx.fill_text(text, at.x, at.y));
    }

    fn push_transform(&mut self, translate: Vec2, scale_x: f64, scale_y: f64) {
        self.ctx.save();
        check("translate", self.ctx.translate(translate.x, translate.y));
        check("scale", self.ctx.scale(scale_x, scale_y));
    }

    fn pop_transform(&mut self) {
        self.ctx.restore();
    }
}
