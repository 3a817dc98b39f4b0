//! Immediate-mode drawing of the duel onto any [`Surface`].
//!
//! Nothing here mutates game state. Hosts implement [`Surface`] over their
//! canvas; [`NullSurface`] discards everything for headless runs.

use crate::constants::*;
use crate::sprites::{frame_rect, sheet, AssetKey, Rect};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub align: TextAlign,
    pub bold: bool,
    pub fill: Rgba,
    /// Outline colour and line width.
    pub outline: Option<(Rgba, f64)>,
}

impl TextStyle {
    fn plain(size: f64, fill: Rgba) -> Self {
        Self {
            size,
            align: TextAlign::Left,
            bold: false,
            fill,
            outline: None,
        }
    }
}

/// 2D drawing target. Coordinates are canvas pixels, y down.
pub trait Surface {
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, corner_radius: f64, fill: Rgba);
    fn stroke_rect(&mut self, rect: Rect, corner_radius: f64, stroke: Rgba, line_width: f64);
    fn fill_circle(&mut self, center: Vec2, diameter: f64, fill: Rgba);
    /// Draw an image, or the `src` cell of it, stretched into `dst`.
    fn draw_image(&mut self, key: AssetKey, src: Option<Rect>, dst: Rect);
    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle);
    /// Translate then scale; undone by the matching `pop_transform`.
    fn push_transform(&mut self, translate: Vec2, scale_x: f64, scale_y: f64);
    fn pop_transform(&mut self);
}

/// Surface that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _: Rgba) {}
    fn fill_rect(&mut self, _: Rect, _: f64, _: Rgba) {}
    fn stroke_rect(&mut self, _: Rect, _: f64, _: Rgba, _: f64) {}
    fn fill_circle(&mut self, _: Vec2, _: f64, _: Rgba) {}
    fn draw_image(&mut self, _: AssetKey, _: Option<Rect>, _: Rect) {}
    fn fill_text(&mut self, _: &str, _: Vec2, _: &TextStyle) {}
    fn push_transform(&mut self, _: Vec2, _: f64, _: f64) {}
    fn pop_transform(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect { x, y, width, height }
}

/// Linear remap of `v` from [a0, a1] to [b0, b1].
fn remap(v: f64, a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    b0 + (v - a0) * (b1 - b0) / (a1 - a0)
}

// ── Scene ───────────────────────────────────────────────────

pub fn draw_scene(s: &mut impl Surface, vp: Viewport) {
    s.clear(Rgb::grey(BACKDROP_GREY).opaque());
    s.draw_image(AssetKey::Background, None, rect(0.0, 0.0, vp.width, vp.height));
    s.fill_rect(
        rect(0.0, GROUND_Y, vp.width, vp.height - GROUND_Y),
        0.0,
        GROUND_COLOR.opaque(),
    );
    // Decorative only; players pass through it.
    s.fill_rect(
        rect(PLATFORM_X, PLATFORM_Y, PLATFORM_WIDTH, PLATFORM_HEIGHT),
        0.0,
        PLATFORM_COLOR.opaque(),
    );
}

// ── Entities ────────────────────────────────────────────────

/// Fading trail, white glow, then the coloured body.
pub fn draw_projectile(s: &mut impl Surface, proj: &Projectile) {
    let len = proj.trail.len() as f64;
    for (j, point) in proj.trail.iter().enumerate() {
        let j = j as f64;
        let alpha = remap(j, 0.0, len, 50.0, 255.0);
        let size = remap(j, 0.0, len, proj.size * 0.5, proj.size);
        s.fill_circle(*point, size * 1.5, proj.color.with_alpha(alpha * 0.3));
        s.fill_circle(*point, size, proj.color.with_alpha(alpha));
    }

    let centre = Vec2::new(proj.x, proj.y);
    s.fill_circle(centre, proj.size * 1.5, Rgb::grey(255).with_alpha(150.0));
    s.fill_circle(centre, proj.size, proj.color.opaque());
}

pub fn draw_particle(s: &mut impl Surface, p: &HitParticle) {
    s.fill_circle(
        Vec2::new(p.x, p.y),
        HIT_PARTICLE_SIZE,
        p.color.with_alpha(p.life as f64),
    );
}

/// Sprite centred on the player, mirrored when facing left.
pub fn draw_player(s: &mut impl Surface, p: &PlayerState) {
    let sh = sheet(p.id, p.action);
    s.push_transform(Vec2::new(p.x, p.y), p.facing.sign() * sh.scale, sh.scale);
    s.draw_image(
        AssetKey::Sheet(p.id, p.action),
        Some(frame_rect(p)),
        rect(
            -sh.frame_width / 2.0,
            -sh.frame_height / 2.0,
            sh.frame_width,
            sh.frame_height,
        ),
    );
    s.pop_transform();
}

// ── HUD ─────────────────────────────────────────────────────

fn health_bar_x(id: PlayerId, vp: Viewport) -> f64 {
    match id {
        PlayerId::One => HEALTH_BAR_MARGIN,
        PlayerId::Two => vp.width - HEALTH_BAR_WIDTH - HEALTH_BAR_MARGIN,
    }
}

pub fn draw_health_bar(s: &mut impl Surface, p: &PlayerState, vp: Viewport) {
    let x = health_bar_x(p.id, vp);
    let y = HEALTH_BAR_TOP;
    let frame = rect(x - 2.0, y - 2.0, HEALTH_BAR_WIDTH + 4.0, HEALTH_BAR_HEIGHT + 4.0);
    s.fill_rect(frame, 5.0, Rgb::grey(100).opaque());
    s.stroke_rect(frame, 5.0, Rgb::grey(0).opaque(), 2.0);

    s.fill_rect(rect(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT), 3.0, Rgb::new(255, 0, 0).opaque());

    // Health itself is unclamped; only the drawn width is.
    let ratio = (p.health as f64 / MAX_HEALTH as f64).clamp(0.0, 1.0);
    if ratio > 0.0 {
        s.fill_rect(
            rect(x, y, HEALTH_BAR_WIDTH * ratio, HEALTH_BAR_HEIGHT),
            3.0,
            Rgb::new(0, 255, 0).opaque(),
        );
    }

    let style = TextStyle {
        outline: Some((Rgb::grey(0).opaque(), 2.0)),
        ..TextStyle::plain(16.0, Rgb::grey(255).opaque())
    };
    s.fill_text(&format!("{}: {}", p.id.label(), p.health), Vec2::new(x, y - 5.0), &style);
}

pub fn draw_cooldown_indicator(s: &mut impl Surface, p: &PlayerState, vp: Viewport) {
    if p.can_shoot {
        return;
    }
    s.fill_circle(
        Vec2::new(health_bar_x(p.id, vp), 70.0),
        20.0,
        Rgb::new(255, 0, 0).with_alpha(127.0),
    );
}

const CONTROL_HINTS: [(&str, [&str; 3]); 2] = [
    ("Player 1 Controls:", ["W - Jump", "A/D - Move Left/Right", "SPACE - Shoot"]),
    ("Player 2 Controls:", ["↑ - Jump", "←/→ - Move Left/Right", "ENTER - Shoot"]),
];

pub fn draw_controls(s: &mut impl Surface, vp: Viewport) {
    let padding = 20.0;
    let box_width = 300.0;
    let box_height = 120.0;
    let top = vp.height - box_height - padding;
    let lefts = [padding, vp.width - box_width - 2.0 * padding];

    let text = TextStyle::plain(16.0, Rgb::grey(255).opaque());
    for (left, (heading, lines)) in lefts.into_iter().zip(CONTROL_HINTS) {
        s.fill_rect(rect(left, top, box_width, box_height), 10.0, Rgb::grey(0).with_alpha(127.0));
        s.fill_text(heading, Vec2::new(left + 10.0, top + 25.0), &text);
        for (i, line) in lines.iter().enumerate() {
            let y = top + 50.0 + 25.0 * i as f64;
            s.fill_text(line, Vec2::new(left + 20.0, y), &text);
        }
    }
}

pub fn draw_title(s: &mut impl Surface, vp: Viewport) {
    s.fill_rect(rect(0.0, 20.0, vp.width, 50.0), 0.0, Rgb::grey(0).with_alpha(100.0));
    let style = TextStyle {
        size: 32.0,
        align: TextAlign::Center,
        bold: true,
        fill: Rgb::grey(255).opaque(),
        outline: Some((Rgb::grey(0).opaque(), 2.0)),
    };
    s.fill_text(TITLE, Vec2::new(vp.width / 2.0, 55.0), &style);
}

/// Health bars, control hints, cooldown dots and the title banner.
pub fn draw_hud(s: &mut impl Surface, players: &[PlayerState; 2], vp: Viewport) {
    for p in players {
        draw_health_bar(s, p, vp);
    }
    draw_controls(s, vp);
    for p in players {
        draw_cooldown_indicator(s, p, vp);
    }
    draw_title(s, vp);
}

pub fn draw_winner(s: &mut impl Surface, winner: PlayerId, vp: Viewport) {
    let style = TextStyle {
        size: 64.0,
        align: TextAlign::Center,
        bold: false,
        fill: Rgb::grey(0).opaque(),
        outline: None,
    };
    s.fill_text(
        &format!("{} Wins!", winner.label()),
        Vec2::new(vp.width / 2.0, vp.height / 2.0),
        &style,
    );
}

#[cfg(test)]
pub use recording::{DrawCall, RecordingSurface};
