use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_ONE_COLOR, PLAYER_TWO_COLOR};

// ── Primitives ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Host clock reading in milliseconds.
pub type Millis = f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Attach an alpha channel (0 transparent, 255 opaque).
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, 255.0) as u8,
        }
    }

    pub fn opaque(self) -> Rgba {
        self.with_alpha(255.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

// ── Players ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            PlayerId::One => PLAYER_ONE_COLOR,
            PlayerId::Two => PLAYER_TWO_COLOR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerId::One => "Player 1",
            PlayerId::Two => "Player 2",
        }
    }
}

/// Animation/behaviour mode of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Walk,
    Jump,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Idle, Action::Walk, Action::Jump];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum Facing {
    Left = -1,
    Right = 1,
}

impl Facing {
    pub fn sign(self) -> f64 {
        self as i32 as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub x: f64,
    /// Sprite centre; equals `GROUND_Y` while standing.
    pub y: f64,
    pub action: Action,
    pub frame: usize,
    pub facing: Facing,
    /// Not clamped: a killing blow can leave this below zero.
    pub health: i32,
    pub can_shoot: bool,
    pub last_shot_at: Millis,
    pub vy: f64,
    pub airborne: bool,
}

// ── Projectile ──────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: PlayerId,
    pub x: f64,
    pub y: f64,
    pub direction: Facing,
    pub speed: f64,
    /// Diameter in pixels.
    pub size: f64,
    pub color: Rgb,
    /// Most recent positions, oldest first. Never longer than `TRAIL_LENGTH`.
    pub trail: VecDeque<Vec2>,
}

// ── Hit particles ───────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitParticle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: i32,
    pub color: Rgb,
}

// ── Session ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running,
    /// Terminal. Nothing mutates after this.
    GameOver { winner: PlayerId },
}

/// Serialisable view of a whole session, for hosts and debugging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub phase: Phase,
    pub players: [PlayerState; 2],
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<HitParticle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_symmetric() {
        for id in PlayerId::ALL {
            assert_ne!(id.opponent(), id);
            assert_eq!(id.opponent().opponent(), id);
        }
    }

    #[test]
    fn facing_signs() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Rgb::grey(10).with_alpha(300.0).a, 255);
        assert_eq!(Rgb::grey(10).with_alpha(-5.0).a, 0);
    }
}
