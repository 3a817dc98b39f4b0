//! Sprite sheets and animation frame selection.
//!
//! Each player has one horizontal strip per action. The animation index is
//! advanced once per frame and always taken modulo the active strip's frame
//! count, so switching action keeps the index and may land mid-strip.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Static description of one sprite strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSheet {
    pub file: &'static str,
    pub frame_width: f64,
    pub frame_height: f64,
    pub frame_count: usize,
    pub scale: f64,
}

static PLAYER_ONE_SHEETS: [SpriteSheet; 3] = [
    SpriteSheet { file: "idle.png", frame_width: 180.0, frame_height: 403.0, frame_count: 1, scale: 0.4 },
    SpriteSheet { file: "walk.png", frame_width: 214.5, frame_height: 408.0, frame_count: 2, scale: 0.4 },
    SpriteSheet { file: "jump.png", frame_width: 368.0, frame_height: 439.0, frame_count: 6, scale: 0.4 },
];

static PLAYER_TWO_SHEETS: [SpriteSheet; 3] = [
    SpriteSheet { file: "idle1.png", frame_width: 45.0, frame_height: 80.0, frame_count: 1, scale: 1.5 },
    SpriteSheet { file: "walk1.png", frame_width: 74.0, frame_height: 80.0, frame_count: 3, scale: 1.5 },
    SpriteSheet { file: "jump1.png", frame_width: 90.7, frame_height: 78.0, frame_count: 4, scale: 1.5 },
];

pub const BACKGROUND_FILE: &str = "Backgrounds.png";

/// Sheet for a player's current action.
pub fn sheet(id: PlayerId, action: Action) -> &'static SpriteSheet {
    let table = match id {
        PlayerId::One => &PLAYER_ONE_SHEETS,
        PlayerId::Two => &PLAYER_TWO_SHEETS,
    };
    match action {
        Action::Idle => &table[0],
        Action::Walk => &table[1],
        Action::Jump => &table[2],
    }
}

/// Step the animation one frame within the active sheet.
pub fn advance_frame(p: &PlayerState) -> PlayerState {
    let count = sheet(p.id, p.action).frame_count;
    PlayerState {
        frame: (p.frame + 1) % count,
        ..*p
    }
}

/// Source rectangle within a sprite strip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The strip cell for a player's current frame. A stale index from a previous
/// action wraps into the active strip.
pub fn frame_rect(p: &PlayerState) -> Rect {
    let s = sheet(p.id, p.action);
    let frame = p.frame % s.frame_count;
    Rect {
        x: frame as f64 * s.frame_width,
        y: 0.0,
        width: s.frame_width,
        height: s.frame_height,
    }
}

// ── Assets ──────────────────────────────────────────────────

/// Every image the renderer draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKey {
    Background,
    Sheet(PlayerId, Action),
}

impl AssetKey {
    pub fn all() -> impl Iterator<Item = AssetKey> {
        std::iter::once(AssetKey::Background).chain(
            PlayerId::ALL
                .into_iter()
                .flat_map(|id| Action::ALL.into_iter().map(move |a| AssetKey::Sheet(id, a))),
        )
    }

    pub fn file(self) -> &'static str {
        match self {
            AssetKey::Background => BACKGROUND_FILE,
            AssetKey::Sheet(id, action) => sheet(id, action).file,
        }
    }

    /// Inverse of [`AssetKey::file`].
    pub fn from_file(file: &str) -> Option<AssetKey> {
        AssetKey::all().find(|k| k.file() == file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    Missing(AssetKey),
    UnknownFile(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Missing(key) => write!(f, "missing asset {} ({:?})", key.file(), key),
            AssetError::UnknownFile(file) => write!(f, "unknown asset file {file}"),
        }
    }
}

impl std::error::Error for AssetError {}

/// Verify that every asset is loaded before a session starts.
pub fn verify_assets(is_loaded: impl Fn(AssetKey) -> bool) -> Result<(), AssetError> {
    match AssetKey::all().find(|k| !is_loaded(*k)) {
        Some(key) => Err(AssetError::Missing(key)),
        None => Ok(()),
    }
}
