use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::*;

/// Runtime settings for a session. The rules themselves are constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seeds the hit-particle random source.
    pub seed: u32,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        default_config(0)
    }
}

/// 1280x720 viewport with the given seed.
pub fn default_config(seed: u32) -> SessionConfig {
    SessionConfig {
        seed,
        viewport_width: 1280.0,
        viewport_height: 720.0,
    }
}

/// A player standing on the ground at their starting post, facing right.
pub fn spawn_player(id: PlayerId) -> PlayerState {
    let x = match id {
        PlayerId::One => PLAYER_ONE_START_X,
        PlayerId::Two => PLAYER_TWO_START_X,
    };
    PlayerState {
        id,
        x,
        y: GROUND_Y,
        action: Action::Idle,
        frame: 0,
        facing: Facing::Right,
        health: MAX_HEALTH,
        can_shoot: true,
        last_shot_at: 0.0,
        vy: 0.0,
        airborne: false,
    }
}
