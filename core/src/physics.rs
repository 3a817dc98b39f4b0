use crate::constants::*;
use crate::input::MoveIntent;
use crate::types::*;

/// Walk left/right, pick walk/idle, and start a jump if grounded.
pub fn apply_movement(p: &PlayerState, intent: &MoveIntent) -> PlayerState {
    let mut next = *p;

    if !intent.left && !intent.right && !p.airborne {
        next.action = Action::Idle;
    }

    if intent.left {
        next.x -= MOVE_SPEED;
        if !p.airborne {
            next.action = Action::Walk;
        }
        next.facing = Facing::Left;
    }
    if intent.right {
        next.x += MOVE_SPEED;
        if !p.airborne {
            next.action = Action::Walk;
        }
        next.facing = Facing::Right;
    }

    if intent.jump && !p.airborne {
        next.vy = JUMP_VELOCITY;
        next.airborne = true;
        next.action = Action::Jump;
    }

    next
}

/// Integrate an airborne player and land them on the ground line.
pub fn apply_jump_physics(p: &PlayerState) -> PlayerState {
    if !p.airborne {
        return *p;
    }

    let vy = p.vy + GRAVITY;
    let y = p.y + vy;

    if y >= GROUND_Y {
        return PlayerState {
            y: GROUND_Y,
            vy: 0.0,
            airborne: false,
            action: Action::Idle,
            ..*p
        };
    }

    PlayerState { y, vy, ..*p }
}

/// Key release puts a grounded player back to idle; airborne players keep jumping.
pub fn release_to_idle(p: &PlayerState) -> PlayerState {
    if p.airborne {
        return *p;
    }
    PlayerState {
        action: Action::Idle,
        ..*p
    }
}
