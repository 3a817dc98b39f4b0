//! Keyboard model: the eight keys the duel listens to, held-key state, and the
//! queued key events a host feeds into a session between frames.

use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    A = 0,
    D = 1,
    W = 2,
    Space = 3,
    ArrowLeft = 4,
    ArrowRight = 5,
    ArrowUp = 6,
    Enter = 7,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a key. Unmapped codes yield `None`.
    pub fn from_code(code: &str) -> Option<Key> {
        match code {
            "KeyA" => Some(Key::A),
            "KeyD" => Some(Key::D),
            "KeyW" => Some(Key::W),
            "Space" => Some(Key::Space),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "Enter" | "NumpadEnter" => Some(Key::Enter),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// Set of currently held keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }
}

/// Key bindings for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub left: Key,
    pub right: Key,
    pub jump: Key,
    pub shoot: Key,
}

impl Controls {
    pub fn for_player(id: PlayerId) -> Controls {
        match id {
            PlayerId::One => Controls {
                left: Key::A,
                right: Key::D,
                jump: Key::W,
                shoot: Key::Space,
            },
            PlayerId::Two => Controls {
                left: Key::ArrowLeft,
                right: Key::ArrowRight,
                jump: Key::ArrowUp,
                shoot: Key::Enter,
            },
        }
    }

    /// Keys whose release sends the player back to idle.
    pub fn is_motion_key(&self, key: Key) -> bool {
        key == self.left || key == self.right || key == self.jump
    }
}

/// What a player is asking for this frame, read from held keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveIntent {
    pub fn read(keys: &HeldKeys, controls: &Controls) -> MoveIntent {
        MoveIntent {
            left: keys.is_down(controls.left),
            right: keys.is_down(controls.right),
            jump: keys.is_down(controls.jump),
        }
    }
}

/// Which player, if any, shoots with this key.
pub fn shooter_for(key: Key) -> Option<PlayerId> {
    PlayerId::ALL
        .into_iter()
        .find(|id| Controls::for_player(*id).shoot == key)
}

/// Which player, if any, jumps with this key.
pub fn jumper_for(key: Key) -> Option<PlayerId> {
    PlayerId::ALL
        .into_iter()
        .find(|id| Controls::for_player(*id).jump == key)
}
