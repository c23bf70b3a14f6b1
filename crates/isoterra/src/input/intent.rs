//! Held movement keys, and what they mean in world space.
//!
//! Screen directions are diagonal in the world: "up" on screen walks toward
//! -x and -y at once. Two keys together collapse to a single world axis.

use serde::{Deserialize, Serialize};

use crate::components::entity::Entity;
use crate::input::queue::InputEvent;

/// Which way an actor looks, as an index into its animation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Facing {
    South = 0,
    North = 1,
    East = 2,
    NorthEast = 3,
    SouthEast = 4,
    West = 5,
    NorthWest = 6,
    SouthWest = 7,
}

impl Facing {
    pub const COUNT: usize = 8;

    /// Animation state index for this facing.
    pub fn state(self) -> usize {
        self as usize
    }
}

/// Key codes bound to each movement key. Defaults are the DOM arrow keys
/// and space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
    pub jump: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: 38,
            down: 40,
            left: 37,
            right: 39,
            jump: 32,
        }
    }
}

/// Movement keys currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveIntent {
    /// Update held keys from one event. Pointer events are ignored.
    pub fn apply(&mut self, event: &InputEvent, keys: &KeyBindings) {
        let (code, held) = match *event {
            InputEvent::KeyDown { key_code } => (key_code, true),
            InputEvent::KeyUp { key_code } => (key_code, false),
            _ => return,
        };
        if code == keys.up {
            self.up = held;
        } else if code == keys.down {
            self.down = held;
        } else if code == keys.left {
            self.left = held;
        } else if code == keys.right {
            self.right = held;
        } else if code == keys.jump {
            self.jump = held;
        }
    }

    /// Update held keys from every queued event, in order.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>, keys: &KeyBindings) {
        for event in events {
            self.apply(event, keys);
        }
    }

    /// Screen direction: (-1 left / +1 right, -1 up / +1 down).
    /// With opposite keys held, up wins over down and left over right.
    fn screen_dir(&self) -> (i32, i32) {
        let h = if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        };
        let v = if self.up {
            -1
        } else if self.down {
            1
        } else {
            0
        };
        (h, v)
    }

    /// World axis directions, each -1, 0 or 1.
    pub fn axes(&self) -> (i32, i32) {
        let (h, v) = self.screen_dir();
        ((v + h).signum(), (v - h).signum())
    }

    pub fn is_moving(&self) -> bool {
        self.axes() != (0, 0)
    }

    /// Facing for the held keys, or None when standing still.
    pub fn facing(&self) -> Option<Facing> {
        match self.screen_dir() {
            (0, 1) => Some(Facing::South),
            (0, -1) => Some(Facing::North),
            (1, 0) => Some(Facing::East),
            (1, -1) => Some(Facing::NorthEast),
            (1, 1) => Some(Facing::SouthEast),
            (-1, 0) => Some(Facing::West),
            (-1, -1) => Some(Facing::NorthWest),
            (-1, 1) => Some(Facing::SouthWest),
            _ => None,
        }
    }

    /// Point an actor where the keys say: heading, facing state, and walk
    /// cycle. A standing actor keeps its facing with the cycle rewound.
    pub fn steer(&self, entity: &mut Entity) {
        let (dx, dy) = self.axes();
        entity.set_heading(dx as f32, dy as f32);
        match self.facing() {
            Some(facing) => entity.set_state(facing.state()),
            None => entity.reset_animation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::Animation;
    use crate::components::sprite::{Sprite, SpriteHandle};

    fn held(up: bool, down: bool, left: bool, right: bool) -> MoveIntent {
        MoveIntent {
            up,
            down,
            left,
            right,
            jump: false,
        }
    }

    #[test]
    fn single_keys_walk_diagonally_in_world() {
        assert_eq!(held(true, false, false, false).axes(), (-1, -1));
        assert_eq!(held(false, true, false, false).axes(), (1, 1));
        assert_eq!(held(false, false, true, false).axes(), (-1, 1));
        assert_eq!(held(false, false, false, true).axes(), (1, -1));
    }

    #[test]
    fn key_pairs_collapse_to_one_axis() {
        assert_eq!(held(true, false, true, false).axes(), (-1, 0));
        assert_eq!(held(true, false, false, true).axes(), (0, -1));
        assert_eq!(held(false, true, true, false).axes(), (0, 1));
        assert_eq!(held(false, true, false, true).axes(), (1, 0));
    }

    #[test]
    fn facing_states() {
        assert_eq!(held(false, true, false, false).facing(), Some(Facing::South));
        assert_eq!(held(true, false, false, false).facing(), Some(Facing::North));
        assert_eq!(held(false, false, false, true).facing().map(Facing::state), Some(2));
        assert_eq!(held(true, false, false, true).facing().map(Facing::state), Some(3));
        assert_eq!(held(false, true, false, true).facing().map(Facing::state), Some(4));
        assert_eq!(held(false, false, true, false).facing().map(Facing::state), Some(5));
        assert_eq!(held(true, false, true, false).facing().map(Facing::state), Some(6));
        assert_eq!(held(false, true, true, false).facing().map(Facing::state), Some(7));
    }

    #[test]
    fn up_and_left_win_over_their_opposites() {
        let vertical = held(true, true, false, false);
        assert_eq!(vertical.axes(), (-1, -1));
        assert_eq!(vertical.facing(), Some(Facing::North));

        let horizontal = held(false, false, true, true);
        assert_eq!(horizontal.axes(), (-1, 1));
        assert_eq!(horizontal.facing(), Some(Facing::West));

        let three = held(true, true, true, false);
        assert_eq!(three.axes(), (-1, 0));
        assert_eq!(three.facing(), Some(Facing::NorthWest));

        let all = held(true, true, true, true);
        assert_eq!(all.facing(), Some(Facing::NorthWest));
        assert!(all.is_moving());
    }

    #[test]
    fn no_keys_stand_still() {
        let intent = MoveIntent::default();
        assert_eq!(intent.axes(), (0, 0));
        assert_eq!(intent.facing(), None);
        assert!(!intent.is_moving());
    }

    #[test]
    fn events_update_held_keys() {
        let keys = KeyBindings::default();
        let mut intent = MoveIntent::default();
        let events = [
            InputEvent::KeyDown { key_code: keys.up },
            InputEvent::KeyDown { key_code: keys.jump },
            InputEvent::PointerMove { x: 5.0, y: 5.0 },
            InputEvent::KeyDown { key_code: 999 },
        ];
        intent.apply_all(&events, &keys);
        assert!(intent.up && intent.jump);
        assert!(!intent.down && !intent.left && !intent.right);

        intent.apply(&InputEvent::KeyUp { key_code: keys.up }, &keys);
        assert!(!intent.up);
    }

    #[test]
    fn steer_sets_heading_and_state() {
        let frames = vec![Sprite::new(SpriteHandle(0), 32.0, 48.0)];
        let set = (0..Facing::COUNT)
            .map(|_| Animation::new(frames.clone(), 1.0))
            .collect();
        let mut hero = Entity::new(set, 8.0).unwrap().with_speed(4.0);

        held(false, true, false, true).steer(&mut hero);
        assert_eq!(hero.state(), Facing::SouthEast.state());
        assert!((hero.velocity.x - 4.0).abs() < 1e-5);
        assert_eq!(hero.velocity.y, 0.0);

        MoveIntent::default().steer(&mut hero);
        assert_eq!(hero.state(), Facing::SouthEast.state(), "facing is kept");
        assert_eq!(hero.velocity.x, 0.0);
    }
}
