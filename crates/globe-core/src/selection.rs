//! Tap-versus-drag disambiguation for pin selection.

use crate::pin::PinId;
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    /// A press landed on `pin`; waiting to learn whether it is a tap.
    Armed { pin: PinId, origin: Vec2 },
}

#[derive(Clone, Debug)]
pub struct PointerSelection {
    threshold_px: f32,
    state: GestureState,
}

impl PointerSelection {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, GestureState::Armed { .. })
    }

    /// Pointer went down. `hit` is the pin under the pointer, if any.
    /// Returns true when the gesture is now armed; otherwise the caller owns
    /// the gesture (camera orbit or sphere drag).
    pub fn press(&mut self, hit: Option<PinId>, position: Vec2) -> bool {
        self.state = match hit {
            Some(pin) => GestureState::Armed {
                pin,
                origin: position,
            },
            None => GestureState::Idle,
        };
        self.is_armed()
    }

    /// Pointer moved. Returns true when this move cancelled an armed
    /// gesture, turning it into a drag.
    pub fn moved(&mut self, position: Vec2) -> bool {
        let GestureState::Armed { origin, .. } = self.state else {
            return false;
        };
        let delta = (position - origin).abs();
        if delta.x > self.threshold_px || delta.y > self.threshold_px {
            self.state = GestureState::Idle;
            return true;
        }
        false
    }

    /// The platform aborted the gesture; nothing fires.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Pointer released. Yields the pin to fire, at most once per press.
    pub fn release(&mut self) -> Option<PinId> {
        match std::mem::take(&mut self.state) {
            GestureState::Armed { pin, .. } => Some(pin),
            GestureState::Idle => None,
        }
    }
}
