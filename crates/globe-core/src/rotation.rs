//! Clamped drag-to-rotate mapping for the sphere.
//!
//! Rotation about X is limited by `x_limit`. Freedom about Y depends on how
//! far the sphere is tilted about X:
//!  1. free below `first_threshold` (and the Y accumulator is forgotten)
//!  2. limited to `y_limit` below `second_threshold`
//!  3. locked above `second_threshold`

use crate::config::positive;
use crate::constants::*;
use crate::error::{GlobeError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct RotationSettings {
    pub x_limit: f32,
    pub y_limit: f32,
    pub first_threshold: f32,
    pub second_threshold: f32,
    pub rotation_divider: f32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            x_limit: X_AXIS_SHIFT_LIMIT,
            y_limit: Y_AXIS_SHIFT_LIMIT,
            first_threshold: X_AXIS_FIRST_THRESHOLD,
            second_threshold: X_AXIS_SECOND_THRESHOLD,
            rotation_divider: AXIS_ROTATION_RAD_DIVIDER,
        }
    }
}

impl RotationSettings {
    pub fn validate(&self) -> Result<()> {
        positive("rotation.x_limit", self.x_limit)?;
        positive("rotation.y_limit", self.y_limit)?;
        positive("rotation.rotation_divider", self.rotation_divider)?;
        if !(0.0 <= self.first_threshold
            && self.first_threshold <= self.second_threshold
            && self.second_threshold <= self.x_limit)
        {
            return Err(GlobeError::InvalidSetting {
                name: "rotation.thresholds",
                reason: "expected 0 <= first_threshold <= second_threshold <= x_limit",
            });
        }
        Ok(())
    }
}

/// How much the Y axis may move given the current X tilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YFreedom {
    Free,
    Bounded,
    Locked,
}

/// Angles to apply to the sphere about the world X and Y axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationStep {
    pub x_angle: f32,
    pub y_angle: f32,
}

impl RotationStep {
    pub fn is_zero(&self) -> bool {
        self.x_angle == 0.0 && self.y_angle == 0.0
    }
}

#[derive(Clone, Debug)]
pub struct DragRotationController {
    settings: RotationSettings,
    x_shift_total: f32,
    y_shift_total: f32,
}

impl DragRotationController {
    pub fn new(settings: RotationSettings) -> Self {
        Self {
            settings,
            x_shift_total: 0.0,
            y_shift_total: 0.0,
        }
    }

    pub fn x_shift_total(&self) -> f32 {
        self.x_shift_total
    }

    pub fn y_shift_total(&self) -> f32 {
        self.y_shift_total
    }

    pub fn y_freedom(&self) -> YFreedom {
        let tilt = self.x_shift_total.abs();
        if tilt < self.settings.first_threshold {
            YFreedom::Free
        } else if tilt < self.settings.second_threshold {
            YFreedom::Bounded
        } else {
            YFreedom::Locked
        }
    }

    /// Integrate one pointer sample. `x_delta` is the rotation requested
    /// about X (vertical pointer travel), `y_delta` about Y, both radians.
    pub fn on_drag(&mut self, x_delta: f32, y_delta: f32) -> RotationStep {
        if !x_delta.is_finite() || !y_delta.is_finite() {
            return RotationStep::default();
        }
        let divider = self.settings.rotation_divider;
        let mut step = RotationStep::default();

        self.x_shift_total += x_delta;
        if self.x_shift_total.abs() < self.settings.x_limit {
            step.x_angle = x_delta / divider;
        } else {
            self.x_shift_total = self.settings.x_limit.copysign(self.x_shift_total);
        }

        let y_limit = self.settings.y_limit;
        match self.y_freedom() {
            YFreedom::Free => {
                step.y_angle = y_delta / divider;
                self.y_shift_total = 0.0;
            }
            YFreedom::Bounded => {
                self.y_shift_total += y_delta;
                if self.y_shift_total.abs() < y_limit {
                    step.y_angle = y_delta / divider;
                } else {
                    self.y_shift_total = y_limit.copysign(self.y_shift_total);
                }
            }
            YFreedom::Locked => {
                self.y_shift_total = if self.y_shift_total.abs() >= y_limit {
                    y_limit.copysign(self.y_shift_total)
                } else {
                    0.0
                };
            }
        }
        step
    }
}
