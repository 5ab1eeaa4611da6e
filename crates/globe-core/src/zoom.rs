//! Discretises camera distance into zoom buckets.
//!
//! Each bucket fixes the point-light intensity, the uniform pin scale and
//! the radial lift of pin anchors. Buckets are only re-evaluated once the
//! camera has travelled at least one bucket width since the last
//! transition, so per-frame jitter never re-places geometry.

use crate::config::positive;
use crate::constants::*;
use crate::error::{GlobeError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct ZoomSettings {
    pub min_distance: f32,
    pub bucket_width: f32,
    pub min_intensity: f32,
    pub light_step: f32,
    pub min_size: f32,
    pub size_step: f32,
    /// Pin dimension that corresponds to scale 1.
    pub max_size: f32,
    pub min_offset: f32,
    pub offset_step: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min_distance: ZOOM_MIN_DISTANCE,
            bucket_width: ZOOM_BUCKET_WIDTH,
            min_intensity: ZOOM_MIN_LIGHT_INTENSITY,
            light_step: ZOOM_LIGHT_STEP,
            min_size: ZOOM_MIN_PIN_SIZE,
            size_step: ZOOM_PIN_SIZE_STEP,
            max_size: PIN_MAX_DIMENSION,
            min_offset: ZOOM_MIN_RADIUS_OFFSET,
            offset_step: ZOOM_RADIUS_OFFSET_STEP,
        }
    }
}

impl ZoomSettings {
    pub fn validate(&self) -> Result<()> {
        positive("zoom.bucket_width", self.bucket_width)?;
        positive("zoom.max_size", self.max_size)?;
        if !self.min_distance.is_finite() {
            return Err(GlobeError::InvalidSetting {
                name: "zoom.min_distance",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

/// Visual parameters derived from a bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLevel {
    pub bucket: u32,
    pub light_intensity: f32,
    pub pin_scale: f32,
    pub radius_offset: f32,
}

impl ZoomLevel {
    pub fn for_bucket(settings: &ZoomSettings, bucket: u32) -> Self {
        let b = bucket as f32;
        Self {
            bucket,
            light_intensity: settings.min_intensity + settings.light_step * b,
            pin_scale: (settings.min_size + settings.size_step * b) / settings.max_size,
            radius_offset: settings.min_offset + settings.offset_step * b,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ZoomAdapter {
    settings: ZoomSettings,
    bucket: u32,
    previous_distance: f32,
}

impl ZoomAdapter {
    pub fn new(settings: ZoomSettings) -> Self {
        let previous_distance = settings.min_distance;
        Self {
            settings,
            bucket: 0,
            previous_distance,
        }
    }

    pub fn settings(&self) -> &ZoomSettings {
        &self.settings
    }

    pub fn bucket(&self) -> u32 {
        self.bucket
    }

    pub fn previous_distance(&self) -> f32 {
        self.previous_distance
    }

    pub fn level(&self) -> ZoomLevel {
        ZoomLevel::for_bucket(&self.settings, self.bucket)
    }

    /// Bucket a distance would fall into; distances below `min_distance`
    /// clamp to bucket 0.
    pub fn bucket_for(&self, distance: f32) -> u32 {
        let steps = ((distance - self.settings.min_distance) / self.settings.bucket_width).floor();
        if steps > 0.0 {
            steps as u32
        } else {
            0
        }
    }

    /// Feed a new camera distance. Returns the new level when a transition
    /// fired and the caller must re-place pins and relight the scene.
    pub fn on_distance_changed(&mut self, distance: f32) -> Option<ZoomLevel> {
        if !distance.is_finite() {
            return None;
        }
        if (distance - self.previous_distance).abs() < self.settings.bucket_width {
            return None;
        }
        self.previous_distance = distance;
        self.bucket = self.bucket_for(distance);
        let level = self.level();
        log::debug!(
            "[zoom] distance={:.3} bucket={} light={:.2} scale={:.3} offset={:.3}",
            distance,
            level.bucket,
            level.light_intensity,
            level.pin_scale,
            level.radius_offset
        );
        Some(level)
    }
}
