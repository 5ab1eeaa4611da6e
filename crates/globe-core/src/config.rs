//! Globe configuration as published by the hosting page, plus the numeric
//! tuning the engine runs with.

use crate::constants::*;
use crate::error::{GlobeError, Result};
use crate::rotation::RotationSettings;
use crate::zoom::ZoomSettings;
use serde::Deserialize;
use std::time::Duration;

/// One image to anchor on the globe, as listed in the configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PinSpec {
    pub url: String,
    pub width: f32,
    pub height: f32,
    pub lat: f32,
    pub lon: f32,
}

impl PinSpec {
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GlobeError::InvalidPinSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(GlobeError::InvalidLatitude(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(GlobeError::InvalidLongitude(self.lon));
        }
        Ok(())
    }
}

/// RGB colour accepted either as a JSON number or a hex string such as
/// `"0x000b4c"` or `"#000b4c"`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawColor")]
pub struct BackgroundColor(pub u32);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Number(u32),
    Text(String),
}

impl TryFrom<RawColor> for BackgroundColor {
    type Error = GlobeError;

    fn try_from(raw: RawColor) -> Result<Self> {
        match raw {
            RawColor::Number(n) => BackgroundColor::from_rgb(n),
            RawColor::Text(s) => BackgroundColor::parse(&s),
        }
    }
}

impl BackgroundColor {
    pub fn from_rgb(value: u32) -> Result<Self> {
        if value > 0xff_ffff {
            return Err(GlobeError::InvalidColor(format!("{value:#x}")));
        }
        Ok(Self(value))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let t = text.trim();
        let parsed = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
            u32::from_str_radix(hex, 16)
        } else if let Some(hex) = t.strip_prefix('#') {
            u32::from_str_radix(hex, 16)
        } else {
            t.parse::<u32>()
        };
        parsed
            .map_err(|_| GlobeError::InvalidColor(text.to_string()))
            .and_then(Self::from_rgb)
    }

    /// Linear-ish `[r, g, b]` in `0..=1`.
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self(SCENE_BACKGROUND_COLOR)
    }
}

/// Page-provided configuration (`my-globe-config.json`).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobeConfig {
    #[serde(default)]
    pub texture: String,
    #[serde(default)]
    pub canvas_container_id: String,
    #[serde(default)]
    pub scene_background_color: BackgroundColor,
    #[serde(default)]
    pub images: Vec<PinSpec>,
    #[serde(default)]
    pub primary_color: Option<String>,
}

impl GlobeConfig {
    /// Parse and validate in one step; nothing is built from a config that
    /// fails here. Pins are checked one by one when they are placed, so a
    /// single bad entry never takes the whole globe down.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: GlobeConfig = serde_json::from_str(text)?;
        config.validate()?;
        log::info!(
            "[config] container={} texture={} pins={}",
            config.canvas_container_id,
            config.texture,
            config.images.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_container_id.trim().is_empty() {
            return Err(GlobeError::MissingField("canvasContainerId"));
        }
        if self.texture.trim().is_empty() {
            return Err(GlobeError::MissingField("texture"));
        }
        Ok(())
    }
}

/// How pin anchors are lifted off the sphere surface. Exactly one policy is
/// active per globe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementPolicy {
    /// Radial offset driven by the current zoom bucket.
    ZoomOffset,
    /// Fixed vertical nudge away from the equator, ignoring zoom.
    LatitudeOffset { y_offset: f32 },
}

impl PlacementPolicy {
    /// Latitude policy with the stock nudge.
    pub fn latitude() -> Self {
        PlacementPolicy::LatitudeOffset {
            y_offset: PIN_LATITUDE_Y_OFFSET,
        }
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy::ZoomOffset
    }
}

/// Numeric tuning for one globe instance.
#[derive(Clone, Debug)]
pub struct GlobeSettings {
    pub planet_radius: f32,
    pub pin_max_dimension: f32,
    pub zoom: ZoomSettings,
    pub rotation: RotationSettings,
    pub selection_threshold_px: f32,
    pub placement_interval: Duration,
    pub auto_rotation_rad_per_sec: f32,
    pub placement_policy: PlacementPolicy,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self {
            planet_radius: PLANET_RADIUS,
            pin_max_dimension: PIN_MAX_DIMENSION,
            zoom: ZoomSettings::default(),
            rotation: RotationSettings::default(),
            selection_threshold_px: SELECTION_MOVE_THRESHOLD_PX,
            placement_interval: Duration::from_millis(PLACEMENT_INTERVAL_MS),
            auto_rotation_rad_per_sec: AUTO_ROTATION_RAD_PER_SEC,
            placement_policy: PlacementPolicy::default(),
        }
    }
}

impl GlobeSettings {
    pub fn validate(&self) -> Result<()> {
        positive("planet_radius", self.planet_radius)?;
        positive("pin_max_dimension", self.pin_max_dimension)?;
        if !(self.selection_threshold_px >= 0.0) {
            return Err(GlobeError::InvalidSetting {
                name: "selection_threshold_px",
                reason: "must be zero or positive",
            });
        }
        self.zoom.validate()?;
        self.rotation.validate()?;
        Ok(())
    }
}

pub(crate) fn positive(name: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GlobeError::InvalidSetting {
            name,
            reason: "must be a positive finite number",
        })
    }
}
