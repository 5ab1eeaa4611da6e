//! Geographic anchoring of pins on the sphere.

use crate::config::{positive, PlacementPolicy};
use crate::error::{GlobeError, Result};
use glam::Vec3;

/// Convert latitude/longitude in degrees to a point on a sphere of radius
/// `radius + radius_offset` centred at the origin.
///
/// Longitude is negated so that east lies to the viewer's right when the
/// camera looks down -Z. Out-of-range inputs still yield a point on the
/// sphere; validation happens at configuration time.
#[inline]
pub fn place(latitude: f32, longitude: f32, radius: f32, radius_offset: f32) -> Vec3 {
    let r = radius + radius_offset;
    let lat = latitude.to_radians();
    let lon = -longitude.to_radians();
    Vec3::new(
        lat.cos() * lon.cos() * r,
        lat.sin() * r,
        lat.cos() * lon.sin() * r,
    )
}

/// World-space size of a pin quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneSize {
    pub width: f32,
    pub height: f32,
}

/// Fit `width x height` into a square of side `max_dimension`, keeping the
/// aspect ratio. The longer side always equals `max_dimension` exactly.
pub fn plane_size(width: f32, height: f32, max_dimension: f32) -> Result<PlaneSize> {
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(GlobeError::InvalidPinSize { width, height });
    }
    positive("pin_max_dimension", max_dimension)?;

    if height >= width {
        Ok(PlaneSize {
            width: max_dimension * (width / height),
            height: max_dimension,
        })
    } else {
        Ok(PlaneSize {
            width: max_dimension,
            height: max_dimension * (height / width),
        })
    }
}

impl PlacementPolicy {
    /// Anchor for a pin under this policy. `zoom_offset` is the radius offset
    /// of the current zoom bucket and is ignored by the latitude policy.
    pub fn anchor(&self, latitude: f32, longitude: f32, radius: f32, zoom_offset: f32) -> Vec3 {
        match *self {
            PlacementPolicy::ZoomOffset => place(latitude, longitude, radius, zoom_offset),
            PlacementPolicy::LatitudeOffset { y_offset } => {
                let mut p = place(latitude, longitude, radius, 0.0);
                p.y += if latitude >= 0.0 { y_offset } else { -y_offset };
                p
            }
        }
    }
}
