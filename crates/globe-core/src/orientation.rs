//! Per-frame billboarding of pins and camera-tracking light.

use crate::pin::Pin;
use crate::scene::{PinTransform, PointLight, SceneHost};
use glam::{Mat3, Quat, Vec3};

/// Rotation that points local +Z from `position` towards `target`, keeping
/// +Y as close to world up as possible. Degenerate inputs (coincident
/// points) give the identity.
pub fn billboard(position: Vec3, target: Vec3) -> Quat {
    let z = (target - position).normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    // Looking straight up or down: borrow Z as the reference up.
    let up = if z.dot(Vec3::Y).abs() > 0.9999 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let x = up.cross(z).normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Sphere-local orientation that makes a pin face `eye` once the sphere's
/// own rotation is applied.
pub fn local_billboard(anchor: Vec3, sphere_orientation: Quat, eye: Vec3) -> Quat {
    let world = sphere_orientation * anchor;
    sphere_orientation.inverse() * billboard(world, eye)
}

pub struct OrientationSync;

impl OrientationSync {
    /// Face every pin towards `eye` and move the light onto the camera.
    /// Calling it twice with the same inputs changes nothing.
    pub fn apply<H: SceneHost>(
        pins: &mut [Pin],
        sphere_orientation: Quat,
        eye: Vec3,
        light_intensity: f32,
        host: &mut H,
    ) {
        for pin in pins.iter_mut() {
            pin.orientation = local_billboard(pin.anchor, sphere_orientation, eye);
            host.set_pin_transform(
                pin.handle(),
                PinTransform {
                    position: pin.anchor,
                    orientation: pin.orientation,
                    scale: pin.scale,
                },
            );
        }
        host.set_light(PointLight {
            position: eye,
            intensity: light_intensity,
        });
    }
}
