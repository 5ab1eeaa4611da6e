//! The seam to the rendering engine.
//!
//! The engine only ever instructs the scene; it never reads business state
//! back from it. `SceneGraph` is a retained implementation that a renderer
//! can draw from each frame.

use crate::geo::PlaneSize;
use glam::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PinHandle(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct SphereVisual {
    pub radius: f32,
    pub texture: String,
    pub background: [f32; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct PinVisual {
    pub url: String,
    pub size: PlaneSize,
}

/// Sphere-local placement of a pin quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinTransform {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

pub trait SceneHost {
    fn configure_sphere(&mut self, sphere: SphereVisual);
    fn add_pin(&mut self, pin: PinVisual) -> PinHandle;
    fn set_pin_transform(&mut self, handle: PinHandle, transform: PinTransform);
    fn set_sphere_orientation(&mut self, orientation: Quat);
    fn set_light(&mut self, light: PointLight);
    fn add_stars(&mut self, stars: &[Vec3]);
}

#[derive(Clone, Debug)]
pub struct PinNode {
    pub visual: PinVisual,
    pub transform: PinTransform,
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    pub sphere: Option<SphereVisual>,
    pub sphere_orientation: Quat,
    pub pins: Vec<PinNode>,
    pub light: PointLight,
    pub stars: Vec<Vec3>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self {
            sphere: None,
            sphere_orientation: Quat::IDENTITY,
            pins: Vec::new(),
            light: PointLight {
                position: Vec3::ZERO,
                intensity: 0.0,
            },
            stars: Vec::new(),
        }
    }
}

impl SceneHost for SceneGraph {
    fn configure_sphere(&mut self, sphere: SphereVisual) {
        self.sphere = Some(sphere);
    }

    fn add_pin(&mut self, pin: PinVisual) -> PinHandle {
        self.pins.push(PinNode {
            visual: pin,
            transform: PinTransform {
                position: Vec3::ZERO,
                orientation: Quat::IDENTITY,
                scale: 1.0,
            },
        });
        PinHandle(self.pins.len() - 1)
    }

    fn set_pin_transform(&mut self, handle: PinHandle, transform: PinTransform) {
        if let Some(node) = self.pins.get_mut(handle.0) {
            node.transform = transform;
        }
    }

    fn set_sphere_orientation(&mut self, orientation: Quat) {
        self.sphere_orientation = orientation;
    }

    fn set_light(&mut self, light: PointLight) {
        self.light = light;
    }

    fn add_stars(&mut self, stars: &[Vec3]) {
        self.stars.extend_from_slice(stars);
    }
}
