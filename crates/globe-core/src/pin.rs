use crate::config::PinSpec;
use crate::geo::PlaneSize;
use crate::scene::PinHandle;
use glam::{Quat, Vec3};

/// Index of a pin within its globe, in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub usize);

/// An image anchored on the globe.
///
/// Latitude and longitude never change after creation; `anchor` is always
/// recomputed from them.
pub struct Pin {
    spec: PinSpec,
    size: PlaneSize,
    handle: PinHandle,
    pub(crate) anchor: Vec3,
    pub(crate) scale: f32,
    pub(crate) orientation: Quat,
    on_select: Box<dyn FnMut()>,
}

impl Pin {
    pub(crate) fn new(
        spec: PinSpec,
        size: PlaneSize,
        handle: PinHandle,
        anchor: Vec3,
        scale: f32,
        on_select: Box<dyn FnMut()>,
    ) -> Self {
        Self {
            spec,
            size,
            handle,
            anchor,
            scale,
            orientation: Quat::IDENTITY,
            on_select,
        }
    }

    pub fn url(&self) -> &str {
        &self.spec.url
    }

    pub fn latitude(&self) -> f32 {
        self.spec.lat
    }

    pub fn longitude(&self) -> f32 {
        self.spec.lon
    }

    pub fn size(&self) -> PlaneSize {
        self.size
    }

    pub fn handle(&self) -> PinHandle {
        self.handle
    }

    /// Anchor in sphere-local coordinates.
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Billboard orientation in sphere-local coordinates.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub(crate) fn select(&mut self) {
        (self.on_select)();
    }
}

impl std::fmt::Debug for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pin")
            .field("url", &self.spec.url)
            .field("lat", &self.spec.lat)
            .field("lon", &self.spec.lon)
            .field("anchor", &self.anchor)
            .field("scale", &self.scale)
            .finish()
    }
}
