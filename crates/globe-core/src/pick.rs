use glam::{Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along the ray to the first sphere surface in front of the
/// origin. A ray starting inside the sphere reports the exit point.
#[inline]
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Hit test against a double-sided rectangle centred at `center`, lying in
/// the local XY plane of `orientation`.
#[inline]
pub fn ray_quad(ray: &Ray, center: Vec3, orientation: Quat, half_extents: Vec2) -> Option<f32> {
    let normal = orientation * Vec3::Z;
    let denom = normal.dot(ray.direction);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = normal.dot(center - ray.origin) / denom;
    if t < 0.0 {
        return None;
    }
    let local = orientation.inverse() * (ray.at(t) - center);
    (local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y).then_some(t)
}
