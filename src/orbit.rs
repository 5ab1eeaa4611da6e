use crate::constants::*;
use glam::{Quat, Vec2, Vec3};
use globe_core::Camera;

/// Who owns background drags: the camera or the sphere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlMode {
    #[default]
    Orbit,
    DragRotate,
}

impl ControlMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "orbit" => Some(ControlMode::Orbit),
            "drag" | "drag-rotate" => Some(ControlMode::DragRotate),
            _ => None,
        }
    }
}

/// Yaw/pitch/distance camera circling the globe centre.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    min_distance: f32,
    max_distance: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    last_pointer: Option<Vec2>,
    changed: bool,
}

impl OrbitCamera {
    pub fn new(distance: f32, min_distance: f32, max_distance: f32) -> Self {
        let min_distance = min_distance.max(f32::EPSILON);
        let max_distance = max_distance.max(min_distance);
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.clamp(min_distance, max_distance),
            min_distance,
            max_distance,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            last_pointer: None,
            // Report the starting position on the first frame.
            changed: true,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        let rotation = Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
        self.target + rotation * Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            aspect,
            ..Camera::default()
        }
    }

    pub fn begin_drag(&mut self, position: Vec2) {
        self.last_pointer = Some(position);
    }

    pub fn drag_to(&mut self, position: Vec2) {
        let Some(last) = self.last_pointer else {
            return;
        };
        self.last_pointer = Some(position);
        let delta = position - last;
        self.rotate(delta.x, delta.y);
    }

    pub fn end_drag(&mut self) {
        self.last_pointer = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Drag right swings the camera left around the globe; drag down raises
    /// it towards the north pole.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        if !dx_px.is_finite() || !dy_px.is_finite() || (dx_px == 0.0 && dy_px == 0.0) {
            return;
        }
        self.yaw = (self.yaw - dx_px * self.rotate_speed).rem_euclid(std::f32::consts::TAU);
        self.pitch =
            (self.pitch - dy_px * self.rotate_speed).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.changed = true;
    }

    /// Scale the distance by one wheel step. Returns the new distance when
    /// it actually moved.
    pub fn zoom(&mut self, wheel_delta_px: f32) -> Option<f32> {
        if !wheel_delta_px.is_finite() {
            return None;
        }
        let factor = (1.0 + wheel_delta_px * self.zoom_speed).max(0.1);
        let next = (self.distance * factor).clamp(self.min_distance, self.max_distance);
        if (next - self.distance).abs() <= f32::EPSILON {
            return None;
        }
        self.distance = next;
        self.changed = true;
        Some(next)
    }

    /// Eye and distance since the last call, if anything moved.
    pub fn take_change(&mut self) -> Option<(Vec3, f32)> {
        std::mem::take(&mut self.changed).then(|| (self.eye(), self.distance))
    }
}
