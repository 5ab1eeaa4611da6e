//! One globe instance: pins, sphere orientation and the interaction state
//! machines, driving a `SceneHost`.

use crate::camera::{Camera, Viewport};
use crate::config::{GlobeConfig, GlobeSettings, PinSpec};
use crate::constants::{CAMERA_START_DISTANCE, PICK_DEPTH_TOLERANCE};
use crate::error::Result;
use crate::geo::plane_size;
use crate::orientation::{local_billboard, OrientationSync};
use crate::pick::{ray_quad, ray_sphere, Ray};
use crate::pin::{Pin, PinId};
use crate::rotation::{DragRotationController, RotationStep};
use crate::scene::{PinTransform, PinVisual, PointLight, SceneGraph, SceneHost, SphereVisual};
use crate::selection::PointerSelection;
use crate::stars;
use crate::zoom::{ZoomAdapter, ZoomLevel};
use glam::{Quat, Vec2, Vec3};
use std::time::Duration;

pub struct Globe<H: SceneHost = SceneGraph> {
    settings: GlobeSettings,
    host: H,
    pins: Vec<Pin>,
    zoom: ZoomAdapter,
    rotation: DragRotationController,
    selection: PointerSelection,
    sphere_orientation: Quat,
    camera_eye: Vec3,
    auto_rotate: bool,
}

impl<H: SceneHost> Globe<H> {
    /// Validate everything up front and set up the sphere and light. Pins
    /// are added afterwards, usually through `SequentialPlacement`.
    pub fn new(config: &GlobeConfig, settings: GlobeSettings, mut host: H) -> Result<Self> {
        config.validate()?;
        settings.validate()?;

        host.configure_sphere(SphereVisual {
            radius: settings.planet_radius,
            texture: config.texture.clone(),
            background: config.scene_background_color.to_rgb_f32(),
        });
        host.set_sphere_orientation(Quat::IDENTITY);

        let zoom = ZoomAdapter::new(settings.zoom.clone());
        let camera_eye = Vec3::new(0.0, 0.0, CAMERA_START_DISTANCE);
        host.set_light(PointLight {
            position: camera_eye,
            intensity: zoom.level().light_intensity,
        });

        Ok(Self {
            rotation: DragRotationController::new(settings.rotation.clone()),
            selection: PointerSelection::new(settings.selection_threshold_px),
            settings,
            host,
            pins: Vec::new(),
            zoom,
            sphere_orientation: Quat::IDENTITY,
            camera_eye,
            auto_rotate: false,
        })
    }

    pub fn settings(&self) -> &GlobeSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.get(id.0)
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        self.zoom.level()
    }

    pub fn rotation(&self) -> &DragRotationController {
        &self.rotation
    }

    pub fn sphere_orientation(&self) -> Quat {
        self.sphere_orientation
    }

    pub fn camera_eye(&self) -> Vec3 {
        self.camera_eye
    }

    pub fn is_armed(&self) -> bool {
        self.selection.is_armed()
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    pub fn enable_auto_rotation(&mut self) {
        self.auto_rotate = true;
    }

    pub fn disable_auto_rotation(&mut self) {
        self.auto_rotate = false;
    }

    /// Anchor an image on the sphere. `on_select` runs on a confirmed tap.
    pub fn add_pin(&mut self, spec: PinSpec, on_select: impl FnMut() + 'static) -> Result<PinId> {
        spec.validate()?;
        let size = plane_size(spec.width, spec.height, self.settings.pin_max_dimension)?;
        let level = self.zoom.level();
        let anchor = self.anchor_for(&spec, level.radius_offset);
        let handle = self.host.add_pin(PinVisual {
            url: spec.url.clone(),
            size,
        });
        let mut pin = Pin::new(spec, size, handle, anchor, level.pin_scale, Box::new(on_select));
        pin.orientation = local_billboard(anchor, self.sphere_orientation, self.camera_eye);
        self.host.set_pin_transform(handle, transform_of(&pin));

        let id = PinId(self.pins.len());
        log::debug!(
            "[place] pin {} at ({:.1}, {:.1}) {}",
            id.0,
            pin.latitude(),
            pin.longitude(),
            pin.url()
        );
        self.pins.push(pin);
        Ok(id)
    }

    /// Scatter `count` background stars on a shell of `radius`.
    pub fn add_stars(&mut self, count: usize, radius: f32, seed: u64) {
        if count == 0 {
            return;
        }
        let points = stars::scatter_seeded(count, radius, seed);
        self.host.add_stars(&points);
    }

    /// Entry point for the camera controller: new eye position and distance
    /// to the orbit target.
    pub fn on_camera_changed(&mut self, eye: Vec3, distance: f32) {
        if eye.is_finite() {
            self.camera_eye = eye;
        }
        if let Some(level) = self.zoom.on_distance_changed(distance) {
            self.apply_zoom_level(level);
        }
    }

    /// Entry point for sphere dragging, in pixels between consecutive
    /// pointer samples. Vertical travel tilts about X, horizontal spins
    /// about Y.
    pub fn on_drag_delta(&mut self, dx: f32, dy: f32) {
        let step = self.rotation.on_drag(dy.to_radians(), dx.to_radians());
        self.rotate_sphere(step);
        self.sync_orientation();
    }

    /// Returns true when the press landed on a pin and the gesture is now
    /// owned by the selection state machine.
    pub fn on_pointer_down(&mut self, screen: Vec2, viewport: Viewport, camera: &Camera) -> bool {
        self.auto_rotate = false;
        let ray = camera.ray_from_ndc(viewport.to_ndc(screen));
        let hit = self.pick(&ray);
        log::debug!("[pick] press at ({:.0}, {:.0}) -> {:?}", screen.x, screen.y, hit);
        self.selection.press(hit, screen)
    }

    /// Returns true when this move turned an armed tap into a drag.
    pub fn on_pointer_move(&mut self, screen: Vec2) -> bool {
        self.selection.moved(screen)
    }

    /// Fires the armed pin's callback, if any, and reports which pin fired.
    pub fn on_pointer_up(&mut self) -> Option<PinId> {
        let id = self.selection.release()?;
        let pin = self.pins.get_mut(id.0)?;
        log::info!("[pick] selected pin {} {}", id.0, pin.url());
        pin.select();
        Some(id)
    }

    pub fn on_pointer_cancel(&mut self) {
        self.selection.cancel();
    }

    /// Nearest pin under the ray, unless the sphere itself is closer.
    pub fn pick(&self, ray: &Ray) -> Option<PinId> {
        let mut best: Option<(PinId, f32)> = None;
        for (i, pin) in self.pins.iter().enumerate() {
            let center = self.sphere_orientation * pin.anchor;
            let orientation = self.sphere_orientation * pin.orientation;
            let size = pin.size();
            let half = Vec2::new(size.width, size.height) * pin.scale * 0.5;
            if let Some(t) = ray_quad(ray, center, orientation, half) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((PinId(i), t)),
                }
            }
        }
        let (id, pin_t) = best?;
        match ray_sphere(ray, Vec3::ZERO, self.settings.planet_radius) {
            Some(sphere_t) if sphere_t + PICK_DEPTH_TOLERANCE < pin_t => None,
            _ => Some(id),
        }
    }

    /// One animation frame.
    pub fn tick(&mut self, dt: Duration) {
        if self.auto_rotate {
            let angle = self.settings.auto_rotation_rad_per_sec * dt.as_secs_f32();
            if angle != 0.0 {
                self.sphere_orientation =
                    (Quat::from_rotation_y(angle) * self.sphere_orientation).normalize();
                self.host.set_sphere_orientation(self.sphere_orientation);
            }
        }
        self.sync_orientation();
    }

    fn sync_orientation(&mut self) {
        OrientationSync::apply(
            &mut self.pins,
            self.sphere_orientation,
            self.camera_eye,
            self.zoom.level().light_intensity,
            &mut self.host,
        );
    }

    fn rotate_sphere(&mut self, step: RotationStep) {
        if step.is_zero() {
            return;
        }
        let rx = Quat::from_rotation_x(step.x_angle);
        let ry = Quat::from_rotation_y(step.y_angle);
        self.sphere_orientation = (ry * rx * self.sphere_orientation).normalize();
        self.host.set_sphere_orientation(self.sphere_orientation);
    }

    fn apply_zoom_level(&mut self, level: ZoomLevel) {
        let policy = self.settings.placement_policy;
        let radius = self.settings.planet_radius;
        for pin in &mut self.pins {
            pin.anchor = policy.anchor(pin.latitude(), pin.longitude(), radius, level.radius_offset);
            pin.scale = level.pin_scale;
        }
        // Light intensity follows the new level inside the sync.
        self.sync_orientation();
    }

    fn anchor_for(&self, spec: &PinSpec, radius_offset: f32) -> Vec3 {
        self.settings.placement_policy.anchor(
            spec.lat,
            spec.lon,
            self.settings.planet_radius,
            radius_offset,
        )
    }
}

fn transform_of(pin: &Pin) -> PinTransform {
    PinTransform {
        position: pin.anchor,
        orientation: pin.orientation,
        scale: pin.scale,
    }
}
