// Host-side tests for the Globe facade driving a retained SceneGraph.

use glam::{Quat, Vec2, Vec3};
use globe_core::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

fn config() -> GlobeConfig {
    GlobeConfig::from_json(
        r#"{
            "texture": "/earth.jpg",
            "canvasContainerId": "globe",
            "sceneBackgroundColor": "0x000b4c",
            "images": []
        }"#,
    )
    .unwrap()
}

fn spec(lat: f32, lon: f32) -> PinSpec {
    PinSpec {
        url: format!("/img/{lat}_{lon}.jpg"),
        width: 400.0,
        height: 300.0,
        lat,
        lon,
    }
}

fn globe() -> Globe {
    Globe::new(&config(), GlobeSettings::default(), SceneGraph::default()).unwrap()
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    (hits, move || h.set(h.get() + 1))
}

const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

fn camera() -> Camera {
    Camera {
        aspect: VIEWPORT.aspect(),
        ..Camera::default()
    }
}

fn centre() -> Vec2 {
    Vec2::new(400.0, 300.0)
}

#[test]
fn new_configures_sphere_and_light() {
    let g = globe();
    let sphere = g.host().sphere.as_ref().unwrap();
    assert_eq!(sphere.radius, 0.5);
    assert_eq!(sphere.texture, "/earth.jpg");
    assert!((sphere.background[2] - 0x4c as f32 / 255.0).abs() < 1e-6);
    assert_eq!(g.host().light.intensity, g.zoom_level().light_intensity);
    assert_eq!(g.host().sphere_orientation, Quat::IDENTITY);
}

#[test]
fn new_rejects_invalid_settings() {
    let settings = GlobeSettings {
        planet_radius: 0.0,
        ..GlobeSettings::default()
    };
    assert!(Globe::new(&config(), settings, SceneGraph::default()).is_err());
}

#[test]
fn add_pin_places_on_surface_and_sizes_quad() {
    let mut g = globe();
    let id = g.add_pin(spec(0.0, 0.0), || {}).unwrap();
    let pin = g.pin(id).unwrap();
    assert!((pin.anchor() - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);
    assert_eq!(pin.size().width, 0.15);
    assert!((pin.size().height - 0.1125).abs() < 1e-6);

    let node = &g.host().pins[pin.handle().0];
    assert_eq!(node.visual.url, "/img/0_0.jpg");
    assert_eq!(node.transform.position, pin.anchor());
    assert_eq!(node.transform.scale, pin.scale());
}

#[test]
fn add_pin_rejects_bad_spec_without_side_effects() {
    let mut g = globe();
    let mut bad = spec(0.0, 0.0);
    bad.width = 0.0;
    assert!(g.add_pin(bad, || {}).is_err());
    assert!(g.add_pin(spec(95.0, 0.0), || {}).is_err());
    assert!(g.add_pin(spec(0.0, 181.0), || {}).is_err());
    assert!(g.pins().is_empty());
    assert!(g.host().pins.is_empty());
}

#[test]
fn pins_face_the_camera() {
    let mut g = globe();
    let id = g.add_pin(spec(20.0, -60.0), || {}).unwrap();
    g.on_drag_delta(35.0, 12.0);
    g.tick(Duration::from_millis(16));

    let pin = g.pin(id).unwrap();
    let world_pos = g.sphere_orientation() * pin.anchor();
    let facing = g.sphere_orientation() * pin.orientation() * Vec3::Z;
    let to_eye = (g.camera_eye() - world_pos).normalize();
    assert!(facing.dot(to_eye) > 0.9999);
}

#[test]
fn tap_on_pin_fires_callback_once() {
    let mut g = globe();
    let (hits, on_select) = counter();
    // lon -90 sits on +Z, straight in front of the default camera.
    let id = g.add_pin(spec(0.0, -90.0), on_select).unwrap();

    assert!(g.on_pointer_down(centre(), VIEWPORT, &camera()));
    assert!(!g.on_pointer_move(centre() + Vec2::new(2.0, -3.0)));
    assert_eq!(g.on_pointer_up(), Some(id));
    assert_eq!(hits.get(), 1);

    assert_eq!(g.on_pointer_up(), None);
    assert_eq!(hits.get(), 1);
}

#[test]
fn drag_from_pin_never_fires() {
    let mut g = globe();
    let (hits, on_select) = counter();
    g.add_pin(spec(0.0, -90.0), on_select).unwrap();

    assert!(g.on_pointer_down(centre(), VIEWPORT, &camera()));
    assert!(g.on_pointer_move(centre() + Vec2::new(0.0, 8.0)));
    assert!(!g.is_armed());
    assert_eq!(g.on_pointer_up(), None);
    assert_eq!(hits.get(), 0);
}

#[test]
fn press_on_background_is_not_armed() {
    let mut g = globe();
    let (hits, on_select) = counter();
    g.add_pin(spec(0.0, -90.0), on_select).unwrap();

    assert!(!g.on_pointer_down(Vec2::new(5.0, 5.0), VIEWPORT, &camera()));
    assert_eq!(g.on_pointer_up(), None);
    assert_eq!(hits.get(), 0);
}

#[test]
fn pin_on_far_side_is_hidden_by_sphere() {
    let mut g = globe();
    let (hits, on_select) = counter();
    g.add_pin(spec(0.0, 90.0), on_select).unwrap();

    assert!(!g.on_pointer_down(centre(), VIEWPORT, &camera()));
    assert_eq!(g.on_pointer_up(), None);
    assert_eq!(hits.get(), 0);
}

#[test]
fn pick_prefers_nearest_pin() {
    let mut g = globe();
    let back = g.add_pin(spec(0.0, 90.0), || {}).unwrap();
    let front = g.add_pin(spec(0.0, -90.0), || {}).unwrap();
    let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), -Vec3::Z);
    assert_eq!(g.pick(&ray), Some(front));
    assert_ne!(g.pick(&ray), Some(back));
}

#[test]
fn zoom_transition_moves_pins_and_light() {
    let mut g = globe();
    let id = g.add_pin(spec(10.0, 30.0), || {}).unwrap();
    let before = g.pin(id).unwrap().anchor().length();

    let eye = Vec3::new(0.0, 0.0, 3.0);
    g.on_camera_changed(eye, 3.0);
    let level = g.zoom_level();
    assert_eq!(level.bucket, 9);

    let pin = g.pin(id).unwrap();
    assert!((pin.anchor().length() - (0.5 + level.radius_offset)).abs() < 1e-5);
    assert!(pin.anchor().length() > before);
    assert_eq!(pin.scale(), level.pin_scale);
    assert_eq!(g.host().light.position, eye);
    assert_eq!(g.host().light.intensity, level.light_intensity);
}

#[test]
fn camera_jitter_does_not_change_level() {
    let mut g = globe();
    g.on_camera_changed(Vec3::new(0.0, 0.0, 1.7), 1.7);
    let level = g.zoom_level();
    for d in [1.72, 1.68, 1.75, 1.65] {
        g.on_camera_changed(Vec3::new(0.0, 0.0, d), d);
        assert_eq!(g.zoom_level(), level);
    }
}

#[test]
fn latitude_policy_ignores_zoom_offset() {
    let settings = GlobeSettings {
        placement_policy: PlacementPolicy::latitude(),
        ..GlobeSettings::default()
    };
    let mut g = Globe::new(&config(), settings, SceneGraph::default()).unwrap();
    let id = g.add_pin(spec(30.0, 0.0), || {}).unwrap();
    let before = g.pin(id).unwrap().anchor();
    g.on_camera_changed(Vec3::new(0.0, 0.0, 4.0), 4.0);
    assert_eq!(g.pin(id).unwrap().anchor(), before);
}

#[test]
fn drag_rotates_sphere_and_host() {
    let mut g = globe();
    g.on_drag_delta(0.0, 20.0);
    let q = g.sphere_orientation();
    assert_ne!(q, Quat::IDENTITY);
    assert_eq!(g.host().sphere_orientation, q);
    assert!((g.rotation().x_shift_total() - 20f32.to_radians()).abs() < 1e-6);
}

#[test]
fn auto_rotation_spins_until_pointer_press() {
    let mut g = globe();
    g.tick(Duration::from_secs(1));
    assert_eq!(g.sphere_orientation(), Quat::IDENTITY);

    g.enable_auto_rotation();
    g.tick(Duration::from_secs(1));
    let expected = Quat::from_rotation_y(6f32.to_radians());
    assert!(g.sphere_orientation().angle_between(expected) < 1e-4);

    g.on_pointer_down(Vec2::new(1.0, 1.0), VIEWPORT, &camera());
    assert!(!g.is_auto_rotating());
    let frozen = g.sphere_orientation();
    g.tick(Duration::from_secs(1));
    assert_eq!(g.sphere_orientation(), frozen);
}

#[test]
fn stars_land_on_shell() {
    let mut g = globe();
    g.add_stars(300, 50.0, 7);
    assert_eq!(g.host().stars.len(), 300);
    assert!(g
        .host()
        .stars
        .iter()
        .all(|s| (s.length() - 50.0).abs() < 1e-3));

    g.add_stars(0, 50.0, 7);
    assert_eq!(g.host().stars.len(), 300);
}

#[test]
fn ticking_without_camera_motion_leaves_scene_unchanged() {
    let mut g = globe();
    g.add_pin(spec(20.0, -60.0), || {}).unwrap();
    g.add_pin(spec(-35.0, 120.0), || {}).unwrap();
    g.on_camera_changed(Vec3::new(0.4, 0.3, 1.6), 1.67);

    g.tick(Duration::from_millis(16));
    let transforms: Vec<PinTransform> = g.host().pins.iter().map(|n| n.transform).collect();
    let light = g.host().light;

    g.tick(Duration::from_millis(16));
    let again: Vec<PinTransform> = g.host().pins.iter().map(|n| n.transform).collect();
    assert_eq!(again, transforms);
    assert_eq!(g.host().light, light);
}

#[test]
fn light_and_pins_track_camera_within_one_bucket() {
    let mut g = globe();
    let id = g.add_pin(spec(15.0, -80.0), || {}).unwrap();
    g.on_camera_changed(Vec3::new(0.0, 0.0, 1.7), 1.7);
    let level = g.zoom_level();

    // Sideways move at almost the same distance: no zoom transition.
    let eye = Vec3::new(0.6, 0.2, 1.55);
    g.on_camera_changed(eye, eye.length());
    assert_eq!(g.zoom_level(), level);
    g.tick(Duration::from_millis(16));

    assert_eq!(g.host().light.position, eye);
    assert_eq!(g.host().light.intensity, level.light_intensity);

    let pin = g.pin(id).unwrap();
    let node = &g.host().pins[pin.handle().0];
    let world_pos = g.sphere_orientation() * node.transform.position;
    let facing = g.sphere_orientation() * node.transform.orientation * Vec3::Z;
    assert!(facing.dot((eye - world_pos).normalize()) > 0.9999);
}
