// Host-side tests for renderer geometry.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/geometry.rs"]
mod geometry;

use geometry::*;
use glam::{Quat, Vec3, Vec4};
use globe_core::{place, PinNode, PinTransform, PinVisual, PlaneSize};

#[test]
fn sphere_vertices_lie_on_radius_with_outward_normals() {
    let (vertices, indices) = build_sphere(0.5, 32, 32);
    assert_eq!(vertices.len(), 33 * 33);
    assert_eq!(indices.len(), 32 * 32 * 6);
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    for v in &vertices {
        let p = Vec3::from(v.position);
        let n = Vec3::from(v.normal);
        assert!((p.length() - 0.5).abs() < 1e-5);
        assert!((n - p / 0.5).length() < 1e-5);
    }
}

#[test]
fn sphere_triangles_wind_outward() {
    let (vertices, indices) = build_sphere(1.0, 8, 6);
    let mut checked = 0;
    for tri in indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(vertices[i as usize].position));
        let normal = (b - a).cross(c - a);
        if normal.length() < 1e-6 {
            continue; // collapsed at a pole
        }
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid) > 0.0);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn sphere_uvs_line_up_with_pin_anchors() {
    let (vertices, _) = build_sphere(0.5, 24, 12);
    for v in &vertices {
        let [u, t] = v.uv;
        assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&t));
        let lat = 90.0 - t * 180.0;
        let lon = u * 360.0 - 180.0;
        let anchor = place(lat, lon, 0.5, 0.0);
        assert!(
            (anchor - Vec3::from(v.position)).length() < 1e-4,
            "uv {:?} -> {:?}, vertex {:?}",
            v.uv,
            anchor,
            v.position
        );
    }
}

#[test]
fn quad_maps_image_upright() {
    let top_left = QUAD_VERTICES
        .iter()
        .find(|v| v.position[0] < 0.0 && v.position[1] > 0.0)
        .unwrap();
    assert_eq!(top_left.uv, [0.0, 0.0]);
    let bottom_right = QUAD_VERTICES
        .iter()
        .find(|v| v.position[0] > 0.0 && v.position[1] < 0.0)
        .unwrap();
    assert_eq!(bottom_right.uv, [1.0, 1.0]);
}

#[test]
fn degenerate_tessellation_is_raised_to_minimum() {
    let (vertices, _) = build_sphere(1.0, 0, 0);
    assert_eq!(vertices.len(), 4 * 3);
}

#[test]
fn pin_model_composes_sphere_rotation_and_size() {
    let transform = PinTransform {
        position: Vec3::new(0.0, 0.0, 0.5),
        orientation: Quat::IDENTITY,
        scale: 0.5,
    };
    let spin = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let model = pin_model(spin, &transform, 0.15, 0.1);

    let centre = model * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((centre.truncate() - spin * Vec3::new(0.0, 0.0, 0.5)).length() < 1e-6);

    // Half extents of the quad after scaling.
    let corner = (model * Vec4::new(0.5, 0.5, 0.0, 1.0)).truncate() - centre.truncate();
    assert!((corner.y - 0.025).abs() < 1e-6);
    assert!((corner.length() - Vec3::new(0.0375, 0.025, 0.0).length()).abs() < 1e-6);
}

#[test]
fn pin_instances_follow_scene_nodes() {
    let nodes = vec![PinNode {
        visual: PinVisual {
            url: "/a.jpg".into(),
            size: PlaneSize {
                width: 0.15,
                height: 0.09,
            },
        },
        transform: PinTransform {
            position: Vec3::X * 0.5,
            orientation: Quat::IDENTITY,
            scale: 1.0,
        },
    }];
    let instances = pin_instances(Quat::IDENTITY, &nodes, |_| [0.1, 0.2, 0.3]);
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].color, [0.1, 0.2, 0.3, 1.0]);
    assert_eq!(instances[0].model[3], [0.5, 0.0, 0.0, 1.0]);
    assert_eq!(instances[0].model[0][0], 0.15);

    let white = pin_instances(Quat::IDENTITY, &nodes, |node| {
        if node.visual.url == "/a.jpg" {
            [1.0; 3]
        } else {
            [0.0; 3]
        }
    });
    assert_eq!(white[0].color, [1.0; 4]);

    let stars = star_vertices(&[Vec3::ONE, Vec3::Z]);
    assert_eq!(stars[1].position, [0.0, 0.0, 1.0]);
}
