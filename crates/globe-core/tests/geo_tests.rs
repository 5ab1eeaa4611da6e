// Host-side tests for geographic anchoring and pin sizing.

use globe_core::*;

#[test]
fn place_stays_on_sphere_for_whole_coordinate_range() {
    let radius = 0.5;
    let offset = 0.03;
    let mut lat = -90.0_f32;
    while lat <= 90.0 {
        let mut lon = -180.0_f32;
        while lon <= 180.0 {
            let p = place(lat, lon, radius, offset);
            assert!(
                (p.length() - (radius + offset)).abs() < 1e-5,
                "lat={lat} lon={lon} len={}",
                p.length()
            );
            lon += 7.5;
        }
        lat += 7.5;
    }
}

#[test]
fn place_origin_meridian_lands_on_positive_x() {
    let p = place(0.0, 0.0, 0.5, 0.0);
    assert!((p - glam::Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn place_north_pole_and_east_longitude() {
    let pole = place(90.0, 0.0, 1.0, 0.0);
    assert!((pole - glam::Vec3::Y).length() < 1e-6);

    // Longitude is negated: 90°E ends up on -Z.
    let east = place(0.0, 90.0, 1.0, 0.0);
    assert!((east - glam::Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
}

#[test]
fn plane_size_landscape_image() {
    let s = plane_size(2001.0, 1215.0, 0.15).unwrap();
    assert_eq!(s.width, 0.15);
    assert!((s.height - 0.15 * (1215.0 / 2001.0)).abs() < 1e-6);
    assert!((s.height - 0.0911).abs() < 1e-3);
}

#[test]
fn plane_size_keeps_aspect_and_longer_side() {
    for (w, h) in [(640.0, 480.0), (480.0, 640.0), (1.0, 1000.0), (3.0, 2.0)] {
        let s = plane_size(w, h, 0.2).unwrap();
        assert_eq!(s.width.max(s.height), 0.2);
        assert!((s.width / s.height - w / h).abs() < 1e-4, "{w}x{h}");
    }
}

#[test]
fn plane_size_square_is_max_both_ways() {
    let s = plane_size(512.0, 512.0, 0.15).unwrap();
    assert_eq!(s.width, 0.15);
    assert_eq!(s.height, 0.15);
}

#[test]
fn plane_size_rejects_zero_area() {
    assert!(matches!(
        plane_size(0.0, 100.0, 0.15),
        Err(GlobeError::InvalidPinSize { .. })
    ));
    assert!(matches!(
        plane_size(100.0, -1.0, 0.15),
        Err(GlobeError::InvalidPinSize { .. })
    ));
    assert!(plane_size(f32::NAN, 1.0, 0.15).is_err());
    assert!(plane_size(1.0, 1.0, 0.0).is_err());
}

#[test]
fn latitude_policy_nudges_away_from_equator() {
    let policy = PlacementPolicy::LatitudeOffset { y_offset: 0.02 };
    let north = policy.anchor(10.0, 0.0, 0.5, 99.0);
    let south = policy.anchor(-10.0, 0.0, 0.5, 99.0);
    let base_n = place(10.0, 0.0, 0.5, 0.0);
    let base_s = place(-10.0, 0.0, 0.5, 0.0);
    assert!((north.y - (base_n.y + 0.02)).abs() < 1e-6);
    assert!((south.y - (base_s.y - 0.02)).abs() < 1e-6);
    // Zoom offset is ignored by this policy.
    assert!((north.x - base_n.x).abs() < 1e-6);
}

#[test]
fn zoom_policy_uses_radius_offset() {
    let p = PlacementPolicy::ZoomOffset.anchor(0.0, 0.0, 0.5, 0.1);
    assert!((p.x - 0.6).abs() < 1e-6);
}
