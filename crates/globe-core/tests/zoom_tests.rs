// Host-side tests for zoom bucketing and its debounce.

use globe_core::*;

fn settings(min_distance: f32, bucket_width: f32) -> ZoomSettings {
    ZoomSettings {
        min_distance,
        bucket_width,
        ..ZoomSettings::default()
    }
}

#[test]
fn distance_sequence_recomputes_only_past_a_bucket_width() {
    let mut zoom = ZoomAdapter::new(settings(1.0, 0.5));
    let mut buckets = Vec::new();
    let mut fired = Vec::new();
    for d in [1.0, 1.2, 1.6, 2.4] {
        fired.push(zoom.on_distance_changed(d).is_some());
        buckets.push(zoom.bucket());
    }
    assert_eq!(buckets, vec![0, 0, 1, 2]);
    assert_eq!(fired, vec![false, false, true, true]);
}

#[test]
fn small_changes_never_fire() {
    let mut zoom = ZoomAdapter::new(settings(1.0, 0.5));
    assert!(zoom.on_distance_changed(2.0).is_some());
    for d in [2.1, 1.9, 2.49, 1.51, 2.0] {
        assert!(zoom.on_distance_changed(d).is_none(), "fired at {d}");
    }
    assert_eq!(zoom.previous_distance(), 2.0);
}

#[test]
fn bucket_is_monotonic_when_zooming_out() {
    let mut zoom = ZoomAdapter::new(settings(0.7, 0.25));
    let mut prev = zoom.bucket();
    let mut d = 0.7;
    while d < 5.0 {
        zoom.on_distance_changed(d);
        assert!(zoom.bucket() >= prev);
        prev = zoom.bucket();
        d += 0.3;
    }
    assert!(prev > 0);
}

#[test]
fn distances_below_minimum_clamp_to_bucket_zero() {
    let mut zoom = ZoomAdapter::new(settings(1.0, 0.5));
    assert_eq!(zoom.bucket_for(0.1), 0);
    assert_eq!(zoom.bucket_for(-10.0), 0);
    assert!(zoom.on_distance_changed(0.2).is_some());
    assert_eq!(zoom.bucket(), 0);
}

#[test]
fn non_finite_distance_is_ignored() {
    let mut zoom = ZoomAdapter::new(settings(1.0, 0.5));
    assert!(zoom.on_distance_changed(f32::NAN).is_none());
    assert!(zoom.on_distance_changed(f32::INFINITY).is_none());
    assert_eq!(zoom.previous_distance(), 1.0);
}

#[test]
fn level_derives_light_scale_and_offset() {
    let s = ZoomSettings {
        min_distance: 1.0,
        bucket_width: 0.5,
        min_intensity: 1.0,
        light_step: 0.5,
        min_size: 0.05,
        size_step: 0.025,
        max_size: 0.15,
        min_offset: 0.01,
        offset_step: 0.02,
    };
    let level = ZoomLevel::for_bucket(&s, 2);
    assert_eq!(level.bucket, 2);
    assert!((level.light_intensity - 2.0).abs() < 1e-6);
    assert!((level.pin_scale - 0.1 / 0.15).abs() < 1e-6);
    assert!((level.radius_offset - 0.05).abs() < 1e-6);
}

#[test]
fn invalid_bucket_width_is_rejected() {
    assert!(settings(1.0, 0.0).validate().is_err());
    assert!(settings(1.0, -0.5).validate().is_err());
    assert!(settings(1.0, 0.5).validate().is_ok());
}

#[test]
fn default_pin_scale_tops_out_at_one() {
    let mut zoom = ZoomAdapter::new(ZoomSettings::default());
    assert_eq!(
        zoom.bucket_for(constants::ZOOM_MAX_DISTANCE),
        constants::ZOOM_MAX_BUCKET
    );

    let mut d = constants::ZOOM_MIN_DISTANCE;
    while d <= constants::ZOOM_MAX_DISTANCE {
        if let Some(level) = zoom.on_distance_changed(d) {
            assert!(level.pin_scale <= 1.0 + 1e-6, "scale {} at {d}", level.pin_scale);
        }
        d += constants::ZOOM_BUCKET_WIDTH;
    }

    let far = ZoomLevel::for_bucket(zoom.settings(), constants::ZOOM_MAX_BUCKET);
    assert!((far.pin_scale - 1.0).abs() < 1e-5);
    let widest = far.pin_scale * constants::PIN_MAX_DIMENSION;
    assert!((widest - constants::PIN_MAX_DIMENSION).abs() < 1e-6);
}
