// Host-side tests for configuration parsing and validation.

use globe_core::*;

const FULL: &str = r##"{
    "texture": "/textures/earth.jpg",
    "canvasContainerId": "globe-canvas",
    "sceneBackgroundColor": "#102030",
    "primaryColor": "#ff8800",
    "images": [
        {"url": "/img/paris.jpg", "width": 2001, "height": 1215, "lat": 48.85, "lon": 2.35}
    ]
}"##;

#[test]
fn parses_full_config() {
    let c = GlobeConfig::from_json(FULL).unwrap();
    assert_eq!(c.texture, "/textures/earth.jpg");
    assert_eq!(c.canvas_container_id, "globe-canvas");
    assert_eq!(c.scene_background_color, BackgroundColor(0x102030));
    assert_eq!(c.primary_color.as_deref(), Some("#ff8800"));
    assert_eq!(c.images.len(), 1);
    assert_eq!(c.images[0].width, 2001.0);
}

#[test]
fn optional_fields_default() {
    let c = GlobeConfig::from_json(r#"{"texture": "t.jpg", "canvasContainerId": "c"}"#).unwrap();
    assert!(c.images.is_empty());
    assert_eq!(c.primary_color, None);
    assert_eq!(c.scene_background_color, BackgroundColor::default());
    assert_eq!(c.scene_background_color.0, 0x000b4c);
}

#[test]
fn background_colour_forms() {
    assert_eq!(BackgroundColor::parse("0x000b4c").unwrap().0, 0x000b4c);
    assert_eq!(BackgroundColor::parse("#FFFFFF").unwrap().0, 0xffffff);
    assert_eq!(BackgroundColor::parse("2892").unwrap().0, 2892);
    assert!(BackgroundColor::parse("blue").is_err());
    assert!(BackgroundColor::parse("0x1000000").is_err());

    let c = GlobeConfig::from_json(
        r#"{"texture": "t", "canvasContainerId": "c", "sceneBackgroundColor": 2892}"#,
    )
    .unwrap();
    assert_eq!(c.scene_background_color.0, 2892);

    let rgb = BackgroundColor(0xff8000).to_rgb_f32();
    assert_eq!(rgb, [1.0, 128.0 / 255.0, 0.0]);
}

#[test]
fn missing_required_fields_are_reported() {
    assert!(matches!(
        GlobeConfig::from_json(r#"{"texture": "t"}"#),
        Err(GlobeError::MissingField("canvasContainerId"))
    ));
    assert!(matches!(
        GlobeConfig::from_json(r#"{"canvasContainerId": "c", "texture": "  "}"#),
        Err(GlobeError::MissingField("texture"))
    ));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(
        GlobeConfig::from_json("{not json"),
        Err(GlobeError::Json(_))
    ));
    assert!(GlobeConfig::from_json(
        r#"{"texture": "t", "canvasContainerId": "c", "images": [{"url": "x"}]}"#
    )
    .is_err());
}

#[test]
fn bad_pins_are_left_to_placement() {
    let text = r#"{"texture": "t", "canvasContainerId": "c",
        "images": [
            {"url": "lat", "width": 1, "height": 1, "lat": -91, "lon": 0},
            {"url": "size", "width": 0, "height": 1, "lat": 0, "lon": 0},
            {"url": "ok", "width": 1, "height": 1, "lat": 0, "lon": 0}
        ]}"#;
    let c = GlobeConfig::from_json(text).unwrap();
    assert_eq!(c.images.len(), 3);
    assert!(matches!(
        c.images[0].validate(),
        Err(GlobeError::InvalidLatitude(_))
    ));
    assert!(matches!(
        c.images[1].validate(),
        Err(GlobeError::InvalidPinSize { .. })
    ));
    assert!(c.images[2].validate().is_ok());
}

#[test]
fn default_settings_are_valid() {
    let s = GlobeSettings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.placement_policy, PlacementPolicy::ZoomOffset);
    assert_eq!(s.placement_interval.as_millis(), 200);

    let negative = GlobeSettings {
        selection_threshold_px: -1.0,
        ..GlobeSettings::default()
    };
    assert!(negative.validate().is_err());
}
