// Shared tuning constants used by the engine and the web frontend.

// Scene layout
pub const PLANET_RADIUS: f32 = 0.5; // sphere radius in world units
pub const SPHERE_SEGMENTS: u32 = 32; // tessellation hint for the renderer
pub const SCENE_BACKGROUND_COLOR: u32 = 0x000b4c;
pub const MESH_COLOR: u32 = 0xffffff;
pub const AMBIENT_LIGHT_INTENSITY: f32 = 0.35;

// Camera
pub const CAMERA_START_DISTANCE: f32 = 1.7;
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Pins
pub const PIN_MAX_DIMENSION: f32 = 0.15; // longer side of a pin at scale 1
pub const PIN_LATITUDE_Y_OFFSET: f32 = 0.02; // only used by the latitude placement policy

// Zoom buckets
pub const ZOOM_MIN_DISTANCE: f32 = 0.7;
pub const ZOOM_MAX_DISTANCE: f32 = 3.0; // farthest camera the web front-end allows
pub const ZOOM_BUCKET_WIDTH: f32 = 0.25;
pub const ZOOM_MAX_BUCKET: u32 = 9; // floor((ZOOM_MAX_DISTANCE - ZOOM_MIN_DISTANCE) / ZOOM_BUCKET_WIDTH)
pub const ZOOM_MIN_LIGHT_INTENSITY: f32 = 0.8;
pub const ZOOM_LIGHT_STEP: f32 = 0.12;
pub const ZOOM_MIN_PIN_SIZE: f32 = 0.05;
// Reaches PIN_MAX_DIMENSION (scale 1) exactly at ZOOM_MAX_BUCKET.
pub const ZOOM_PIN_SIZE_STEP: f32 = (PIN_MAX_DIMENSION - ZOOM_MIN_PIN_SIZE) / ZOOM_MAX_BUCKET as f32;
pub const ZOOM_MIN_RADIUS_OFFSET: f32 = 0.0;
pub const ZOOM_RADIUS_OFFSET_STEP: f32 = 0.01;

// Drag rotation (accumulators are in radians of pointer travel)
pub const X_AXIS_SHIFT_LIMIT: f32 = 5.0;
pub const X_AXIS_FIRST_THRESHOLD: f32 = 2.0;
pub const X_AXIS_SECOND_THRESHOLD: f32 = 4.0;
pub const Y_AXIS_SHIFT_LIMIT: f32 = 1.8;
pub const AXIS_ROTATION_RAD_DIVIDER: f32 = 5.0;

// Interaction
pub const SELECTION_MOVE_THRESHOLD_PX: f32 = 5.0;
pub const PICK_DEPTH_TOLERANCE: f32 = 1e-3; // pins resting on the surface still win against the sphere
pub const PLACEMENT_INTERVAL_MS: u64 = 200;
pub const AUTO_ROTATION_RAD_PER_SEC: f32 = 6.0 * std::f32::consts::PI / 180.0;
