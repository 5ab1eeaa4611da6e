// Front-end tuning for the web globe: page contract, camera controller,
// starfield and renderer defaults.

// Page contract
pub const DEFAULT_CONFIG_PATH: &str = "/my-globe-config.json";
pub const CONFIG_DATASET_KEY: &str = "myGlobeConfig"; // data-my-globe-config on <body>
pub const CONTROLS_DATASET_KEY: &str = "myGlobeControls"; // "orbit" or "drag"
pub const PRIMARY_COLOR_PROPERTY: &str = "--primary-color";
pub const PIN_SELECTED_EVENT: &str = "pin-selected";

// Orbit camera
pub const ORBIT_MIN_DISTANCE: f32 = 0.7;
pub const ORBIT_MAX_DISTANCE: f32 = 3.0;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pixel of drag
pub const ORBIT_ZOOM_SPEED: f32 = 0.001; // fraction of distance per wheel pixel
pub const ORBIT_PITCH_LIMIT: f32 = 1.45; // stays short of the poles

// Wheel normalisation (WheelEvent.deltaMode)
pub const WHEEL_LINE_HEIGHT_PX: f32 = 16.0;

// Starfield shells added once placement finishes: (count, radius, seed)
pub const STAR_SHELLS: [(usize, f32, u64); 4] = [
    (300, 50.0, 0x5eed_0001),
    (100, 32.0, 0x5eed_0002),
    (100, 28.0, 0x5eed_0003),
    (100, 30.0, 0x5eed_0004),
];

// Renderer
pub const PIN_BASE_COLOR: [f32; 3] = [0.93, 0.93, 0.96];
pub const STAR_COLOR: [f32; 3] = [0.9, 0.92, 1.0];
pub const SPHERE_RINGS: u32 = 32;
pub const INITIAL_PIN_CAPACITY: usize = 64;
pub const MAX_TEXTURE_DIMENSION: u32 = 8192; // WebGPU default max_texture_dimension_2d
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after the tab was hidden
