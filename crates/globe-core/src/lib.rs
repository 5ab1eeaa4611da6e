//! Interactive placement and camera-adaptation engine for a globe carrying
//! geo-anchored image pins.

pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod globe;
pub mod orientation;
pub mod pick;
pub mod pin;
pub mod placement;
pub mod rotation;
pub mod scene;
pub mod selection;
pub mod stars;
pub mod zoom;

pub use camera::*;
pub use config::*;
pub use error::*;
pub use geo::*;
pub use globe::*;
pub use orientation::*;
pub use pick::*;
pub use pin::*;
pub use placement::*;
pub use rotation::*;
pub use scene::*;
pub use selection::*;
pub use zoom::*;
