use thiserror::Error;

/// Everything that can go wrong while setting up a globe.
///
/// Once the animation loop runs, no operation returns an error.
#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("missing required configuration field `{0}`")]
    MissingField(&'static str),
    #[error("pin size must be positive, got {width}x{height}")]
    InvalidPinSize { width: f32, height: f32 },
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f32),
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f32),
    #[error("cannot parse colour `{0}`")]
    InvalidColor(String),
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        name: &'static str,
        reason: &'static str,
    },
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GlobeError>;
