use thiserror::Error;

/// Failures while resolving a [`Settings`](crate::Settings) snapshot.
///
/// The simulation itself never fails; everything that can go wrong happens
/// once, up front, when caller-supplied overrides are merged over defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid color `{value}` for `{field}` (expected #rgb or #rrggbb)")]
    InvalidColor { field: &'static str, value: String },
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("malformed settings overrides: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while constructing a [`BackgroundAnimation`](crate::BackgroundAnimation).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("viewport {width}x{height} is not finite")]
    InvalidViewport { width: f32, height: f32 },
}
