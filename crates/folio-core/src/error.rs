use thiserror::Error;

/// Errors raised while building or overriding a [`crate::LandingConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("invalid override `{key}={value}`")]
    InvalidOverride { key: String, value: String },
}

/// Errors raised by the tuning surface when a parameter cannot be applied.
#[derive(Debug, Error, PartialEq)]
pub enum TuneError {
    #[error("pass `{pass}` has no parameter `{name}`")]
    UnknownParam { pass: &'static str, name: String },
    #[error("parameter `{name}` expects a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
    },
    #[error("parameter `{name}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f32,
        min: f32,
        max: f32,
    },
}
