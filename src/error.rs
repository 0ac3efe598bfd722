//! Error types for configuration and platform setup
//!
//! The simulation itself has no failure modes; these only surface while
//! loading tuning data or wiring the browser.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Tuning JSON could not be parsed
    Parse(String),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// A required global (window, document) is unavailable
    NoGlobal(&'static str),
    /// Element lookup by id failed
    MissingElement(String),
    /// Element exists but has the wrong type
    WrongElementType { id: String, expected: &'static str },
    /// WebGPU surface/adapter/device setup failed
    Gpu(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGlobal(name) => write!(f, "no global `{name}` available"),
            Self::MissingElement(id) => write!(f, "element #{id} not found"),
            Self::WrongElementType { id, expected } => {
                write!(f, "element #{id} is not a {expected}")
            }
            Self::Gpu(msg) => write!(f, "gpu setup failed: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}
