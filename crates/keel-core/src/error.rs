use std::fmt;

/// Rejected shape parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    NonPositiveDimension { name: &'static str, value: f32 },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimension { name, value } => {
                write!(f, "shape {name} must be positive and finite, got {value}")
            },
        }
    }
}

impl std::error::Error for ShapeError {}

/// Rejected body construction parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyError {
    NonPositiveMass(f32),
    NonFinitePosition,
    InvalidShape(ShapeError),
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass(m) => write!(f, "body mass must be positive and finite, got {m}"),
            Self::NonFinitePosition => write!(f, "body position must be finite"),
            Self::InvalidShape(e) => write!(f, "invalid body shape: {e}"),
        }
    }
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidShape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for BodyError {
    fn from(e: ShapeError) -> Self {
        Self::InvalidShape(e)
    }
}

/// Configuration that failed to read, parse or validate.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Invalid { field: &'static str, reason: String },
    Parse(String),
    Read { path: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { field, reason } => write!(f, "{field}: {reason}"),
            Self::Parse(m) => write!(f, "config parse error: {m}"),
            Self::Read { path, reason } => write!(f, "cannot read {path}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
