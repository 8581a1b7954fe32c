use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vector::Vector;

/// Gravity acceleration (units/s^2, +y is down).
pub const GRAVITY: Vector = Vector::new(0.0, 500.0);
/// Per-step velocity multiplier.
pub const LINEAR_DAMPING: f32 = 0.995;
/// Per-step angular velocity multiplier.
pub const ANGULAR_DAMPING: f32 = 0.98;
/// Fraction of penetration removed by positional correction each step.
pub const CORRECTION_FACTOR: f32 = 0.8;
/// Bodies at or below this speed count as idle for scene sleep.
pub const SLEEP_LINEAR_THRESHOLD: f32 = 1.0;
/// Bodies at or below this angular speed count as idle for scene sleep.
pub const SLEEP_ANGULAR_THRESHOLD: f32 = 0.1;
/// Seconds the whole scene must stay idle before it is frozen.
pub const SLEEP_TIMEOUT: f32 = 1.0;
/// Floor contacts below this speed are "settling" and get the righting torque.
pub const SETTLE_LINEAR_THRESHOLD: f32 = 40.0;
/// Floor contacts below this angular speed are "settling".
pub const SETTLE_ANGULAR_THRESHOLD: f32 = 2.5;
/// Righting torque scale, multiplied by body mass.
pub const STABILIZATION_TORQUE_GAIN: f32 = 250.0;
/// Damping applied to spin and horizontal velocity while settling.
pub const SETTLE_DAMPING: f32 = 0.8;
/// Tangential speeds under this skip friction.
pub const TANGENT_EPSILON: f32 = 1e-6;
pub const DEFAULT_RESTITUTION: f32 = 0.8;
pub const DEFAULT_FRICTION: f32 = 0.2;
/// Floor impacts slower than the speed gravity adds over this many steps are
/// absorbed instead of bounced.
pub const REST_CONTACT_STEPS: f32 = 2.0;

/// Physics file read when `KEEL_PHYSICS_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/physics.toml";

/// Tunable world constants, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: Vector,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub correction_factor: f32,
    pub sleep_linear_threshold: f32,
    pub sleep_angular_threshold: f32,
    pub sleep_timeout: f32,
    pub settle_linear_threshold: f32,
    pub settle_angular_threshold: f32,
    pub stabilization_torque_gain: f32,
    pub settle_damping: f32,
    pub tangent_epsilon: f32,
    /// Restitution given to bodies built from this config.
    pub default_restitution: f32,
    /// Friction coefficient given to bodies built from this config.
    pub default_friction: f32,
    pub rest_contact_steps: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            linear_damping: LINEAR_DAMPING,
            angular_damping: ANGULAR_DAMPING,
            correction_factor: CORRECTION_FACTOR,
            sleep_linear_threshold: SLEEP_LINEAR_THRESHOLD,
            sleep_angular_threshold: SLEEP_ANGULAR_THRESHOLD,
            sleep_timeout: SLEEP_TIMEOUT,
            settle_linear_threshold: SETTLE_LINEAR_THRESHOLD,
            settle_angular_threshold: SETTLE_ANGULAR_THRESHOLD,
            stabilization_torque_gain: STABILIZATION_TORQUE_GAIN,
            settle_damping: SETTLE_DAMPING,
            tangent_epsilon: TANGENT_EPSILON,
            default_restitution: DEFAULT_RESTITUTION,
            default_friction: DEFAULT_FRICTION,
            rest_contact_steps: REST_CONTACT_STEPS,
        }
    }
}

impl PhysicsConfig {
    /// Same defaults with gravity switched off. Handy for contact tests.
    pub fn weightless() -> Self {
        Self {
            gravity: Vector::ZERO,
            ..Self::default()
        }
    }

    /// Check every field for values that would break the step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::invalid("gravity", "must be finite"));
        }
        for (field, value) in [
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
            ("settle_damping", self.settle_damping),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::invalid(field, format!("must be in (0, 1], got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.correction_factor) {
            return Err(ConfigError::invalid(
                "correction_factor",
                format!("must be in [0, 1], got {}", self.correction_factor),
            ));
        }
        for (field, value) in [
            ("sleep_linear_threshold", self.sleep_linear_threshold),
            ("sleep_angular_threshold", self.sleep_angular_threshold),
            ("settle_linear_threshold", self.settle_linear_threshold),
            ("settle_angular_threshold", self.settle_angular_threshold),
            ("stabilization_torque_gain", self.stabilization_torque_gain),
            ("tangent_epsilon", self.tangent_epsilon),
            ("default_restitution", self.default_restitution),
            ("default_friction", self.default_friction),
            ("rest_contact_steps", self.rest_contact_steps),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        if !(self.sleep_timeout.is_finite() && self.sleep_timeout > 0.0) {
            return Err(ConfigError::invalid(
                "sleep_timeout",
                format!("must be positive, got {}", self.sleep_timeout),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the TOML file at `path`.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Load from `KEEL_PHYSICS_CONFIG` or `config/physics.toml`, falling back
    /// to defaults when neither yields a valid config. A missing default
    /// file is silent; any failure on an explicit path is logged.
    pub fn load() -> Self {
        let explicit = std::env::var("KEEL_PHYSICS_CONFIG").ok();
        let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        match Self::from_file(path) {
            Ok(cfg) => {
                tracing::info!("Loaded physics configuration from {path}");
                cfg
            },
            Err(ConfigError::Read { .. }) if explicit.is_none() => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            },
        }
    }
}
