use serde::Deserialize;

use keel_core::{ConfigError, PhysicsConfig, SpawnSpec};

/// Driver configuration, loaded from `keel.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Region width in world units.
    pub width: f32,
    /// Region height; the floor sits at `y = height`.
    pub height: f32,
    /// Fixed step in seconds.
    pub dt: f32,
    pub max_ticks: usize,
    /// Seed for spawn torques. Random when unset.
    pub seed: Option<u64>,
    pub physics: PhysicsConfig,
    /// Bodies spawned before the first tick.
    pub scene: Vec<SpawnSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            dt: 0.016,
            max_ticks: 2000,
            seed: None,
            physics: PhysicsConfig::default(),
            scene: Vec::new(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("width", self.width), ("height", self.height), ("dt", self.dt)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::invalid("max_ticks", "must be > 0"));
        }
        for (i, spec) in self.scene.iter().enumerate() {
            if !(spec.mass.is_finite() && spec.mass > 0.0) {
                return Err(ConfigError::invalid(
                    "scene",
                    format!("entry {i}: mass must be positive, got {}", spec.mass),
                ));
            }
            if !(0.0..=self.width).contains(&spec.x) || !(0.0..=self.height).contains(&spec.y) {
                return Err(ConfigError::invalid(
                    "scene",
                    format!("entry {i}: ({}, {}) lies outside the region", spec.x, spec.y),
                ));
            }
        }
        self.physics.validate()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `keel.toml` if it exists, then apply env var overrides.
    /// `KEEL_PHYSICS_CONFIG`, when set, points at a separate physics file.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("keel.toml") {
            Ok(content) => match toml::from_str::<SimConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from keel.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse keel.toml: {e}, using defaults");
                    SimConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No keel.toml found, using defaults");
                SimConfig::default()
            },
        };
        // A standalone physics file replaces the [physics] table.
        if std::env::var("KEEL_PHYSICS_CONFIG").is_ok() {
            config.physics = PhysicsConfig::load();
        }
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `KEEL_*` overrides read through `lookup`. Unparseable values
    /// are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("KEEL_WIDTH")
            && let Ok(n) = val.parse::<f32>()
        {
            self.width = n;
        }
        if let Some(val) = lookup("KEEL_HEIGHT")
            && let Ok(n) = val.parse::<f32>()
        {
            self.height = n;
        }
        if let Some(val) = lookup("KEEL_DT")
            && let Ok(n) = val.parse::<f32>()
        {
            self.dt = n;
        }
        if let Some(val) = lookup("KEEL_MAX_TICKS")
            && let Ok(n) = val.parse::<usize>()
        {
            self.max_ticks = n;
        }
        if let Some(val) = lookup("KEEL_SEED")
            && let Ok(n) = val.parse::<u64>()
        {
            self.seed = Some(n);
        }
    }
}
