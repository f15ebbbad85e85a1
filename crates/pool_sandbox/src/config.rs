//! Sandbox configuration

use entity_pool::config::{Config, ConfigError, PoolConfig};
use serde::{Deserialize, Serialize};

/// Sandbox configuration, loaded from TOML or RON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Simulation settings
    pub simulation: SimulationConfig,
    
    /// Pool sizing
    pub pools: PoolConfig,
}

impl Config for SandboxConfig {}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of fixed steps to run
    pub ticks: u32,
    
    /// Physics time step (seconds)
    pub timestep: f32,
    
    /// Seconds between volleys
    pub fire_interval: f32,
    
    /// Bullets per volley
    pub volley_size: u32,
    
    /// Half-angle of the volley cone (degrees)
    pub spread_degrees: f32,
    
    /// Bullet speed (units per second)
    pub bullet_speed: f32,
    
    /// Bullet lifetime (seconds)
    pub bullet_lifetime: f32,
    
    /// How long an explosion stays visible (seconds, zero for the default)
    pub explosion_duration: f32,
    
    /// Bullets leaving this radius explode
    pub arena_radius: f32,
    
    /// Seed for the volley spread
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            timestep: 1.0 / 60.0,
            fire_interval: 0.1,
            volley_size: 3,
            spread_degrees: 30.0,
            bullet_speed: 40.0,
            bullet_lifetime: 3.0,
            explosion_duration: 0.5,
            arena_radius: 50.0,
            seed: 7,
        }
    }
}

impl SandboxConfig {
    /// Load from `path`, or fall back to defaults when no path is given
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }
    
    /// Check values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        let positive = [
            ("simulation.timestep", sim.timestep),
            ("simulation.fire_interval", sim.fire_interval),
            ("simulation.bullet_speed", sim.bullet_speed),
            ("simulation.arena_radius", sim.arena_radius),
        ];
        if let Some((field, value)) = positive.iter().find(|(_, value)| !(value.is_finite() && *value > 0.0)) {
            return Err(ConfigError::Invalid {
                field: (*field).to_string(),
                reason: format!("must be positive, got {value}"),
            });
        }
        self.pools.validate()
    }
}
