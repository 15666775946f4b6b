//! Simulation configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use tileworld_core::{AgentConfig, GridDimensions};

use crate::error::ConfigError;

/// Everything needed to build and run a [`crate::Simulation`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    pub agents: usize,
    pub ticks: u64,
    pub seed: u64,
    pub agent: AgentConfig,
    /// Fraction of cells that start as permanent obstacles.
    pub obstacle_density: f64,
    /// Per-tick probability of spawning each kind of transient item.
    pub spawn_rate: f64,
    /// Ticks a spawned item survives before it disappears.
    pub lifetime: u64,
    pub summary_path: Option<PathBuf>,
    pub log_to_file: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            agents: Self::DEFAULT_AGENTS,
            ticks: Self::DEFAULT_TICKS,
            seed: Self::DEFAULT_SEED,
            agent: AgentConfig::default(),
            obstacle_density: Self::DEFAULT_OBSTACLE_DENSITY,
            spawn_rate: Self::DEFAULT_SPAWN_RATE,
            lifetime: Self::DEFAULT_LIFETIME,
            summary_path: None,
            log_to_file: false,
        }
    }
}

impl SimConfig {
    pub const DEFAULT_WIDTH: u32 = 50;
    pub const DEFAULT_HEIGHT: u32 = 50;
    pub const DEFAULT_AGENTS: usize = 6;
    pub const DEFAULT_TICKS: u64 = 5000;
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_OBSTACLE_DENSITY: f64 = 0.05;
    pub const DEFAULT_SPAWN_RATE: f64 = 0.2;
    pub const DEFAULT_LIFETIME: u64 = 100;

    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.width, self.height)
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TILEWORLD_WIDTH`, `TILEWORLD_HEIGHT` - Grid size (default: 50 x 50)
    /// - `TILEWORLD_AGENTS` - Number of agents (default: 6)
    /// - `TILEWORLD_TICKS` - Ticks to simulate (default: 5000)
    /// - `TILEWORLD_SEED` - World RNG seed (default: 42)
    /// - `TILEWORLD_FUEL` - Tank size; also rescales refuel tolerance and threshold (default: 500)
    /// - `TILEWORLD_MAX_CARRIED` - Carrying capacity (default: 3)
    /// - `TILEWORLD_SENSOR_RADIUS` - Sensor radius (default: 3)
    /// - `TILEWORLD_OBSTACLE_DENSITY` - Initial obstacle fraction (default: 0.05)
    /// - `TILEWORLD_SPAWN_RATE` - Per-tick spawn probability (default: 0.2)
    /// - `TILEWORLD_LIFETIME` - Item lifetime in ticks (default: 100)
    /// - `TILEWORLD_SUMMARY_PATH` - Write the run summary as JSON here (optional)
    /// - `TILEWORLD_LOG_TO_FILE` - Also log to the platform cache directory (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SimConfig::from_env`], reading variables through `read`.
    pub fn from_lookup(read: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(width) = parse(read("TILEWORLD_WIDTH")) {
            config.width = width;
        }
        if let Some(height) = parse(read("TILEWORLD_HEIGHT")) {
            config.height = height;
        }
        if let Some(agents) = parse(read("TILEWORLD_AGENTS")) {
            config.agents = agents;
        }
        if let Some(ticks) = parse(read("TILEWORLD_TICKS")) {
            config.ticks = ticks;
        }
        if let Some(seed) = parse(read("TILEWORLD_SEED")) {
            config.seed = seed;
        }

        // Agent tunables
        if let Some(fuel) = parse(read("TILEWORLD_FUEL")) {
            config.agent = AgentConfig::from_default_fuel(fuel);
        }
        if let Some(max_carried) = parse(read("TILEWORLD_MAX_CARRIED")) {
            config.agent.max_carried = max_carried;
        }
        if let Some(radius) = parse(read("TILEWORLD_SENSOR_RADIUS")) {
            config.agent.sensor_radius = radius;
        }

        // World dynamics
        if let Some(density) = parse(read("TILEWORLD_OBSTACLE_DENSITY")) {
            config.obstacle_density = density;
        }
        if let Some(rate) = parse(read("TILEWORLD_SPAWN_RATE")) {
            config.spawn_rate = rate;
        }
        if let Some(lifetime) = parse(read("TILEWORLD_LIFETIME")) {
            config.lifetime = lifetime;
        }

        config.summary_path = read("TILEWORLD_SUMMARY_PATH").map(PathBuf::from);

        if let Some(enable) = parse::<bool>(read("TILEWORLD_LOG_TO_FILE")) {
            config.log_to_file = enable;
        } else if read("TILEWORLD_LOG_TO_FILE").is_some() {
            // Accept a bare `TILEWORLD_LOG_TO_FILE=` as "true"
            config.log_to_file = true;
        }

        config
    }

    /// Rejects configurations the world generator cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.agents == 0 {
            return Err(ConfigError::NoAgents);
        }
        if !(0.0..1.0).contains(&self.obstacle_density) {
            return Err(ConfigError::Probability {
                name: "obstacle_density",
                value: self.obstacle_density,
            });
        }
        if !(0.0..=1.0).contains(&self.spawn_rate) {
            return Err(ConfigError::Probability {
                name: "spawn_rate",
                value: self.spawn_rate,
            });
        }
        if self.lifetime == 0 {
            return Err(ConfigError::ZeroLifetime);
        }
        if self.agent.max_carried == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // Otherwise an agent parked on the fuel resource in an emergency
        // never refuels.
        if self.agent.refuel_tolerance <= self.agent.fuel_safety_margin {
            return Err(ConfigError::RefuelTolerance {
                tolerance: self.agent.refuel_tolerance,
                margin: self.agent.fuel_safety_margin,
            });
        }
        Ok(())
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = SimConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SimConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_overrides() {
        let config = SimConfig::from_lookup(lookup(&[
            ("TILEWORLD_WIDTH", "20"),
            ("TILEWORLD_AGENTS", "2"),
            ("TILEWORLD_FUEL", "200"),
            ("TILEWORLD_SENSOR_RADIUS", "2"),
            ("TILEWORLD_SPAWN_RATE", "0.5"),
            ("TILEWORLD_SUMMARY_PATH", "out/summary.json"),
            ("TILEWORLD_LOG_TO_FILE", ""),
        ]));

        assert_eq!(config.width, 20);
        assert_eq!(config.height, SimConfig::DEFAULT_HEIGHT);
        assert_eq!(config.agents, 2);
        assert_eq!(config.agent.default_fuel, 200);
        assert_eq!(config.agent.refuel_tolerance, 190);
        assert_eq!(config.agent.fuel_threshold, 20);
        assert_eq!(config.agent.sensor_radius, 2);
        assert_eq!(config.spawn_rate, 0.5);
        assert_eq!(config.summary_path, Some(PathBuf::from("out/summary.json")));
        assert!(config.log_to_file);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = SimConfig::from_lookup(lookup(&[
            ("TILEWORLD_WIDTH", "wide"),
            ("TILEWORLD_LOG_TO_FILE", "false"),
        ]));
        assert_eq!(config.width, SimConfig::DEFAULT_WIDTH);
        assert!(!config.log_to_file);
    }

    #[test]
    fn validation_catches_bad_values() {
        let config = SimConfig {
            agents: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoAgents));

        let config = SimConfig {
            spawn_rate: 1.5,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability {
                name: "spawn_rate",
                ..
            })
        ));
    }

    #[test]
    fn small_tank_is_rejected() {
        // 15 - 10 leaves a tolerance of 5, under the default margin of 10.
        let config = SimConfig::from_lookup(lookup(&[("TILEWORLD_FUEL", "15")]));
        assert_eq!(
            config.validate(),
            Err(ConfigError::RefuelTolerance {
                tolerance: 5,
                margin: 10
            })
        );

        let config = SimConfig::from_lookup(lookup(&[("TILEWORLD_FUEL", "21")]));
        assert!(config.validate().is_ok());
    }
}
