/// Agent tunables: carrying capacity, fuel policy thresholds and sensing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Maximum number of objects carried at once.
    pub max_carried: u32,
    /// Fuel level an agent starts with and refuels to.
    pub default_fuel: u32,
    /// Standing on a fuel resource triggers a refuel only below this level.
    pub refuel_tolerance: u32,
    /// Below this level the agent heads for fuel unconditionally.
    pub fuel_threshold: u32,
    /// Minimum fuel that must remain after reaching the fuel resource.
    pub fuel_safety_margin: u32,
    /// Radius of the square sensor footprint.
    pub sensor_radius: u32,
}

impl AgentConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_CARRIED: u32 = 3;
    pub const DEFAULT_FUEL: u32 = 500;
    pub const DEFAULT_FUEL_SAFETY_MARGIN: u32 = 10;
    pub const DEFAULT_SENSOR_RADIUS: u32 = 3;

    /// Gap between a full tank and the refuel tolerance.
    pub const REFUEL_SLACK: u32 = 10;
    /// Emergency threshold as a fraction (1/N) of a full tank.
    pub const THRESHOLD_DIVISOR: u32 = 10;

    pub fn new() -> Self {
        Self::from_default_fuel(Self::DEFAULT_FUEL)
    }

    /// Derives refuel tolerance and emergency threshold from a tank size.
    pub fn from_default_fuel(default_fuel: u32) -> Self {
        Self {
            max_carried: Self::DEFAULT_MAX_CARRIED,
            default_fuel,
            refuel_tolerance: default_fuel.saturating_sub(Self::REFUEL_SLACK),
            fuel_threshold: default_fuel / Self::THRESHOLD_DIVISOR,
            fuel_safety_margin: Self::DEFAULT_FUEL_SAFETY_MARGIN,
            sensor_radius: Self::DEFAULT_SENSOR_RADIUS,
        }
    }

    #[must_use]
    pub fn with_max_carried(mut self, max_carried: u32) -> Self {
        self.max_carried = max_carried;
        self
    }

    #[must_use]
    pub fn with_refuel_tolerance(mut self, refuel_tolerance: u32) -> Self {
        self.refuel_tolerance = refuel_tolerance;
        self
    }

    #[must_use]
    pub fn with_fuel_threshold(mut self, fuel_threshold: u32) -> Self {
        self.fuel_threshold = fuel_threshold;
        self
    }

    #[must_use]
    pub fn with_fuel_safety_margin(mut self, fuel_safety_margin: u32) -> Self {
        self.fuel_safety_margin = fuel_safety_margin;
        self
    }

    #[must_use]
    pub fn with_sensor_radius(mut self, sensor_radius: u32) -> Self {
        self.sensor_radius = sensor_radius;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
