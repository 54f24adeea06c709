//! Arcade configuration, supplied by the host page as an optional JSON object.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Canvas width in canvas units, a multiple of the grid cell
    pub canvas_width: i32,
    /// Canvas height in canvas units, a multiple of the grid cell
    pub canvas_height: i32,
    /// Minimum time between two snake ticks
    pub tick_interval_ms: u32,
    /// Minimum swipe length that counts as a direction
    pub swipe_threshold: f64,
    /// Fixed food placement seed; random when absent
    pub rng_seed: Option<u64>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            rng_seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl ArcadeConfig {
    /// Parse a partial JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ArcadeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_canvas(mut self, width: i32, height: i32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("canvas_width", self.canvas_width), ("canvas_height", self.canvas_height)] {
            if value < GRID_CELL || value % GRID_CELL != 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive multiple of {}, got {}",
                    name, GRID_CELL, value
                )));
            }
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be non-zero".to_string()));
        }

        if self.swipe_threshold.is_nan() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "swipe_threshold must be non-negative, got {}",
                self.swipe_threshold
            )));
        }

        Ok(())
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
