use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::EnvError;

/// Configuration for the environment, fixed at construction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square grid
    pub grid_size: usize,
    /// Pixels per cell, for external presenters only
    pub cell_size: u32,
    /// Ticks per second for paced drivers; never affects game logic
    pub tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 12,
            cell_size: 20,
            tick_rate: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(6)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30)
    }

    /// Builder-style tick rate override
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Total number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Side length of a rendered frame in pixels
    pub fn frame_size(&self) -> u32 {
        self.grid_size as u32 * self.cell_size
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.grid_size < 2 {
            return Err(EnvError::InvalidConfig(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }

        if self.grid_size > i32::MAX as usize / 2 {
            return Err(EnvError::InvalidConfig(format!(
                "grid_size {} is too large",
                self.grid_size
            )));
        }

        if self.cell_size == 0 {
            return Err(EnvError::InvalidConfig(
                "cell_size must be at least 1".to_string(),
            ));
        }

        if self.tick_rate == 0 {
            return Err(EnvError::InvalidConfig(
                "tick_rate must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }
}
