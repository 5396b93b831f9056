//! Configuration for the elbow router

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a router configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read router config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse router config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Tuning constants for elbow routing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Maximum number of kernel iterations per route
    pub step_limit: usize,

    /// Stub length used when an endpoint has no inferred heading
    pub min_dongle_size: f64,

    /// Padding used to place the stub clear of a bound shape
    pub dongle_extension: f64,

    /// Padding of the obstacle boxes avoided mid-route
    pub hitbox_extension: f64,

    /// How far the heading search cones reach past the enlarged box corners
    pub search_cone_multiplier: f64,

    /// Collapse collinear points in the returned route
    pub simplify: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            step_limit: 50,
            min_dongle_size: 30.0,
            dongle_extension: 50.0,
            hitbox_extension: 5.0,
            search_cone_multiplier: 2.0,
            simplify: true,
        }
    }
}

impl RouterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a configuration from a TOML string; missing keys keep defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the kernel step limit
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = limit;
        self
    }

    /// Set the stub length for endpoints without a heading
    pub fn with_min_dongle_size(mut self, size: f64) -> Self {
        self.min_dongle_size = size;
        self
    }

    /// Set the dongle padding
    pub fn with_dongle_extension(mut self, extension: f64) -> Self {
        self.dongle_extension = extension;
        self
    }

    /// Set the obstacle box padding
    pub fn with_hitbox_extension(mut self, extension: f64) -> Self {
        self.hitbox_extension = extension;
        self
    }

    /// Enable or disable route simplification
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Distance past which a forward hit shortens the segment instead of
    /// turning away
    pub(crate) fn shorten_threshold(&self) -> f64 {
        self.dongle_extension - self.hitbox_extension + 1.0
    }
}
