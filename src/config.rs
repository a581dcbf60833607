//! Configuration for SCBF
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for encode/decode operations
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Compression Configuration
    // -------------------------------------------------------------------------
    /// zlib compression level for column data blocks (0 = none, 9 = best)
    pub compression_level: u32,

    // -------------------------------------------------------------------------
    // CSV Configuration
    // -------------------------------------------------------------------------
    /// Field delimiter for tabular-text input/output
    pub delimiter: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compression_level: 6,
            delimiter: b',',
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the zlib compression level (clamped to 0..=9)
    pub fn compression_level(mut self, level: u32) -> Self {
        self.config.compression_level = level.min(9);
        self
    }

    /// Set the CSV field delimiter
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
