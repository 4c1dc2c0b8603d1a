//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::ResolvedConfig;
use crate::core::modules::ModuleLayout;
use crate::core::state::App;

/// Creates a test App with the default layout and configuration.
pub fn test_app() -> App {
    App::new(ModuleLayout::default(), test_config())
}

/// Default configuration without touching the environment or home directory.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        log_level: log::LevelFilter::Off,
        log_file: None,
        base_pad_bits: 32,
        xor_pad_bits: 32,
        strict_boolean: false,
        kmap_variables: 3,
    }
}
