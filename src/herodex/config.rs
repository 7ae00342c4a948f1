//! # Configuration
//!
//! Herodex configuration is managed by [`confique`], which handles layered loading
//! from environment variables, an optional TOML file, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `HERODEX_READ_LATENCY_MS`, `HERODEX_PAGE_SIZE`, etc.
//! 2. **Config file**: the TOML file passed to [`HerodexConfig::load`], if any.
//! 3. **Compiled defaults**: built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `read_latency_ms` | `800` | Simulated latency of list / get / find |
//! | `write_latency_ms` | `1000` | Simulated latency of add / update / remove |
//! | `busy_watchdog_ms` | `2000` | Busy indicator auto-stop interval |
//! | `search_debounce_ms` | `300` | Search quiescence window |
//! | `page_size` | `5` | Initial page size |
//! | `page_size_options` | `[5, 10, 25]` | Page sizes offered by the paging control |

use std::path::Path;
use std::time::Duration;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::paging::PageState;

/// Configuration for herodex, optionally stored in `herodex.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HerodexConfig {
    /// Latency of read operations on the mock store, in milliseconds.
    #[config(env = "HERODEX_READ_LATENCY_MS", default = 800)]
    pub read_latency_ms: u64,

    /// Latency of mutations on the mock store, in milliseconds.
    #[config(env = "HERODEX_WRITE_LATENCY_MS", default = 1000)]
    pub write_latency_ms: u64,

    /// After this many milliseconds without a `stop()`, the busy flag clears itself.
    #[config(env = "HERODEX_BUSY_WATCHDOG_MS", default = 2000)]
    pub busy_watchdog_ms: u64,

    #[config(env = "HERODEX_SEARCH_DEBOUNCE_MS", default = 300)]
    pub search_debounce_ms: u64,

    #[config(env = "HERODEX_PAGE_SIZE", default = 5)]
    pub page_size: usize,

    #[config(default = [5, 10, 25])]
    pub page_size_options: Vec<usize>,
}

impl Default for HerodexConfig {
    fn default() -> Self {
        Self {
            read_latency_ms: 800,
            write_latency_ms: 1000,
            busy_watchdog_ms: 2000,
            search_debounce_ms: 300,
            page_size: 5,
            page_size_options: vec![5, 10, 25],
        }
    }
}

impl HerodexConfig {
    /// Load configuration from the environment and an optional TOML file.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    pub fn read_latency(&self) -> Duration {
        Duration::from_millis(self.read_latency_ms)
    }

    pub fn write_latency(&self) -> Duration {
        Duration::from_millis(self.write_latency_ms)
    }

    pub fn busy_watchdog(&self) -> Duration {
        Duration::from_millis(self.busy_watchdog_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// The page state a fresh [`crate::paging::PageWindow`] starts from.
    pub fn initial_page_state(&self) -> PageState {
        PageState::new(self.page_size, self.page_size_options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = HerodexConfig::default();
        assert_eq!(config.read_latency(), Duration::from_millis(800));
        assert_eq!(config.write_latency(), Duration::from_millis(1000));
        assert_eq!(config.busy_watchdog(), Duration::from_millis(2000));
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_declared_defaults_match_default_impl() {
        let loaded = HerodexConfig::builder().load().unwrap();
        assert_eq!(loaded, HerodexConfig::default());
    }

    #[test]
    fn test_initial_page_state_from_defaults() {
        let state = HerodexConfig::default().initial_page_state();
        assert_eq!(state.page_index, 0);
        assert_eq!(state.page_size, 5);
        assert_eq!(state.page_size_options, vec![5, 10, 25]);
        assert_eq!(state.total_items, 0);
    }

    #[test]
    fn test_zero_page_size_is_floored() {
        let config = HerodexConfig {
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(config.initial_page_state().page_size, 1);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "read_latency_ms = 10").unwrap();
        writeln!(file, "page_size_options = [2, 4]").unwrap();

        let config = HerodexConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.read_latency_ms, 10);
        assert_eq!(config.page_size_options, vec![2, 4]);
        // Untouched keys keep their compiled defaults
        assert_eq!(config.write_latency_ms, 1000);
    }
}
