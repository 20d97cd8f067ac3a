use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;

use serde::Deserialize;

use crate::Error;

/// Section of the config document holding the miner settings.
pub const CONFIG_SECTION: &str = "sha256bmb";

/// Miner settings, read from the `"sha256bmb"` section of a JSON config.
///
/// ```
/// use sha256bmb::MinerConfig;
///
/// let config = MinerConfig::from_json_str(
///     r#"{ "sha256bmb": { "cpu": { "enabled": true, "threads": 2 } } }"#,
/// ).unwrap();
///
/// assert_eq!(config.cpu().resolved_threads(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    pub(crate) cpu: CpuConfig,
}

/// CPU worker settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    pub(crate) enabled: bool,
    pub(crate) threads: i32,
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig {
            enabled: true,
            threads: 0,
        }
    }
}

#[derive(Deserialize)]
struct Document {
    #[serde(rename = "sha256bmb", default)]
    section: MinerConfig,
}

impl MinerConfig {
    /// Creates a new default config.
    pub fn new() -> Self {
        MinerConfig::default()
    }

    /// Parse a JSON config document.
    ///
    /// A document without the `"sha256bmb"` section gives the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let doc: Document = serde_json::from_str(json)?;
        debug!("Parsed config: {:?}", doc.section);
        Ok(doc.section)
    }

    /// Read and parse a JSON config file, such as `config.sha256bmb.json`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("Reading config from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// CPU worker settings.
    pub fn cpu(&self) -> &CpuConfig {
        &self.cpu
    }

    /// Replace the CPU worker settings.
    pub fn set_cpu(mut self, cpu: CpuConfig) -> Self {
        self.cpu = cpu;
        self
    }
}

impl CpuConfig {
    /// Creates a new default config.
    pub fn new() -> Self {
        CpuConfig::default()
    }

    /// Whether CPU workers should run.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Turn CPU workers on or off.
    ///
    /// Defaults to `true`.
    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Configured thread count. Zero or negative means one per core.
    pub fn threads(&self) -> i32 {
        self.threads
    }

    /// Set the number of worker threads.
    ///
    /// Defaults to `0`, one thread per available core.
    pub fn set_threads(mut self, threads: i32) -> Self {
        self.threads = threads;
        self
    }

    /// Number of worker threads to start.
    pub fn resolved_threads(&self) -> usize {
        if self.threads > 0 {
            return self.threads as usize;
        }

        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}
