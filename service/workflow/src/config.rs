use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

/// Runtime knobs for the orchestration services, loadable from an optional
/// YAML file plus `WORKFLOW_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestratorConfig {
    /// Attempts for an allocate-and-insert operation before an
    /// `AllocationConflict` surfaces to the caller.
    #[serde(default = "OrchestratorConfig::default_max_allocation_retries")]
    pub max_allocation_retries: u32,
    /// Upper bound of the jittered backoff between attempts.
    #[serde(default = "OrchestratorConfig::default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl OrchestratorConfig {
    fn default_max_allocation_retries() -> u32 {
        3
    }

    fn default_retry_backoff_ms() -> u64 {
        50
    }

    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::new(path, FileFormat::Yaml).required(false));
        }
        let config = builder
            .add_source(Environment::with_prefix("WORKFLOW").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_allocation_retries: Self::default_max_allocation_retries(),
            retry_backoff_ms: Self::default_retry_backoff_ms(),
        }
    }
}
