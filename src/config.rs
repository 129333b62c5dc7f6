//! Dispatcher configuration.
//!
//! Built once from the command line at startup and passed by reference into
//! the loader, the partition policy and the scheduler.

use std::path::PathBuf;

use crate::partition::PartitionMode;

/// Default container image for generated jobs.
pub const DEFAULT_IMAGE: &str = "registry.sensetime.com/cloudnative4ai/nvidia/cuda-vector-add";

/// Default schedulerName assigned to generated pods.
pub const DEFAULT_SCHEDULER_NAME: &str = "sense-rubber";

/// Runtime configuration for one dispatch run.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Path to the JSON trace file.
    pub trace_path: PathBuf,
    /// Active GPU partition policy.
    pub mode: PartitionMode,
    /// Container image for generated jobs.
    pub image: String,
    /// schedulerName assigned to generated pods.
    pub scheduler_name: String,
    /// Trace file stem, embedded in every generated resource name.
    pub partition_name: String,
    /// Path of the generated teardown script.
    pub teardown_path: PathBuf,
}

impl DispatcherConfig {
    /// Build the configuration; the partition name is derived from the trace
    /// file's stem.
    #[must_use]
    pub fn new(
        trace_path: PathBuf,
        mode: PartitionMode,
        image: String,
        scheduler_name: String,
        teardown_path: PathBuf,
    ) -> Self {
        let partition_name = trace_path.file_stem().map_or_else(
            || "trace".to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        );
        Self {
            trace_path,
            mode,
            image,
            scheduler_name,
            partition_name,
            teardown_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(trace: &str) -> DispatcherConfig {
        DispatcherConfig::new(
            PathBuf::from(trace),
            PartitionMode::default(),
            DEFAULT_IMAGE.to_string(),
            DEFAULT_SCHEDULER_NAME.to_string(),
            PathBuf::from("delete.sh"),
        )
    }

    #[test]
    fn test_partition_name_is_trace_stem() {
        assert_eq!(config_for("traces.json").partition_name, "traces");
        assert_eq!(config_for("/data/philly-2017.json").partition_name, "philly-2017");
    }

    #[test]
    fn test_partition_name_without_extension() {
        assert_eq!(config_for("mytrace").partition_name, "mytrace");
    }
}
