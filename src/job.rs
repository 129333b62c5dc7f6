//! Job unit and outcome model.

use crate::{config::DispatcherConfig, partition, trace::TraceEntry};

/// One schedulable group of identical replicas, derived from a single trace
/// entry after partitioning. Immutable once built; each unit is owned by
/// exactly one dispatch task.
#[derive(Debug, Clone)]
pub struct JobUnit {
    /// 0-based position of the source entry in the trace. Sole key
    /// correlating this unit with its teardown command and log lines.
    pub index: usize,
    /// Trace file stem, embedded in resource names.
    pub partition: String,
    /// Container image reference.
    pub image: String,
    /// schedulerName for the generated pods.
    pub scheduler_name: String,
    pub replica_count: u32,
    pub gpu_per_replica: u32,
    /// Seconds to wait before submitting.
    pub start_time: u64,
    /// Seconds each replica sleeps once scheduled.
    pub running_time: u64,
}

impl JobUnit {
    /// Build a unit from a trace entry under the configured partition policy.
    #[must_use]
    pub fn from_entry(index: usize, entry: &TraceEntry, config: &DispatcherConfig) -> Self {
        let alloc = partition::partition(config.mode, entry.gpu_cnt);
        Self {
            index,
            partition: config.partition_name.clone(),
            image: config.image.clone(),
            scheduler_name: config.scheduler_name.clone(),
            replica_count: alloc.replica_count,
            gpu_per_replica: alloc.gpu_per_replica,
            start_time: entry.start_time,
            running_time: entry.running_time,
        }
    }

    /// Resource name shared by the Job, its PodGroup and the group annotation.
    #[must_use]
    pub fn name(&self) -> String {
        format!("job-dispatcher-test-{}-{}", self.partition, self.index)
    }
}

/// Terminal result of one unit's submission attempt. Produced exactly once
/// per unit, after the attempt completes.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub index: usize,
    pub success: bool,
    /// Client output on success, error detail on failure. Only logged.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::{
        config::{DEFAULT_IMAGE, DEFAULT_SCHEDULER_NAME},
        partition::PartitionMode,
    };

    use super::*;

    fn test_config(mode: PartitionMode) -> DispatcherConfig {
        DispatcherConfig::new(
            PathBuf::from("philly.json"),
            mode,
            DEFAULT_IMAGE.to_string(),
            DEFAULT_SCHEDULER_NAME.to_string(),
            PathBuf::from("delete.sh"),
        )
    }

    #[test]
    fn test_unit_name_includes_partition_and_index() {
        let entry = TraceEntry {
            start_time: 0,
            gpu_cnt: 1,
            running_time: 10,
        };
        let unit = JobUnit::from_entry(7, &entry, &test_config(PartitionMode::default()));
        assert_eq!(unit.name(), "job-dispatcher-test-philly-7");
    }

    #[test]
    fn test_unit_applies_partition_policy() {
        let entry = TraceEntry {
            start_time: 5,
            gpu_cnt: 10,
            running_time: 30,
        };
        let unit = JobUnit::from_entry(
            0,
            &entry,
            &test_config(PartitionMode::Packed { ceiling: 8 }),
        );
        assert_eq!(unit.replica_count, 2);
        assert_eq!(unit.gpu_per_replica, 8);
        assert_eq!(unit.start_time, 5);
        assert_eq!(unit.running_time, 30);
    }
}
