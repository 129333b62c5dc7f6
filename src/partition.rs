//! GPU demand partitioning.
//!
//! Maps one abstract GPU demand into a schedulable shape: how many identical
//! replicas, and how many GPUs each replica requests.

/// Default per-replica GPU ceiling in packed mode.
pub const DEFAULT_GPU_CEILING: u32 = 8;

/// How a GPU demand is split across replicas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionMode {
    /// One replica per requested GPU; forces fine-grained scheduling pressure.
    SingleGpu,
    /// Replicas are packed up to a per-replica GPU ceiling.
    Packed { ceiling: u32 },
}

impl Default for PartitionMode {
    fn default() -> Self {
        Self::Packed {
            ceiling: DEFAULT_GPU_CEILING,
        }
    }
}

/// Output of partitioning: the replica shape of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub replica_count: u32,
    pub gpu_per_replica: u32,
}

/// Split a GPU demand into a replica shape. Pure; `gpu_cnt` must be positive
/// (the trace loader enforces this).
#[must_use]
pub fn partition(mode: PartitionMode, gpu_cnt: u32) -> Allocation {
    match mode {
        PartitionMode::SingleGpu => Allocation {
            replica_count: gpu_cnt,
            gpu_per_replica: 1,
        },
        PartitionMode::Packed { ceiling } => Allocation {
            replica_count: gpu_cnt.div_ceil(ceiling),
            // Every replica in the unit requests the same GPU count, even when
            // gpu_cnt is not a multiple of the ceiling. The absence of a
            // remainder-sized final replica is observable scheduler-load
            // behavior, not an oversight.
            gpu_per_replica: gpu_cnt.min(ceiling),
        },
    }
}
