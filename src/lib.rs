#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! Trace-driven synthetic workload dispatcher.
//!
//! Reads a trace of job descriptions (arrival offset, GPU demand, run
//! duration) and submits matching Kubernetes Job manifests at each job's
//! arrival offset, so a cluster scheduler's placement and bin-packing
//! behavior can be observed under realistic load.

pub mod config;
pub mod dispatch;
pub mod job;
pub mod manifest;
pub mod partition;
pub mod submit;
pub mod teardown;
pub mod trace;

pub use config::DispatcherConfig;
pub use dispatch::{DispatchReport, Dispatcher};
pub use job::{DispatchOutcome, JobUnit};
pub use partition::{Allocation, PartitionMode};
pub use submit::{KubectlSubmitter, Submit, SubmitError};
pub use teardown::{TeardownError, TeardownRecorder};
pub use trace::{TraceEntry, TraceError};
