//! Timed dispatch of job units.
//!
//! One task per unit: sleep until the unit's arrival offset, render its
//! manifest, submit it, report the outcome. Concurrency is unordered and
//! unbounded; the completion channel is the only join point.

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;

use crate::{
    config::DispatcherConfig,
    job::{DispatchOutcome, JobUnit},
    manifest,
    submit::Submit,
    teardown::TeardownRecorder,
    trace::TraceEntry,
};

/// Tally of a completed dispatch run.
#[derive(Debug)]
pub struct DispatchReport {
    /// Number of units derived from the trace.
    pub total: usize,
    /// Units whose submission succeeded.
    pub succeeded: usize,
    /// Units whose submission failed. Failures never abort the run.
    pub failed: usize,
}

/// The dispatch scheduler.
pub struct Dispatcher<S: Submit> {
    config: DispatcherConfig,
    submitter: Arc<S>,
    recorder: TeardownRecorder,
}

impl<S: Submit> Dispatcher<S> {
    #[must_use]
    pub fn new(config: DispatcherConfig, submitter: S, recorder: TeardownRecorder) -> Self {
        Self {
            config,
            submitter: Arc::new(submitter),
            recorder,
        }
    }

    /// Dispatch every trace entry and wait for all units to reach a terminal
    /// state. A unit's failure is logged and counted; it never delays or
    /// cancels sibling units and never propagates out of this call.
    pub async fn run(self, entries: &[TraceEntry]) -> DispatchReport {
        let total = entries.len();
        let (tx, mut rx) = mpsc::unbounded_channel::<DispatchOutcome>();

        for (index, entry) in entries.iter().enumerate() {
            tracing::info!(
                "load job {}: startTime {}, gpuCnt {}, runningTime {}",
                index,
                entry.start_time,
                entry.gpu_cnt,
                entry.running_time
            );

            let unit = JobUnit::from_entry(index, entry, &self.config);

            // Deletion command goes on record before the unit's timer starts.
            if let Err(e) = self.recorder.record(&unit) {
                tracing::warn!("failed to record teardown for job {index}: {e}");
            }

            let submitter = Arc::clone(&self.submitter);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = dispatch_unit(unit, submitter.as_ref()).await;
                let _ = tx.send(outcome);
            });
        }
        drop(tx);

        // The script is complete on disk before any unit is waited on, so an
        // interrupted run still leaves a usable cleanup artifact.
        if let Err(e) = self.recorder.finalize() {
            tracing::warn!("failed to finalize teardown script: {e}");
        }

        // Join barrier: the channel closes once every task has reported.
        let mut succeeded = 0;
        let mut failed = 0;
        while let Some(outcome) = rx.recv().await {
            if outcome.success {
                succeeded += 1;
            } else {
                failed += 1;
            }
        }

        DispatchReport {
            total,
            succeeded,
            failed,
        }
    }
}

/// Drive one unit from Waiting through Submitting to its terminal state.
async fn dispatch_unit<S: Submit>(unit: JobUnit, submitter: &S) -> DispatchOutcome {
    tokio::time::sleep(Duration::from_secs(unit.start_time)).await;

    tracing::info!(
        "dispatch job {} [{} pods * {} GPU] at {}",
        unit.name(),
        unit.replica_count,
        unit.gpu_per_replica,
        unit.start_time
    );

    let manifest = manifest::render(&unit);
    match submitter.submit(&manifest).await {
        Ok(output) => {
            tracing::info!("dispatch job {} success: {}", unit.index, output.trim_end());
            DispatchOutcome {
                index: unit.index,
                success: true,
                message: output,
            }
        }
        Err(e) => {
            tracing::error!("dispatch job {} failed: {e}", unit.index);
            DispatchOutcome {
                index: unit.index,
                success: false,
                message: e.to_string(),
            }
        }
    }
}
