//! Teardown script recording.
//!
//! Before any unit fires, every deletion command is already on disk, so an
//! interrupted run still leaves a usable cleanup script. Each line is synced
//! as it is written, not buffered until process exit.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};

use crate::job::JobUnit;

/// Bulk cleanup for group-scheduling metadata left behind by all units.
pub const BULK_PODGROUP_DELETE: &str = "kubectl delete podgroup $(kubectl get podgroup | grep job-dispatcher-test |awk '{print$1}') --grace-period=0 --force";

/// Append-only recorder for the teardown script.
///
/// The script file is the only resource shared across dispatch bookkeeping;
/// the mutex serializes appends so lines cannot interleave.
#[derive(Debug)]
pub struct TeardownRecorder {
    file: Mutex<File>,
}

impl TeardownRecorder {
    /// Open (or create, mode 0755) the teardown script for appending.
    /// Failure here is fatal to the whole run: no unit may fire without its
    /// deletion command on record.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TeardownError> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o755);
        }
        let file = options
            .open(path)
            .map_err(|e| TeardownError::Open(path.display().to_string(), e))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Append the deletion command for one unit and sync it to disk. Called
    /// exactly once per unit, at unit-construction time.
    pub fn record(&self, unit: &JobUnit) -> Result<(), TeardownError> {
        self.append(&format!("kubectl delete job {}\n", unit.name()))
    }

    /// Append the bulk PodGroup cleanup and close the script for writing.
    pub fn finalize(self) -> Result<(), TeardownError> {
        self.append(&format!("{BULK_PODGROUP_DELETE}\n"))
    }

    fn append(&self, line: &str) -> Result<(), TeardownError> {
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        file.write_all(line.as_bytes())
            .map_err(TeardownError::Write)?;
        file.sync_all().map_err(TeardownError::Write)
    }
}

/// Errors that can occur writing the teardown script.
#[derive(Debug, thiserror::Error)]
pub enum TeardownError {
    #[error("failed to open teardown script {0}: {1}")]
    Open(String, std::io::Error),
    #[error("failed to write teardown script: {0}")]
    Write(std::io::Error),
}
