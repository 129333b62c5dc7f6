//! Trace model and loader.
//!
//! A trace is a JSON object with a `data` array of job descriptions. The
//! position of an entry in the array is its identity: it names the generated
//! resources and correlates log lines with teardown commands. Dispatch order
//! is driven purely by `startTime`.

use std::path::Path;

use serde::Deserialize;

/// On-wire trace container.
#[derive(Debug, Deserialize)]
struct TraceFile {
    data: Vec<TraceEntry>,
}

/// One job description from the trace.
///
/// Field names on the wire are `startTime`, `gpuCnt` and `runningTime`; they
/// are the compatibility contract with existing trace files.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TraceEntry {
    /// Seconds after process start at which the job arrives.
    #[serde(rename = "startTime")]
    pub start_time: u64,
    /// Total GPU demand of the job, before partitioning.
    #[serde(rename = "gpuCnt")]
    pub gpu_cnt: u32,
    /// Seconds each replica should keep its GPUs busy.
    #[serde(rename = "runningTime")]
    pub running_time: u64,
}

/// Load and validate a trace file. All-or-nothing: a malformed entry rejects
/// the whole trace.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<TraceEntry>, TraceError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| TraceError::Read(path.display().to_string(), e))?;
    parse(&content)
}

fn parse(content: &str) -> Result<Vec<TraceEntry>, TraceError> {
    let file: TraceFile =
        serde_json::from_str(content).map_err(|e| TraceError::Format(e.to_string()))?;

    for (index, entry) in file.data.iter().enumerate() {
        if entry.gpu_cnt == 0 {
            return Err(TraceError::Format(format!(
                "entry {index}: gpuCnt must be positive"
            )));
        }
        if entry.running_time == 0 {
            return Err(TraceError::Format(format!(
                "entry {index}: runningTime must be positive"
            )));
        }
    }

    Ok(file.data)
}

/// Errors that can occur when loading a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("failed to read trace file {0}: {1}")]
    Read(String, std::io::Error),
    #[error("malformed trace: {0}")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_parse_valid_trace() {
        let entries = parse(
            r#"{"data": [
                {"startTime": 0, "gpuCnt": 8, "runningTime": 60},
                {"startTime": 30, "gpuCnt": 1, "runningTime": 120}
            ]}"#,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start_time, 0);
        assert_eq!(entries[0].gpu_cnt, 8);
        assert_eq!(entries[0].running_time, 60);
        assert_eq!(entries[1].start_time, 30);
    }

    #[test]
    fn test_missing_data_key_is_format_error() {
        let err = parse(r#"{"jobs": []}"#).unwrap_err();
        assert!(matches!(err, TraceError::Format(_)), "got: {err:?}");
    }

    #[test]
    fn test_missing_numeric_field_is_format_error() {
        let err = parse(r#"{"data": [{"startTime": 0, "runningTime": 60}]}"#).unwrap_err();
        assert!(matches!(err, TraceError::Format(_)), "got: {err:?}");
    }

    #[test]
    fn test_zero_gpu_count_rejected() {
        let err =
            parse(r#"{"data": [{"startTime": 0, "gpuCnt": 0, "runningTime": 60}]}"#).unwrap_err();
        assert!(matches!(err, TraceError::Format(_)), "got: {err:?}");
    }

    #[test]
    fn test_zero_running_time_rejected() {
        let err =
            parse(r#"{"data": [{"startTime": 0, "gpuCnt": 1, "runningTime": 0}]}"#).unwrap_err();
        assert!(matches!(err, TraceError::Format(_)), "got: {err:?}");
    }

    #[test]
    fn test_negative_start_time_rejected() {
        let err =
            parse(r#"{"data": [{"startTime": -5, "gpuCnt": 1, "runningTime": 60}]}"#).unwrap_err();
        assert!(matches!(err, TraceError::Format(_)), "got: {err:?}");
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let err = load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TraceError::Read(_, _)), "got: {err:?}");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("traces.json");
        std::fs::write(
            &path,
            r#"{"data": [{"startTime": 1, "gpuCnt": 2, "runningTime": 3}]}"#,
        )
        .unwrap();

        let entries = load(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].gpu_cnt, 2);
    }
}
