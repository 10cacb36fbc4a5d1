//! Structured event emission for validator runs.
//!
//! Observability is best-effort and side-channel only: the validation result
//! is fully constructed before the sink is invoked, sink faults are swallowed
//! without logging, and a broken sink can never alter or abort an outcome.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::Write;
use ulid::Ulid;

/// One `validator_result` observability record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorEvent {
    pub event_type: String,
    pub artifact_id: String,
    pub schema_version: String,
    pub result: String,
    pub error_codes: Vec<String>,
    pub failure_mode_ids: Vec<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl ValidatorEvent {
    /// Assemble an event from a finished validation run.
    ///
    /// `error_codes` are sorted and deduplicated, `failure_mode_ids` sorted,
    /// so emitted records are stable across repeated runs.
    pub fn new(
        artifact_id: &str,
        schema_version: &str,
        error_codes: &[String],
        failure_mode_ids: &[String],
        correlation_id: Option<String>,
    ) -> Self {
        let mut codes = error_codes.to_vec();
        codes.sort();
        codes.dedup();
        let mut modes = failure_mode_ids.to_vec();
        modes.sort();

        ValidatorEvent {
            event_type: "validator_result".to_string(),
            artifact_id: artifact_id.to_string(),
            schema_version: schema_version.to_string(),
            result: if codes.is_empty() {
                "success".to_string()
            } else {
                "failure".to_string()
            },
            error_codes: codes,
            failure_mode_ids: modes,
            timestamp: Utc::now().to_rfc3339(),
            correlation_id,
        }
    }
}

/// Fresh correlation id for tracing a validation request across sinks.
pub fn new_correlation_id() -> String {
    Ulid::new().to_string()
}

/// Caller-supplied event receiver.
///
/// Emission faults are reported through the `Result` and discarded by the
/// core; implementations must not rely on them propagating.
pub trait EventSink {
    fn emit(&mut self, event: &ValidatorEvent) -> Result<(), std::io::Error>;
}

/// Sink writing one JSON object per line to any writer.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        JsonlSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonlSink<W> {
    fn emit(&mut self, event: &ValidatorEvent) -> Result<(), std::io::Error> {
        let line = serde_json::to_string(event)?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}
