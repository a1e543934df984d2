//! Enumeration telemetry events and sinks.
//!
//! Pullgen runs inside generators that are evaluated repeatedly, so a compact
//! record of each enumeration (pages walked, records seen, records kept,
//! duplicate identifiers) helps when a generator produces unexpected targets.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by Pullgen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the outcome of one successful enumeration call.
    PullRequestsListed {
        /// Pages fetched from the provider.
        pages: usize,
        /// Pull requests across all pages before filtering.
        pull_requests: usize,
        /// Pull requests left after filtering.
        retained: usize,
        /// Pull request numbers that appeared more than once across pages.
        duplicate_numbers: Vec<u64>,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
