//! Severity-leveled diagnostic channel.
//!
//! Every message becomes a `tracing` event. When a sink is installed, messages
//! at or below the verbosity threshold are also handed to it, which is how a
//! scripting host observes validation failures.

use std::fmt;
use std::sync::Arc;

use crate::types::Verbosity;

/// Caller-supplied message sink.
pub type LogSink = Arc<dyn Fn(Verbosity, &str) + Send + Sync>;

/// Verbosity threshold plus optional sink.
#[derive(Clone)]
pub struct Diagnostics {
    verbosity: Verbosity,
    sink: Option<LogSink>,
}

impl Diagnostics {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            sink: None,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    /// Install or remove the sink.
    pub fn set_sink(&mut self, sink: Option<LogSink>) {
        self.sink = sink;
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Emit a message.
    pub fn report(&self, severity: Verbosity, message: &str) {
        let level = severity.as_str();
        match severity {
            Verbosity::Critical | Verbosity::Severe => tracing::error!(
                component = "diagnostics",
                operation = "report",
                status = "error",
                severity = level,
                "{message}"
            ),
            Verbosity::Important => tracing::warn!(
                component = "diagnostics",
                operation = "report",
                status = "warn",
                severity = level,
                "{message}"
            ),
            Verbosity::Neutral | Verbosity::Normal => tracing::info!(
                component = "diagnostics",
                operation = "report",
                status = "info",
                severity = level,
                "{message}"
            ),
            Verbosity::Detailed => tracing::debug!(
                component = "diagnostics",
                operation = "report",
                status = "info",
                severity = level,
                "{message}"
            ),
            Verbosity::Full => tracing::trace!(
                component = "diagnostics",
                operation = "report",
                status = "info",
                severity = level,
                "{message}"
            ),
        }

        if severity <= self.verbosity
            && let Some(sink) = &self.sink
        {
            sink(severity, message);
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Verbosity::Critical)
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("verbosity", &self.verbosity)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn capture() -> (LogSink, Arc<Mutex<Vec<(Verbosity, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let clone = Arc::clone(&seen);
        let sink: LogSink = Arc::new(move |level, msg| {
            clone.lock().unwrap().push((level, msg.to_string()));
        });
        (sink, seen)
    }

    #[test]
    fn test_sink_filters_by_verbosity() {
        let (sink, seen) = capture();
        let mut diagnostics = Diagnostics::new(Verbosity::Severe);
        diagnostics.set_sink(Some(sink));

        diagnostics.report(Verbosity::Important, "dropped");
        diagnostics.report(Verbosity::Critical, "kept");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], (Verbosity::Critical, "kept".to_string()));
    }

    #[test]
    fn test_no_sink_is_silent() {
        let diagnostics = Diagnostics::new(Verbosity::Full);
        diagnostics.report(Verbosity::Important, "nobody listens");
        assert!(!diagnostics.has_sink());
    }

    #[test]
    fn test_clone_shares_sink() {
        let (sink, seen) = capture();
        let mut diagnostics = Diagnostics::new(Verbosity::Full);
        diagnostics.set_sink(Some(sink));
        let copy = diagnostics.clone();
        copy.report(Verbosity::Normal, "from clone");
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
