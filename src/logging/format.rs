//! JSON log lines: one JSON object per line (ndjson) for ingestion and audit.

use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing; stdout is reserved for result records
pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber on stderr, level from RUST_LOG or default.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let json_layer = json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr)
        });
        let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(text_layer)
            .init();
    }

    /// Emit a single serialized record as one line
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
        writeln!(w, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_installs_global_subscriber() {
        StructuredLogger::init(true, "warn");
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn one_record_per_line() {
        let mut buf = Vec::new();
        StructuredLogger::emit_json(&serde_json::json!({"final_label": "SEVERE"}), &mut buf).unwrap();
        StructuredLogger::emit_json(&serde_json::json!({"final_label": "NOT_SEVERE"}), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, [r#"{"final_label":"SEVERE"}"#, r#"{"final_label":"NOT_SEVERE"}"#]);
    }
}
