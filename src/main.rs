//! Severity service entrypoint: loads artifacts once, then answers one form
//! submission per stdin line with one JSON record per stdout line.

use accident_severity::{
    config::SeverityConfig,
    input::FormInput,
    logging::StructuredLogger,
    service::{PredictionRecord, SeverityService},
    SeverityError,
};
use std::io::{BufRead, Write};
use tracing::{info, warn};

fn handle_line(service: &SeverityService, line: &str) -> PredictionRecord {
    let outcome = serde_json::from_str::<FormInput>(line)
        .map_err(|e| SeverityError::InvalidRequest(e.to_string()))
        .and_then(|form| service.predict_form(&form));

    let record = PredictionRecord::from_outcome(&outcome);
    match outcome {
        Ok(ref r) => info!(
            request_id = %record.request_id,
            raw_label = %r.raw_label,
            final_label = %r.final_label,
            rule = ?r.rule,
            "prediction"
        ),
        Err(ref e) => warn!(request_id = %record.request_id, code = e.code(), error = %e, "prediction failed"),
    }
    record
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("SEVERITY_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let (config, problem) = SeverityConfig::load_or_default(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);
    if let Some(e) = problem {
        warn!(path = %config_path.display(), code = e.code(), error = %e, "config unusable; using defaults");
    }

    info!(
        model = ?config.artifacts.model_path,
        strategy = config.resolver.strategy.name(),
        "severity service starting"
    );

    let service = SeverityService::from_config(&config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut handled: u64 = 0;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = handle_line(&service, &line);
        StructuredLogger::emit_json(&record, &mut out)?;
        out.flush()?;
        handled += 1;
    }

    info!(handled, "severity service stopping");
    Ok(())
}
