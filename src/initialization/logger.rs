//! Logger initialization.
//!
//! Two line formats: colored plain text for terminals and one JSON object per
//! line for log shippers. Audit messages quote heading text and URLs verbatim,
//! so the JSON form escapes the message through `serde_json`.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Dependencies that log parser recovery or connection chatter on ordinary
/// pages, with the most verbose level still shown for each.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
];

/// Installs the global logger.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate and as
/// the default, while the modules in `QUIET_MODULES` stay capped.
///
/// Fails with `InitializationError::LoggerError` if a logger is already set.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in QUIET_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module("heading_audit", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let (marker, colored_level) = match level {
                    Level::Error => ("❌", level.to_string().red()),
                    Level::Warn => ("⚠️", level.to_string().yellow()),
                    Level::Info => ("✔️", level.to_string().green()),
                    Level::Debug => ("🔍", level.to_string().blue()),
                    Level::Trace => ("🔬", level.to_string().purple()),
                };
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    marker,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

/// One JSON log object: `{"ts":<millis>,"level":"INFO","target":"...","msg":"..."}`.
fn json_line(ts: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_escapes_heading_text() {
        let line = json_line(
            1_700_000_000_000,
            Level::Warn,
            "heading_audit::batch",
            "Job failed for https://example.com/?q=\"h1\"\nline two",
        );
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
        assert_eq!(value["ts"], 1_700_000_000_000_i64);
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "heading_audit::batch");
        assert_eq!(
            value["msg"],
            "Job failed for https://example.com/?q=\"h1\"\nline two"
        );
    }

    // env_logger can only be installed once per process, so a second
    // initialization must report an error instead of panicking.
    #[test]
    fn test_init_logger_twice_is_an_error() {
        let _ = env_logger::try_init();
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
        assert!(init_logger_with(LevelFilter::Info, LogFormat::Plain).is_err());
    }
}
