//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `RF_LOG_LEVEL`: Filter-Direktive (z.B. `debug` oder `rangerfunk_relay=trace`)
//! - `RUST_LOG`: wie `RF_LOG_LEVEL`, wird nur ohne `RF_LOG_LEVEL` gelesen
//! - `RF_LOG_FORMAT`: Format (text/json)
//!
//! Ohne Umgebungsvariablen gelten die Werte aus der Konfigurationsdatei.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialisiert das Logging-System.
///
/// `RF_LOG_LEVEL` (oder `RUST_LOG`) und `RF_LOG_FORMAT` haben Vorrang vor
/// `level` / `format`. Ungueltige Filter fallen auf `info` zurueck.
pub fn logging_initialisieren(level: &str, format: &str) {
    let direktive = filter_waehlen(
        std::env::var("RF_LOG_LEVEL").ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        level,
    );
    let filter = EnvFilter::try_new(&direktive).unwrap_or_else(|_| EnvFilter::new("info"));

    let format = format_waehlen(std::env::var("RF_LOG_FORMAT").ok(), format);

    match format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Waehlt das Log-Format: Umgebung vor Konfiguration, ungueltig -> "text"
pub fn format_waehlen(aus_env: Option<String>, aus_config: &str) -> String {
    aus_env
        .filter(|f| log_format_gueltig(f))
        .or_else(|| Some(aus_config.to_string()).filter(|f| log_format_gueltig(f)))
        .unwrap_or_else(|| "text".to_string())
}

/// Waehlt die Filter-Direktive: `RF_LOG_LEVEL`, dann `RUST_LOG`, dann Konfiguration
pub fn filter_waehlen(rf_log: Option<String>, rust_log: Option<String>, aus_config: &str) -> String {
    rf_log
        .filter(|d| !d.trim().is_empty())
        .or_else(|| rust_log.filter(|d| !d.trim().is_empty()))
        .unwrap_or_else(|| aus_config.to_string())
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_rf_log_level_vor_rust_log() {
        let gewaehlt = filter_waehlen(Some("debug".into()), Some("trace".into()), "info");
        assert_eq!(gewaehlt, "debug");
    }

    #[test]
    fn filter_rust_log_ohne_rf_log_level() {
        let gewaehlt = filter_waehlen(None, Some("rangerfunk_relay=trace".into()), "info");
        assert_eq!(gewaehlt, "rangerfunk_relay=trace");
        assert_eq!(filter_waehlen(Some(" ".into()), Some("warn".into()), "info"), "warn");
    }

    #[test]
    fn filter_fallback_config() {
        assert_eq!(filter_waehlen(None, None, "warn"), "warn");
        assert_eq!(filter_waehlen(None, Some(String::new()), "error"), "error");
    }

    #[test]
    fn log_format_gueltige_werte() {
        assert!(log_format_gueltig("text"));
        assert!(log_format_gueltig("json"));
        assert!(!log_format_gueltig("xml"));
        assert!(!log_format_gueltig("JSON"));
    }

    #[test]
    fn format_umgebung_hat_vorrang() {
        assert_eq!(format_waehlen(Some("json".into()), "text"), "json");
    }

    #[test]
    fn format_ungueltige_umgebung_faellt_auf_config() {
        assert_eq!(format_waehlen(Some("xml".into()), "json"), "json");
        assert_eq!(format_waehlen(None, "json"), "json");
    }

    #[test]
    fn format_fallback_text() {
        assert_eq!(format_waehlen(None, "yaml"), "text");
    }
}
