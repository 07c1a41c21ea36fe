//! Prometheus-kompatible Metriken fuer Rangerfunk
//!
//! Registrierte Metriken:
//! - `rangerfunk_connected_clients` – Gauge: Aktuell verbundene Clients
//! - `rangerfunk_messages_relayed_total` – Counter: Verteilte chatMessage-Events
//! - `rangerfunk_deliveries_total` – Counter: Zugestellte Kopien (ein Event x N Clients)
//! - `rangerfunk_deliveries_dropped_total` – Counter: Verworfene Kopien (Queue voll/geschlossen)
//! - `rangerfunk_frames_ignored_total` – Counter: Ignorierte Frames (unbekannt, kein JSON, zu gross)
//! - `rangerfunk_http_requests_total` – Counter: HTTP-Anfragen (method, status)

use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Alle Rangerfunk-Prometheus-Metriken
///
/// Clone teilt die Registry; alle Klone zaehlen auf dieselben Werte.
#[derive(Clone)]
pub struct RangerfunkMetrics {
    pub registry: Arc<Registry>,

    // Relay-Metriken
    pub connected_clients: IntGauge,
    pub messages_relayed_total: IntCounter,
    pub deliveries_total: IntCounter,
    pub deliveries_dropped_total: IntCounter,
    pub frames_ignored_total: IntCounter,

    // HTTP-Metriken
    pub http_requests_total: IntCounterVec,
}

impl RangerfunkMetrics {
    /// Erstellt und registriert alle Metriken in einer neuen Registry
    pub fn neu() -> Result<Self> {
        let registry = Registry::new();

        let connected_clients = IntGauge::with_opts(Opts::new(
            "rangerfunk_connected_clients",
            "Anzahl aktuell verbundener Clients",
        ))?;
        registry.register(Box::new(connected_clients.clone()))?;

        let messages_relayed_total = IntCounter::with_opts(Opts::new(
            "rangerfunk_messages_relayed_total",
            "Gesamtanzahl verteilter chatMessage-Events",
        ))?;
        registry.register(Box::new(messages_relayed_total.clone()))?;

        let deliveries_total = IntCounter::with_opts(Opts::new(
            "rangerfunk_deliveries_total",
            "Gesamtanzahl zugestellter Event-Kopien",
        ))?;
        registry.register(Box::new(deliveries_total.clone()))?;

        let deliveries_dropped_total = IntCounter::with_opts(Opts::new(
            "rangerfunk_deliveries_dropped_total",
            "Event-Kopien die wegen voller oder geschlossener Queue verworfen wurden",
        ))?;
        registry.register(Box::new(deliveries_dropped_total.clone()))?;

        let frames_ignored_total = IntCounter::with_opts(Opts::new(
            "rangerfunk_frames_ignored_total",
            "Eingehende Frames die nicht verteilt wurden",
        ))?;
        registry.register(Box::new(frames_ignored_total.clone()))?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("rangerfunk_http_requests_total", "Gesamtanzahl HTTP-Anfragen"),
            &["method", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            connected_clients,
            messages_relayed_total,
            deliveries_total,
            deliveries_dropped_total,
            frames_ignored_total,
            http_requests_total,
        })
    }

    /// Exportiert alle Metriken im Prometheus-Textformat
    pub fn exportieren(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Axum-Router fuer den `/metrics`-Endpunkt
pub fn metrics_router(metriken: RangerfunkMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metriken)
}

async fn metrics_handler(State(metriken): State<RangerfunkMetrics>) -> impl IntoResponse {
    match metriken.exportieren() {
        Ok(text) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Metriken-Export fehlgeschlagen: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
