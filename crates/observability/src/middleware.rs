//! Request-Timing Middleware fuer Axum
//!
//! Misst die Antwortzeit jeder HTTP-Anfrage, protokolliert sie als
//! strukturiertes Log-Event und zaehlt sie in `rangerfunk_http_requests_total`.
//! WebSocket-Upgrades erscheinen mit Status 101; die Dauer umfasst dann nur
//! den Handshake, nicht die Lebenszeit der Verbindung.

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response},
    middleware::Next,
};
use std::time::Instant;

use crate::metrics::RangerfunkMetrics;

/// Axum-Middleware-Funktion: misst Antwortzeit und loggt strukturiert.
///
/// Verwendung:
/// ```ignore
/// Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn_with_state(metriken, timing_middleware))
/// ```
pub async fn timing_middleware(
    State(metriken): State<RangerfunkMetrics>,
    req: Request<Body>,
    next: Next,
) -> Response<Body> {
    let methode = req.method().to_string();
    let pfad = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let dauer_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    let status_text = status.to_string();
    metriken
        .http_requests_total
        .with_label_values(&[methode.as_str(), status_text.as_str()])
        .inc();

    tracing::debug!(
        method = %methode,
        path = %pfad,
        status = status,
        route = route_klasse(&pfad),
        duration_ms = dauer_ms,
        "HTTP-Anfrage abgeschlossen"
    );

    response
}

/// Ordnet einen Pfad einer Routen-Klasse zu (fuer Log-Filter)
pub fn route_klasse(pfad: &str) -> &'static str {
    match pfad {
        "/" => "index",
        "/ws" => "websocket",
        _ => "statisch",
    }
}
