//! HTTP-Oberflaeche des Relays
//!
//! - `GET /`   – Einstiegsseite (`index.html` aus dem Web-Verzeichnis)
//! - `GET /ws` – WebSocket-Upgrade in eine `RelayVerbindung`; Nachrichten
//!   ueber `max_frame_groesse` beendet der Transport mit einem Fehler
//! - sonst     – statische Dateien aus dem Web-Verzeichnis

use axum::{
    extract::{ws::WebSocketUpgrade, ConnectInfo, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use rangerfunk_observability::timing_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::connection::RelayVerbindung;
use crate::server_state::RelayState;

/// Erstellt den vollstaendigen Relay-Router
///
/// Muss mit `into_make_service_with_connect_info::<SocketAddr>()` serviert
/// werden, da `/ws` die Peer-Adresse protokolliert.
pub fn relay_router(state: Arc<RelayState>) -> Router {
    let statisch = ServeDir::new(&state.config.public_verzeichnis);
    let index = ServeFile::new(state.config.index_pfad());

    Router::new()
        .route_service("/", index)
        .route("/ws", get(ws_handler))
        .fallback_service(statisch)
        .layer(axum::middleware::from_fn_with_state(
            state.metriken.clone(),
            timing_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /ws` – Upgrade auf WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer_addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<RelayState>>,
) -> impl IntoResponse {
    tracing::debug!(peer = %peer_addr, "WebSocket-Upgrade angefordert");
    let limit = state.config.max_frame_groesse;
    ws.max_message_size(limit)
        .max_frame_size(limit)
        .on_upgrade(move |socket| RelayVerbindung::neu(state, peer_addr).verarbeiten(socket))
}
