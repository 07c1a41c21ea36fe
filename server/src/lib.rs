//! rangerfunk-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Metriken, Relay und Observability-Server und
//! stellt den oeffentlichen Einstiegspunkt fuer Tests bereit.

pub mod config;

use anyhow::{Context, Result};
use config::ServerConfig;
use rangerfunk_observability::{observability_server_starten, HealthState, RangerfunkMetrics};
use rangerfunk_relay::{relay_router, RelayState};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Subsysteme und laeuft bis Ctrl-C
    pub async fn starten(self) -> Result<()> {
        self.starten_bis(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht registriert werden");
            }
        })
        .await
    }

    /// Startet alle Subsysteme und laeuft bis `shutdown` fertig ist
    ///
    /// Reihenfolge:
    /// 1. Metriken und Relay-Zustand anlegen
    /// 2. Web-Verzeichnis pruefen
    /// 3. Observability-Server starten (falls aktiviert)
    /// 4. HTTP/WebSocket-Listener starten
    /// 5. Auf Shutdown warten, Verbindungen schliessen
    pub async fn starten_bis<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let config = self.config;
        tracing::info!(
            server_name = %config.server.name,
            http = %config.http_bind_adresse(),
            web = %config.web.verzeichnis.display(),
            "Server startet"
        );

        let metriken = RangerfunkMetrics::neu().context("Metriken konnten nicht registriert werden")?;
        let state = RelayState::neu(config.relay_config(), metriken.clone());
        state.web_pruefen().context("Web-Verzeichnis ungueltig")?;

        let health = HealthState::neu(metriken.clone());
        let observability = if config.observability.aktiviert {
            let addr: SocketAddr = config
                .observability_bind_adresse()
                .parse()
                .context("Ungueltige Observability-Adresse")?;
            let shutdown_rx = state.shutdown_rx();
            let health = health.clone();
            Some(tokio::spawn(async move {
                if let Err(e) = observability_server_starten(addr, metriken, health, shutdown_rx).await {
                    tracing::error!(fehler = %e, "Observability-Server beendet");
                }
            }))
        } else {
            tracing::info!("Observability-Server deaktiviert");
            None
        };

        let listener = tokio::net::TcpListener::bind(config.http_bind_adresse())
            .await
            .with_context(|| format!("Port {} konnte nicht gebunden werden", config.netzwerk.port))?;
        let lokale_adresse = listener.local_addr()?;
        tracing::info!(
            adresse = %lokale_adresse,
            "Rangerfunk laeuft auf http://localhost:{}",
            lokale_adresse.port()
        );

        let app = relay_router(Arc::clone(&state));
        let shutdown_state = Arc::clone(&state);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
            health.shutdown_markieren();
            shutdown_state.herunterfahren();
        })
        .await
        .context("HTTP-Server abgebrochen")?;

        if let Some(handle) = observability {
            let _ = handle.await;
        }
        tracing::info!("Server gestoppt");
        Ok(())
    }
}
