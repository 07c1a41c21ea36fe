//! Gemeinsamer Zustand des Relays
//!
//! Haelt Konfiguration, Broadcaster, Codec und Metriken. Wird als
//! `Arc<RelayState>` zwischen allen Verbindungs-Tasks geteilt.

use rangerfunk_observability::RangerfunkMetrics;
use rangerfunk_protocol::FrameCodec;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

use crate::broadcast::{EventBroadcaster, SEND_QUEUE_GROESSE};
use crate::error::{RelayError, RelayResult};

/// Konfiguration fuer das Relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Verzeichnis mit den statischen Client-Dateien
    pub public_verzeichnis: PathBuf,
    /// Einstiegsseite relativ zu `public_verzeichnis`
    pub index_datei: String,
    /// Kapazitaet der Send-Queue pro Verbindung
    pub send_queue_groesse: usize,
    /// Maximale Groesse eines eingehenden Frames in Bytes
    pub max_frame_groesse: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            public_verzeichnis: PathBuf::from("public"),
            index_datei: "index.html".to_string(),
            send_queue_groesse: SEND_QUEUE_GROESSE,
            max_frame_groesse: rangerfunk_protocol::wire::DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl RelayConfig {
    /// Vollstaendiger Pfad der Einstiegsseite
    pub fn index_pfad(&self) -> PathBuf {
        self.public_verzeichnis.join(&self.index_datei)
    }
}

/// Gemeinsamer Relay-Zustand (thread-safe, Arc-geteilt)
pub struct RelayState {
    /// Relay-Konfiguration
    pub config: Arc<RelayConfig>,
    /// Event-Broadcaster (ein Topic, alle Verbindungen)
    pub broadcaster: EventBroadcaster,
    /// Frame-Codec mit konfiguriertem Groessenlimit
    pub codec: FrameCodec,
    /// Prometheus-Metriken
    pub metriken: RangerfunkMetrics,
    shutdown_tx: watch::Sender<bool>,
}

impl RelayState {
    /// Erstellt einen neuen RelayState
    pub fn neu(config: RelayConfig, metriken: RangerfunkMetrics) -> Arc<Self> {
        let (shutdown_tx, _) = watch::channel(false);
        Arc::new(Self {
            broadcaster: EventBroadcaster::mit_queue_groesse(config.send_queue_groesse),
            codec: FrameCodec::with_max_size(config.max_frame_groesse),
            config: Arc::new(config),
            metriken,
            shutdown_tx,
        })
    }

    /// Abonniert das Shutdown-Signal
    pub fn shutdown_rx(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Signalisiert allen Verbindungen das Herunterfahren
    pub fn herunterfahren(&self) {
        self.shutdown_tx.send_replace(true);
        tracing::info!(
            verbindungen = self.broadcaster.client_anzahl(),
            "Relay wird heruntergefahren"
        );
    }

    /// Prueft das statische Web-Verzeichnis vor dem Start
    ///
    /// Ein fehlendes Verzeichnis ist ein Fehler, eine fehlende Einstiegsseite
    /// nur eine Warnung (`/ws` funktioniert trotzdem).
    pub fn web_pruefen(&self) -> RelayResult<()> {
        let verzeichnis = &self.config.public_verzeichnis;
        if !verzeichnis.is_dir() {
            return Err(RelayError::WebVerzeichnis(format!(
                "'{}' ist kein Verzeichnis",
                verzeichnis.display()
            )));
        }
        let index = self.config.index_pfad();
        if !index.is_file() {
            tracing::warn!(pfad = %index.display(), "Einstiegsseite nicht gefunden");
        }
        Ok(())
    }
}
