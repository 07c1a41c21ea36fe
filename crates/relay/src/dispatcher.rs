//! Relay-Dispatcher – Entscheidet ueber eingehende Frames
//!
//! Gelesen wird nur der Event-Name. Ein `chatMessage`-Frame wird als
//! unveraenderter Text an alle Verbindungen weitergereicht; alles andere
//! wird protokolliert und verworfen. Das Relay lehnt keine Chat-Nachricht
//! ab und beendet keine Verbindung wegen eines Frames.

use rangerfunk_core::VerbindungsId;
use rangerfunk_protocol::EVENT_CHAT_MESSAGE;
use std::sync::Arc;

use crate::broadcast::{Frame, Zustellung};
use crate::server_state::RelayState;

/// Was mit einem eingehenden Frame passiert ist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchErgebnis {
    /// An alle Verbindungen verteilt
    Verteilt(Zustellung),
    /// Gueltiger Frame, aber kein Event das das Relay weiterreicht
    UnbekanntesEvent(String),
    /// Kein JSON-Event
    Ungueltig(String),
}

/// Dispatcher fuer eingehende Textframes
#[derive(Clone)]
pub struct RelayDispatcher {
    state: Arc<RelayState>,
}

impl RelayDispatcher {
    /// Erstellt einen neuen Dispatcher
    pub fn neu(state: Arc<RelayState>) -> Self {
        Self { state }
    }

    /// Verarbeitet einen eingehenden Textframe von `absender`
    pub fn dispatch(&self, absender: VerbindungsId, frame: &str) -> DispatchErgebnis {
        let metriken = &self.state.metriken;

        match self.state.codec.event_name(frame) {
            Ok(name) if name == EVENT_CHAT_MESSAGE => {
                let zustellung = self.state.broadcaster.an_alle_senden(Frame::from(frame));

                metriken.messages_relayed_total.inc();
                metriken.deliveries_total.inc_by(zustellung.zugestellt as u64);
                metriken.deliveries_dropped_total.inc_by(zustellung.verworfen as u64);

                tracing::info!(
                    absender = %absender,
                    bytes = frame.len(),
                    zugestellt = zustellung.zugestellt,
                    verworfen = zustellung.verworfen,
                    "Verschluesselte Nachricht verteilt"
                );
                DispatchErgebnis::Verteilt(zustellung)
            }
            Ok(name) => {
                metriken.frames_ignored_total.inc();
                tracing::debug!(absender = %absender, event = %name, "Unbekanntes Event ignoriert");
                DispatchErgebnis::UnbekanntesEvent(name)
            }
            Err(e) => {
                metriken.frames_ignored_total.inc();
                tracing::warn!(absender = %absender, fehler = %e, "Ungueltiger Frame ignoriert");
                DispatchErgebnis::Ungueltig(e.to_string())
            }
        }
    }
}
