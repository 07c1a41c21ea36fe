//! Event-Broadcaster – Verteilt Frames an alle verbundenen Clients
//!
//! Der EventBroadcaster verwaltet die Send-Queues aller Verbindungen. Es
//! gibt genau ein Topic: jeder registrierte Client empfaengt jeden
//! Frame, der Absender eingeschlossen. Serverseitig wird nicht gefiltert.
//!
//! ## Reihenfolge
//! Broadcasts laufen unter einer Fan-out-Sperre nacheinander ab. Damit
//! sehen alle Clients dieselbe Reihenfolge, und zwei Broadcasts
//! ueberlappen sich nie. Pro Client ist die Zustellung FIFO.

use dashmap::DashMap;
use parking_lot::Mutex;
use rangerfunk_core::VerbindungsId;
use std::sync::Arc;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Konfiguration
// ---------------------------------------------------------------------------

/// Standard-Groesse der Send-Queue pro Client
pub const SEND_QUEUE_GROESSE: usize = 64;

/// Ein Frame wie er auf dem Wire steht; Klone teilen denselben Puffer
pub type Frame = Arc<str>;

// ---------------------------------------------------------------------------
// ClientSender
// ---------------------------------------------------------------------------

/// Handle auf die Send-Queue einer Verbindung
#[derive(Clone, Debug)]
pub struct ClientSender {
    pub verbindung_id: VerbindungsId,
    pub tx: mpsc::Sender<Frame>,
}

impl ClientSender {
    /// Reiht einen Frame nicht-blockierend ein
    ///
    /// Gibt `false` zurueck wenn die Queue voll oder geschlossen ist.
    pub fn senden(&self, frame: Frame) -> bool {
        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    verbindung = %self.verbindung_id,
                    "Send-Queue voll – Nachricht verworfen"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(
                    verbindung = %self.verbindung_id,
                    "Send-Queue geschlossen (Client getrennt)"
                );
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Zustellung
// ---------------------------------------------------------------------------

/// Ergebnis eines Broadcasts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zustellung {
    /// Anzahl eingereihter Kopien
    pub zugestellt: usize,
    /// Anzahl verworfener Kopien (Queue voll oder geschlossen)
    pub verworfen: usize,
}

// ---------------------------------------------------------------------------
// EventBroadcaster
// ---------------------------------------------------------------------------

/// Zentraler Broadcaster fuer alle verbundenen Clients
///
/// Thread-safe via Arc + DashMap. Clone teilt den inneren Zustand.
#[derive(Clone)]
pub struct EventBroadcaster {
    inner: Arc<EventBroadcasterInner>,
}

struct EventBroadcasterInner {
    /// Client-Sender, indiziert nach VerbindungsId
    clients: DashMap<VerbindungsId, ClientSender>,
    /// Serialisiert Broadcasts untereinander
    fanout_sperre: Mutex<()>,
    /// Kapazitaet jeder Send-Queue
    queue_groesse: usize,
}

impl EventBroadcaster {
    /// Erstellt einen neuen EventBroadcaster mit Standard-Queue-Groesse
    pub fn neu() -> Self {
        Self::mit_queue_groesse(SEND_QUEUE_GROESSE)
    }

    /// Erstellt einen EventBroadcaster mit eigener Queue-Groesse pro Client
    pub fn mit_queue_groesse(queue_groesse: usize) -> Self {
        Self {
            inner: Arc::new(EventBroadcasterInner {
                clients: DashMap::new(),
                fanout_sperre: Mutex::new(()),
                queue_groesse: queue_groesse.max(1),
            }),
        }
    }

    /// Registriert eine Verbindung und gibt ihre Empfangs-Queue zurueck
    ///
    /// Die `RelayVerbindung` liest aus dieser Queue und schreibt auf den Socket.
    pub fn client_registrieren(&self, verbindung_id: VerbindungsId) -> mpsc::Receiver<Frame> {
        let (tx, rx) = mpsc::channel(self.inner.queue_groesse);
        let sender = ClientSender { verbindung_id, tx };
        self.inner.clients.insert(verbindung_id, sender);
        tracing::debug!(verbindung = %verbindung_id, "Client im Broadcaster registriert");
        rx
    }

    /// Entfernt eine Verbindung aus dem Broadcaster
    pub fn client_entfernen(&self, verbindung_id: &VerbindungsId) {
        self.inner.clients.remove(verbindung_id);
        tracing::debug!(verbindung = %verbindung_id, "Client aus Broadcaster entfernt");
    }

    /// Sendet einen Frame an alle registrierten Verbindungen, Absender eingeschlossen
    pub fn an_alle_senden(&self, frame: Frame) -> Zustellung {
        let _sperre = self.inner.fanout_sperre.lock();

        let mut zustellung = Zustellung::default();
        self.inner.clients.iter().for_each(|entry| {
            if entry.value().senden(Arc::clone(&frame)) {
                zustellung.zugestellt += 1;
            } else {
                zustellung.verworfen += 1;
            }
        });
        zustellung
    }

    /// Gibt die Anzahl der registrierten Verbindungen zurueck
    pub fn client_anzahl(&self) -> usize {
        self.inner.clients.len()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::neu()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
