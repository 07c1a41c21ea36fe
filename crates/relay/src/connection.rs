//! Relay-Verbindung – Verwaltet eine einzelne WebSocket-Verbindung
//!
//! Jede WebSocket-Verbindung bekommt eine `RelayVerbindung` in einem
//! eigenen tokio-Task. Der Task liest eingehende Frames, gibt sie an den
//! `RelayDispatcher` und schreibt alles aus der Broadcaster-Queue auf
//! den Socket.
//!
//! ## Lebenszyklus
//! ```text
//! Upgrade -> registriert (Broadcaster) -> ... -> Close/Fehler/Shutdown -> entfernt
//! ```
//!
//! Verbindungsabbrueche werden nur protokolliert. Es gibt kein Replay und
//! keinen Wiederaufbau von Serverseite.

use axum::extract::ws::{Message, WebSocket};
use rangerfunk_core::VerbindungsId;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::broadcast::Frame;
use crate::dispatcher::RelayDispatcher;
use crate::error::RelayResult;
use crate::server_state::RelayState;

/// Verarbeitet eine einzelne WebSocket-Verbindung
pub struct RelayVerbindung {
    state: Arc<RelayState>,
    peer_addr: SocketAddr,
    id: VerbindungsId,
}

impl RelayVerbindung {
    /// Erstellt eine neue RelayVerbindung mit frischer ID
    pub fn neu(state: Arc<RelayState>, peer_addr: SocketAddr) -> Self {
        Self {
            state,
            peer_addr,
            id: VerbindungsId::new(),
        }
    }

    /// Startet die Verbindungs-Verarbeitungsschleife
    ///
    /// Laeuft bis der Client trennt, ein Socket-Fehler auftritt oder das
    /// Relay heruntergefahren wird.
    pub async fn verarbeiten(self, mut socket: WebSocket) {
        let peer_addr = self.peer_addr;
        let id = self.id;
        let mut shutdown_rx = self.state.shutdown_rx();

        let mut sende_rx = self.state.broadcaster.client_registrieren(id);
        self.state.metriken.connected_clients.inc();
        tracing::info!(peer = %peer_addr, verbindung = %id, "Client verbunden");

        // Shutdown kam schon vor der Registrierung
        if *shutdown_rx.borrow_and_update() {
            let _ = socket.send(Message::Close(None)).await;
        } else {
            self.schleife(&mut socket, &mut sende_rx, &mut shutdown_rx).await;
        }

        // Cleanup beim Verbindungsende
        self.state.broadcaster.client_entfernen(&id);
        self.state.metriken.connected_clients.dec();
        tracing::info!(peer = %peer_addr, verbindung = %id, "Client getrennt");
    }

    async fn schleife(
        &self,
        socket: &mut WebSocket,
        sende_rx: &mut mpsc::Receiver<Frame>,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) {
        let peer_addr = self.peer_addr;
        let id = self.id;
        let dispatcher = RelayDispatcher::neu(Arc::clone(&self.state));

        loop {
            tokio::select! {
                // Eingehender Frame vom Client
                eingehend = socket.recv() => {
                    match eingehend {
                        Some(Ok(Message::Text(text))) => {
                            dispatcher.dispatch(id, &text);
                        }
                        Some(Ok(Message::Binary(daten))) => {
                            self.state.metriken.frames_ignored_total.inc();
                            tracing::debug!(
                                verbindung = %id,
                                bytes = daten.len(),
                                "Binaerframe ignoriert"
                            );
                        }
                        // Ping/Pong beantwortet die Transportschicht
                        Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::debug!(verbindung = %id, "Client hat Verbindung geschlossen");
                            break;
                        }
                        Some(Err(e)) => {
                            tracing::warn!(
                                peer = %peer_addr,
                                verbindung = %id,
                                fehler = %e,
                                "WebSocket-Lesefehler"
                            );
                            break;
                        }
                    }
                }

                // Ausgehender Frame aus dem Broadcaster
                ausgehend = sende_rx.recv() => {
                    match ausgehend {
                        Some(frame) => {
                            if let Err(e) = frame_senden(socket, frame).await {
                                tracing::warn!(
                                    peer = %peer_addr,
                                    verbindung = %id,
                                    fehler = %e,
                                    "Broadcast-Senden fehlgeschlagen"
                                );
                                break;
                            }
                        }
                        // Aus dem Broadcaster entfernt
                        None => break,
                    }
                }

                // Shutdown-Signal
                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::debug!(verbindung = %id, "Shutdown-Signal – Verbindung wird getrennt");
                        let _ = socket.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        }
    }
}

async fn frame_senden(socket: &mut WebSocket, frame: Frame) -> RelayResult<()> {
    socket.send(Message::Text(frame.to_string())).await?;
    Ok(())
}
