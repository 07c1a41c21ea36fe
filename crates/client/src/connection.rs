//! Client-seitige WebSocket-Verbindung zum Rangerfunk-Relay
//!
//! Ein Hintergrund-Task besitzt den WebSocket. Ausgehende Frames kommen
//! ueber eine mpsc-Queue (das Sende-Handle des [`ClientKontext`]),
//! eingehende `chatMessage`-Events werden dekodiert und in eine zweite
//! Queue gelegt.
//!
//! [`ClientKontext`]: crate::ClientKontext

use futures_util::{SinkExt, StreamExt};
use rangerfunk_protocol::{ChatNachricht, FrameCodec, RelayEvent};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::error::ClientResult;
use crate::kontext::ClientKontext;

/// Kapazitaet der Queues zwischen Verbindungs-Task und Anwendung
const QUEUE_GROESSE: usize = 64;

// ---------------------------------------------------------------------------
// ServerVerbindung
// ---------------------------------------------------------------------------

/// Laufende Verbindung zum Relay
pub struct ServerVerbindung {
    ausgang: mpsc::Sender<String>,
    eingang: mpsc::Receiver<ChatNachricht>,
    stopp: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServerVerbindung {
    /// Baut die WebSocket-Verbindung auf, z.B. zu `ws://localhost:3000/ws`
    pub async fn verbinden(url: &str) -> ClientResult<Self> {
        tracing::info!(url, "Verbinde mit Relay");
        let (ws, _antwort) = connect_async(url).await?;
        tracing::info!(url, "WebSocket-Verbindung hergestellt");

        let (ausgang_tx, ausgang_rx) = mpsc::channel(QUEUE_GROESSE);
        let (eingang_tx, eingang_rx) = mpsc::channel(QUEUE_GROESSE);
        let (stopp_tx, stopp_rx) = oneshot::channel();
        let task = tokio::spawn(verbindung_betreiben(ws, ausgang_rx, eingang_tx, stopp_rx));

        Ok(Self {
            ausgang: ausgang_tx,
            eingang: eingang_rx,
            stopp: stopp_tx,
            task,
        })
    }

    /// Erstellt einen Kontext der ueber diese Verbindung sendet
    pub fn kontext(&self, name: &str) -> ClientKontext {
        ClientKontext::neu(self.ausgang.clone(), name)
    }

    /// Naechste empfangene Chat-Nachricht; `None` wenn die Verbindung endet
    pub async fn empfangen(&mut self) -> Option<ChatNachricht> {
        self.eingang.recv().await
    }

    /// Beendet die Verbindung mit einem Close-Frame
    ///
    /// Wartet bis der Verbindungs-Task den Close-Frame geschrieben hat.
    pub async fn trennen(self) {
        // Ist der Task schon beendet, gibt es nichts mehr zu schliessen
        let _ = self.stopp.send(());
        if let Err(e) = self.task.await {
            tracing::warn!(fehler = %e, "Verbindungs-Task abgebrochen");
        }
        tracing::info!("Verbindung zum Relay getrennt");
    }
}

async fn verbindung_betreiben<S>(
    ws: tokio_tungstenite::WebSocketStream<S>,
    mut ausgang: mpsc::Receiver<String>,
    eingang: mpsc::Sender<ChatNachricht>,
    mut stopp: oneshot::Receiver<()>,
) where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let codec = FrameCodec::new();
    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            _ = &mut stopp => {
                if let Err(e) = sink.send(Message::Close(None)).await {
                    tracing::debug!(fehler = %e, "Close-Frame nicht gesendet");
                }
                break;
            }
            frame = ausgang.recv() => {
                let Some(frame) = frame else {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                };
                if let Err(e) = sink.send(Message::Text(frame)).await {
                    tracing::warn!(fehler = %e, "Senden fehlgeschlagen");
                    break;
                }
            }
            nachricht = stream.next() => {
                match nachricht {
                    Some(Ok(Message::Text(text))) => match codec.decode(&text) {
                        Ok(RelayEvent::ChatMessage(chat)) => {
                            if eingang.send(chat).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::debug!(fehler = %e, "Frame ignoriert");
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Relay hat die Verbindung geschlossen");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(fehler = %e, "WebSocket-Fehler");
                        break;
                    }
                }
            }
        }
    }
}
