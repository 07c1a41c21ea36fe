//! Fehlertypen fuer den Client

use rangerfunk_cipher::CipherError;
use rangerfunk_protocol::ProtocolError;
use thiserror::Error;

/// Fehler die im Client auftreten koennen
#[derive(Debug, Error)]
pub enum ClientError {
    /// Senden ohne gesetzten Schluessel
    #[error("Kein Schluessel gesetzt, Nachricht wird nicht gesendet")]
    KeinSchluessel,

    #[error("Chiffre-Fehler: {0}")]
    Cipher(#[from] CipherError),

    #[error("Protokoll-Fehler: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Transport-Fehler: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// Die Verbindung zum Relay ist bereits beendet
    #[error("Nicht mit dem Relay verbunden")]
    NichtVerbunden,
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
