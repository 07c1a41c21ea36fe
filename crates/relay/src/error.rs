//! Fehlertypen fuer das Relay

use thiserror::Error;

/// Fehlertyp fuer das Relay
#[derive(Debug, Error)]
pub enum RelayError {
    /// WebSocket-Fehler der Transportschicht
    #[error("WebSocket-Fehler: {0}")]
    WebSocket(#[from] axum::Error),

    /// Statisches Verzeichnis fehlt oder ist unbrauchbar
    #[error("Web-Verzeichnis ungueltig: {0}")]
    WebVerzeichnis(String),
}

/// Result-Typ fuer das Relay
pub type RelayResult<T> = Result<T, RelayError>;
