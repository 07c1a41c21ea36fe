//! Fehlertypen fuer das Wire-Format

use thiserror::Error;

/// Fehler beim Kodieren oder Dekodieren eines Frames
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Frame zu gross: {groesse} Bytes (Maximum: {maximum} Bytes)")]
    FrameZuGross { groesse: usize, maximum: usize },

    #[error("JSON-Fehler: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unbekanntes Event: '{0}'")]
    UnbekanntesEvent(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
