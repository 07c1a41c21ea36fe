//! Fehlertypen fuer Rangerfunk
//!
//! Zentraler Fehler-Enum fuer Zustaende die crate-uebergreifend auftreten.
//! Die Fach-Crates definieren eigene Fehler und konvertieren bei Bedarf.

use thiserror::Error;

/// Globaler Result-Alias fuer Rangerfunk
pub type Result<T> = std::result::Result<T, RangerfunkError>;

/// Crate-uebergreifende Fehler im Rangerfunk-System
#[derive(Debug, Error)]
pub enum RangerfunkError {
    #[error("Unbekannter Ranger: '{0}'")]
    UnbekannterRanger(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbekannter_ranger_nennt_wert() {
        let e = RangerfunkError::UnbekannterRanger("purple".into());
        assert!(e.to_string().contains("'purple'"));
    }

    #[test]
    fn anyhow_wird_durchgereicht() {
        let e: RangerfunkError = anyhow::anyhow!("Socket weg").into();
        assert_eq!(e.to_string(), "Socket weg");
    }
}
