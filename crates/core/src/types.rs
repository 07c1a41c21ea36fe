//! Gemeinsame Typen fuer Rangerfunk
//!
//! `VerbindungsId` identifiziert eine Relay-Verbindung, `Ranger` ist der
//! kosmetische Gruppen-Tag einer Chat-Nachricht.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RangerfunkError;

/// Eindeutige ID einer Relay-Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbindungsId(pub Uuid);

impl VerbindungsId {
    /// Erstellt eine neue zufaellige VerbindungsId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for VerbindungsId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VerbindungsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn:{}", self.0)
    }
}

/// Gruppen-Tag einer Nachricht ("ranger")
///
/// Rein kosmetisch: wird weder fuer die Verschluesselung noch fuer das
/// Routing verwendet. Beim Deserialisieren fallen fehlende, leere oder
/// unbekannte Werte auf `Red` zurueck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Ranger {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Pink,
}

impl Ranger {
    /// Alle bekannten Tags in Anzeige-Reihenfolge
    pub const ALLE: [Ranger; 5] = [
        Ranger::Red,
        Ranger::Blue,
        Ranger::Green,
        Ranger::Yellow,
        Ranger::Pink,
    ];

    /// Wire-Name des Tags ("red", "blue", ...)
    pub fn als_str(&self) -> &'static str {
        match self {
            Ranger::Red => "red",
            Ranger::Blue => "blue",
            Ranger::Green => "green",
            Ranger::Yellow => "yellow",
            Ranger::Pink => "pink",
        }
    }

    /// Anzeige-Label, z.B. "Red ranger"
    pub fn label(&self) -> String {
        let name = self.als_str();
        let mut zeichen = name.chars();
        match zeichen.next() {
            Some(erstes) => format!("{}{} ranger", erstes.to_ascii_uppercase(), zeichen.as_str()),
            None => "ranger".to_string(),
        }
    }
}

impl std::fmt::Display for Ranger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

impl std::str::FromStr for Ranger {
    type Err = RangerfunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ranger::ALLE
            .into_iter()
            .find(|r| r.als_str() == s)
            .ok_or_else(|| RangerfunkError::UnbekannterRanger(s.to_string()))
    }
}

impl From<Option<String>> for Ranger {
    fn from(wert: Option<String>) -> Self {
        wert.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}
