//! Validierter Chiffre-Schluessel
//!
//! Der Schluessel wird einmal geprueft (nicht leer, nur Latin-1) und kann
//! danach beliebig oft verwendet werden. Er verlaesst den Client nie.

use crate::additive::{latin1_bytes, verschluesseln_bytes, entschluesseln_bytes};
use crate::error::{CipherError, CipherResult};

/// Nicht-leerer Schluessel aus Latin-1-Codeeinheiten
#[derive(Clone, PartialEq, Eq)]
pub struct Schluessel {
    bytes: Vec<u8>,
}

impl Schluessel {
    /// Prueft und uebernimmt einen Schluessel
    pub fn neu(schluessel: &str) -> CipherResult<Self> {
        if schluessel.is_empty() {
            return Err(CipherError::LeererSchluessel);
        }
        let bytes = latin1_bytes(schluessel, "Schluessel")?;
        Ok(Self { bytes })
    }

    /// Verschluesselt `klartext` zu einem Hex-String
    pub fn encode(&self, klartext: &str) -> CipherResult<String> {
        let text = latin1_bytes(klartext, "Klartext")?;
        Ok(verschluesseln_bytes(&text, &self.bytes))
    }

    /// Entschluesselt einen Hex-String zurueck zum Klartext
    pub fn decode(&self, cipher_hex: &str) -> CipherResult<String> {
        let bytes = hex::decode(cipher_hex)?;
        Ok(entschluesseln_bytes(&bytes, &self.bytes))
    }
}

impl std::fmt::Debug for Schluessel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schluessel")
            .field("laenge", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
