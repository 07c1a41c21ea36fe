//! Aufbereitung empfangener und eigener Nachrichten fuer die Anzeige

use chrono::{DateTime, Utc};
use rangerfunk_core::Ranger;
use std::fmt;

/// Eine entschluesselte Nachricht, fertig zur Anzeige
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GerenderteNachricht {
    pub user: String,
    pub ranger: Ranger,
    /// Entschluesselter Text; leer wenn kein oder ein unpassender Schluessel vorliegt
    pub klartext: String,
    /// Chiffretext so wie er uebertragen wurde
    pub cipher_text: String,
    /// `true` fuer lokal gesendete Nachrichten
    pub ist_eigene: bool,
    pub empfangen_um: DateTime<Utc>,
}

impl GerenderteNachricht {
    pub fn neu(
        user: impl Into<String>,
        ranger: Ranger,
        klartext: impl Into<String>,
        cipher_text: impl Into<String>,
        ist_eigene: bool,
    ) -> Self {
        Self {
            user: user.into(),
            ranger,
            klartext: klartext.into(),
            cipher_text: cipher_text.into(),
            ist_eigene,
            empfangen_um: Utc::now(),
        }
    }

    /// Anzeige-Label des Rangers, z.B. "Red ranger"
    pub fn ranger_label(&self) -> String {
        self.ranger.label()
    }
}

impl fmt::Display for GerenderteNachricht {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markierung = if self.ist_eigene { " (ich)" } else { "" };
        write!(
            f,
            "[{}] {}{} [{}]: {}\n    Cipher: {}",
            self.empfangen_um.format("%H:%M:%S"),
            self.user,
            markierung,
            self.ranger_label(),
            self.klartext,
            self.cipher_text
        )
    }
}
