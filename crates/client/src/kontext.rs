//! Client-Kontext: alles was ein verbundener Client lokal weiss
//!
//! Der Kontext besitzt das Sende-Handle der Verbindung, den Anzeigenamen,
//! den aktuellen Schluessel und den Ranger-Tag. Er entsteht beim Verbinden
//! und wird mit der Verbindung verworfen. Der Schluessel verlaesst den
//! Kontext nie.

use rangerfunk_cipher::Schluessel;
use rangerfunk_core::Ranger;
use rangerfunk_protocol::{ChatNachricht, FrameCodec, RelayEvent};
use tokio::sync::mpsc;

use crate::error::{ClientError, ClientResult};
use crate::render::GerenderteNachricht;

/// Name fuer Clients ohne (oder mit leerem) Namen
pub const STANDARD_NAME: &str = "Anonymous";

/// Lokaler Zustand eines Chat-Clients
pub struct ClientKontext {
    ausgang: mpsc::Sender<String>,
    codec: FrameCodec,
    name: String,
    schluessel: Option<Schluessel>,
    ranger: Ranger,
}

impl ClientKontext {
    /// Erstellt einen Kontext ohne Schluessel mit Ranger `red`
    pub fn neu(ausgang: mpsc::Sender<String>, name: &str) -> Self {
        Self {
            ausgang,
            codec: FrameCodec::new(),
            name: name_normalisieren(name),
            schluessel: None,
            ranger: Ranger::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranger(&self) -> Ranger {
        self.ranger
    }

    pub fn hat_schluessel(&self) -> bool {
        self.schluessel.is_some()
    }

    /// Setzt den Anzeigenamen; leere Eingabe wird zu `Anonymous`
    pub fn name_setzen(&mut self, name: &str) {
        self.name = name_normalisieren(name);
    }

    pub fn ranger_setzen(&mut self, ranger: Ranger) {
        self.ranger = ranger;
    }

    /// Setzt den Schluessel. Ein leerer String entfernt ihn.
    pub fn schluessel_setzen(&mut self, schluessel: &str) -> ClientResult<()> {
        self.schluessel = if schluessel.is_empty() {
            None
        } else {
            Some(Schluessel::neu(schluessel)?)
        };
        Ok(())
    }

    /// Verschluesselt und sendet eine Nachricht.
    ///
    /// Leere Nachrichten werden ignoriert (`Ok(None)`). Ohne Schluessel wird
    /// nichts gesendet. Bei Erfolg kommt die lokale Darstellung zurueck,
    /// das Echo des Relays wird spaeter in [`empfangen`](Self::empfangen)
    /// verworfen.
    pub async fn senden(&self, klartext: &str) -> ClientResult<Option<GerenderteNachricht>> {
        if klartext.is_empty() {
            return Ok(None);
        }
        let schluessel = self.schluessel.as_ref().ok_or(ClientError::KeinSchluessel)?;
        let cipher_text = schluessel.encode(klartext)?;

        let nachricht = ChatNachricht::neu(self.name.clone(), cipher_text.clone(), self.ranger);
        let frame = self.codec.encode(&RelayEvent::from(nachricht))?;
        self.ausgang
            .send(frame)
            .await
            .map_err(|_| ClientError::NichtVerbunden)?;

        tracing::debug!(laenge = klartext.chars().count(), "Nachricht gesendet");
        Ok(Some(GerenderteNachricht::neu(
            self.name.clone(),
            self.ranger,
            klartext,
            cipher_text,
            true,
        )))
    }

    /// Bereitet eine empfangene Nachricht auf.
    ///
    /// Nachrichten mit dem eigenen Namen sind Echos und liefern `None`.
    /// Ohne Schluessel oder bei kaputtem Chiffretext bleibt der Klartext leer.
    pub fn empfangen(&self, nachricht: &ChatNachricht) -> Option<GerenderteNachricht> {
        if nachricht.user == self.name {
            return None;
        }
        let klartext = self.entschluesseln(&nachricht.cipher_text);
        Some(GerenderteNachricht::neu(
            nachricht.user.clone(),
            nachricht.ranger,
            klartext,
            nachricht.cipher_text.clone(),
            false,
        ))
    }

    fn entschluesseln(&self, cipher_text: &str) -> String {
        let Some(schluessel) = &self.schluessel else {
            return String::new();
        };
        match schluessel.decode(cipher_text) {
            Ok(klartext) => klartext,
            Err(e) => {
                tracing::warn!(fehler = %e, "Chiffretext nicht lesbar");
                String::new()
            }
        }
    }
}

fn name_normalisieren(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        STANDARD_NAME.to_string()
    } else {
        name.to_string()
    }
}
