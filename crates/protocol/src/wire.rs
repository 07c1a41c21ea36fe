//! Wire-Format fuer WebSocket-Textframes
//!
//! Ein Frame enthaelt genau ein JSON-Event:
//!
//! ```text
//! {"event":"chatMessage","data":{"user":"…","cipherText":"d3d4","ranger":"red"}}
//! ```
//!
//! Das Relay liest nur den Event-Namen (`event_name`) und reicht den
//! Frame-Text danach unveraendert weiter. Clients kodieren und dekodieren
//! vollstaendige `RelayEvent`s.

use serde::Deserialize;

use crate::control::{RelayEvent, EVENT_CHAT_MESSAGE};
use crate::error::{ProtocolError, ProtocolResult};

// ---------------------------------------------------------------------------
// Konstanten
// ---------------------------------------------------------------------------

/// Standard-maximale Frame-Groesse (1 MiB)
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Nur der Kopf eines Frames; `data` wird nicht angefasst
#[derive(Deserialize)]
struct EventKopf {
    event: String,
}

// ---------------------------------------------------------------------------
// FrameCodec
// ---------------------------------------------------------------------------

/// Kodiert und dekodiert JSON-Textframes mit Groessenlimit
#[derive(Debug, Clone)]
pub struct FrameCodec {
    /// Maximale erlaubte Frame-Groesse in Bytes
    max_frame_size: usize,
}

impl FrameCodec {
    /// Erstellt einen neuen `FrameCodec` mit Standard-Limits
    pub fn new() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    /// Erstellt einen `FrameCodec` mit benutzerdefinierter maximaler Frame-Groesse
    pub fn with_max_size(max_frame_size: usize) -> Self {
        Self { max_frame_size }
    }

    /// Gibt die konfigurierte maximale Frame-Groesse zurueck
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    fn groesse_pruefen(&self, groesse: usize) -> ProtocolResult<()> {
        if groesse > self.max_frame_size {
            return Err(ProtocolError::FrameZuGross {
                groesse,
                maximum: self.max_frame_size,
            });
        }
        Ok(())
    }

    /// Liest nur den Event-Namen eines Frames
    ///
    /// Prueft keine Groesse: das Limit fuer eingehende Frames setzt die
    /// Transportschicht.
    pub fn event_name(&self, frame: &str) -> ProtocolResult<String> {
        let kopf: EventKopf = serde_json::from_str(frame)?;
        Ok(kopf.event)
    }

    /// Dekodiert einen vollstaendigen Frame
    ///
    /// Unbekannte Event-Namen ergeben `UnbekanntesEvent`, damit Aufrufer
    /// sie ignorieren koennen statt die Verbindung zu beenden.
    pub fn decode(&self, frame: &str) -> ProtocolResult<RelayEvent> {
        self.groesse_pruefen(frame.len())?;
        let name = self.event_name(frame)?;
        if name != EVENT_CHAT_MESSAGE {
            return Err(ProtocolError::UnbekanntesEvent(name));
        }
        Ok(serde_json::from_str(frame)?)
    }

    /// Kodiert ein Event als Textframe
    pub fn encode(&self, event: &RelayEvent) -> ProtocolResult<String> {
        let json = serde_json::to_string(event)?;
        self.groesse_pruefen(json.len())?;
        Ok(json)
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ChatNachricht;
    use rangerfunk_core::Ranger;

    fn test_event() -> RelayEvent {
        RelayEvent::from(ChatNachricht::neu("alice", "d3d4", Ranger::Green))
    }

    #[test]
    fn encode_decode() {
        let codec = FrameCodec::new();
        let frame = codec.encode(&test_event()).unwrap();
        assert_eq!(codec.decode(&frame).unwrap(), test_event());
    }

    #[test]
    fn event_name_ignoriert_data() {
        let codec = FrameCodec::new();
        let frame = r#"{"event":"chatMessage","data":{"voellig":"anders","x":[1,2]}}"#;
        assert_eq!(codec.event_name(frame).unwrap(), "chatMessage");
    }

    #[test]
    fn event_name_ohne_data() {
        let codec = FrameCodec::new();
        assert_eq!(codec.event_name(r#"{"event":"typing"}"#).unwrap(), "typing");
    }

    #[test]
    fn unbekanntes_event() {
        let codec = FrameCodec::new();
        let ergebnis = codec.decode(r#"{"event":"typing","data":{}}"#);
        assert!(matches!(ergebnis, Err(ProtocolError::UnbekanntesEvent(name)) if name == "typing"));
    }

    #[test]
    fn kein_json() {
        let codec = FrameCodec::new();
        assert!(matches!(codec.event_name("hallo"), Err(ProtocolError::Json(_))));
    }

    #[test]
    fn decode_lehnt_zu_grossen_frame_ab() {
        let codec = FrameCodec::with_max_size(16);
        let frame = format!(r#"{{"event":"chatMessage","data":"{}"}}"#, "x".repeat(64));
        assert!(matches!(
            codec.decode(&frame),
            Err(ProtocolError::FrameZuGross { maximum: 16, .. })
        ));
    }

    #[test]
    fn event_name_ohne_groessenlimit() {
        let codec = FrameCodec::with_max_size(16);
        let frame = format!(r#"{{"event":"chatMessage","data":"{}"}}"#, "x".repeat(64));
        assert_eq!(codec.event_name(&frame).unwrap(), "chatMessage");
    }

    #[test]
    fn ablehnung_beim_encode_zu_grosse_nachricht() {
        let codec = FrameCodec::with_max_size(10);
        assert!(matches!(
            codec.encode(&test_event()),
            Err(ProtocolError::FrameZuGross { .. })
        ));
    }

    #[test]
    fn default_max_size() {
        assert_eq!(FrameCodec::default().max_frame_size(), DEFAULT_MAX_FRAME_SIZE);
        assert_eq!(DEFAULT_MAX_FRAME_SIZE, 1024 * 1024);
    }
}
