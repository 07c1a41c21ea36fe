//! Event-Definitionen
//!
//! Es gibt genau ein Event: `chatMessage`. Es wird vom Client gesendet
//! und vom Relay unveraendert an alle Verbindungen (inklusive Absender)
//! weitergereicht.

use rangerfunk_core::Ranger;
use serde::{Deserialize, Serialize};

/// Event-Name fuer Chat-Nachrichten
pub const EVENT_CHAT_MESSAGE: &str = "chatMessage";

/// Verschluesselte Chat-Nachricht
///
/// Wird vom sendenden Client erzeugt und danach nicht mehr veraendert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatNachricht {
    /// Anzeigename des Absenders
    pub user: String,
    /// Hex-kodierter Chiffretext
    pub cipher_text: String,
    /// Kosmetischer Gruppen-Tag (Standard: red)
    #[serde(default)]
    pub ranger: Ranger,
}

impl ChatNachricht {
    pub fn neu(user: impl Into<String>, cipher_text: impl Into<String>, ranger: Ranger) -> Self {
        Self {
            user: user.into(),
            cipher_text: cipher_text.into(),
            ranger,
        }
    }
}

/// Alle Events die ueber eine Relay-Verbindung laufen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum RelayEvent {
    #[serde(rename = "chatMessage")]
    ChatMessage(ChatNachricht),
}

impl RelayEvent {
    /// Wire-Name des Events
    pub fn name(&self) -> &'static str {
        match self {
            RelayEvent::ChatMessage(_) => EVENT_CHAT_MESSAGE,
        }
    }
}

impl From<ChatNachricht> for RelayEvent {
    fn from(nachricht: ChatNachricht) -> Self {
        RelayEvent::ChatMessage(nachricht)
    }
}
