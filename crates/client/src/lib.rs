//! rangerfunk-client – Client-Seite des Rangerfunk-Chats
//!
//! Der Client haelt den Schluessel lokal, verschluesselt ausgehende
//! Nachrichten vor dem Senden und entschluesselt eingehende Nachrichten
//! nach dem Empfang. Der Server sieht nur Chiffretext.
//!
//! - [`ClientKontext`]: Name, Schluessel, Ranger-Tag und Sende-Handle
//! - [`ServerVerbindung`]: WebSocket-Verbindung zum Relay
//! - [`GerenderteNachricht`]: fertig aufbereitete Zeile fuer die Anzeige

pub mod connection;
pub mod error;
pub mod kontext;
pub mod render;

pub use connection::ServerVerbindung;
pub use error::{ClientError, ClientResult};
pub use kontext::{ClientKontext, STANDARD_NAME};
pub use render::GerenderteNachricht;
