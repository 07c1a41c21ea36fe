//! rangerfunk-protocol – Wire-Format
//!
//! Jedes Event ist ein JSON-Textframe der Form
//! `{"event": "<name>", "data": {...}}`. In beide Richtungen fliesst
//! dieselbe Form; das Relay interpretiert `data` nicht.

pub mod control;
pub mod error;
pub mod wire;

pub use control::{ChatNachricht, RelayEvent, EVENT_CHAT_MESSAGE};
pub use error::{ProtocolError, ProtocolResult};
pub use wire::FrameCodec;
