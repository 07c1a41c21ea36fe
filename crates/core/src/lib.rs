//! rangerfunk-core – Gemeinsame Typen und Fehlertypen
//!
//! Dieses Crate stellt die Bausteine bereit, die von Relay, Client und
//! Server gemeinsam genutzt werden.

pub mod error;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use error::{RangerfunkError, Result};
pub use types::{Ranger, VerbindungsId};
