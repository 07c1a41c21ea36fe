//! rangerfunk-relay – WebSocket Fan-out
//!
//! Das Relay nimmt `chatMessage`-Events von beliebigen Verbindungen an und
//! verteilt den Frame-Text unveraendert an **alle** verbundenen Clients,
//! inklusive Absender. Es gibt keine Historie, keine Validierung des
//! Inhalts und keine Zustellbestaetigung.
//!
//! ## Architektur
//!
//! ```text
//! axum Router (relay_router)
//!     |  GET /      -> index.html
//!     |  GET /ws    -> WebSocket-Upgrade
//!     |  *          -> ServeDir(public)
//!     v
//! RelayVerbindung (pro WebSocket ein Task)
//!     |
//!     v
//! RelayDispatcher  – liest nur den Event-Namen
//!     |
//!     v
//! EventBroadcaster – ein Topic, an_alle_senden
//! ```

pub mod broadcast;
pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod server_state;

// Bequeme Re-Exporte
pub use broadcast::{EventBroadcaster, Frame, Zustellung};
pub use connection::RelayVerbindung;
pub use dispatcher::{DispatchErgebnis, RelayDispatcher};
pub use error::{RelayError, RelayResult};
pub use http::relay_router;
pub use server_state::{RelayConfig, RelayState};
