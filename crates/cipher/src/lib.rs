//! rangerfunk-cipher – Client-seitige Verschleierung von Chat-Nachrichten
//!
//! Additive Stromchiffre mit sich wiederholendem Schluessel ueber den
//! Bytebereich 0–255, Ausgabe als Hex-String (zwei Kleinbuchstaben-Ziffern
//! pro Zeichen). Die Chiffre ist bewusst schwach und **nicht**
//! kryptografisch sicher – sie verhindert nur, dass der Relay-Server den
//! Klartext direkt mitlesen kann.
//!
//! ## Zeichenbereich
//! Klartext und Schluessel werden als Latin-1-Codeeinheiten (U+0000..=U+00FF)
//! interpretiert. Zeichen ausserhalb dieses Bereichs werden mit
//! [`CipherError::ZeichenAusserhalbBereich`] abgelehnt statt stillschweigend
//! abgeschnitten.
//!
//! ```
//! use rangerfunk_cipher::{decode, encode};
//!
//! let hex = encode("hi", "k").unwrap();
//! assert_eq!(hex, "d3d4");
//! assert_eq!(decode(&hex, "k").unwrap(), "hi");
//! ```

pub mod additive;
pub mod error;
pub mod schluessel;

#[cfg(test)]
mod proptests;

pub use additive::{decode, encode};
pub use error::{CipherError, CipherResult};
pub use schluessel::Schluessel;
