//! Additive Stromchiffre
//!
//! ```text
//! encode:  c[i] = (p[i] + k[i mod |k|]) mod 256   -> zwei Hex-Ziffern
//! decode:  p[j] = (c[j] - k[j mod |k|] + 256) mod 256
//! ```
//!
//! Ein Zeichen Klartext ergibt genau ein Byte Chiffretext; es gibt weder
//! Padding noch Framing.

use crate::error::{CipherError, CipherResult};
use crate::schluessel::Schluessel;

/// Verschluesselt `klartext` mit `schluessel` zu einem Hex-String
///
/// Schlaegt fehl wenn der Schluessel leer ist oder eines der Argumente
/// Zeichen oberhalb von U+00FF enthaelt.
pub fn encode(klartext: &str, schluessel: &str) -> CipherResult<String> {
    Schluessel::neu(schluessel)?.encode(klartext)
}

/// Entschluesselt einen Hex-String mit `schluessel`
///
/// Schlaegt fehl bei leerem Schluessel, ungerader Laenge oder
/// Nicht-Hex-Zeichen. Ein falscher Schluessel liefert keinen Fehler,
/// sondern unlesbaren Latin-1-Text.
pub fn decode(cipher_hex: &str, schluessel: &str) -> CipherResult<String> {
    Schluessel::neu(schluessel)?.decode(cipher_hex)
}

/// Wandelt einen String in Latin-1-Bytes um
pub(crate) fn latin1_bytes(text: &str, feld: &'static str) -> CipherResult<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(position, zeichen)| {
            u8::try_from(u32::from(zeichen)).map_err(|_| CipherError::ZeichenAusserhalbBereich {
                feld,
                zeichen,
                position,
            })
        })
        .collect()
}

pub(crate) fn verschluesseln_bytes(text: &[u8], schluessel: &[u8]) -> String {
    let chiffre: Vec<u8> = text
        .iter()
        .zip(schluessel.iter().cycle())
        .map(|(p, k)| p.wrapping_add(*k))
        .collect();
    hex::encode(chiffre)
}

pub(crate) fn entschluesseln_bytes(chiffre: &[u8], schluessel: &[u8]) -> String {
    chiffre
        .iter()
        .zip(schluessel.iter().cycle())
        .map(|(c, k)| char::from(c.wrapping_sub(*k)))
        .collect()
}
