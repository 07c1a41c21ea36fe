//! Fehlertypen fuer die Chiffre

use thiserror::Error;

/// Fehler beim Ver- oder Entschluesseln
#[derive(Debug, Error, PartialEq)]
pub enum CipherError {
    #[error("Schluessel darf nicht leer sein")]
    LeererSchluessel,

    #[error("{feld}: Zeichen {zeichen:?} an Position {position} liegt ausserhalb von Latin-1")]
    ZeichenAusserhalbBereich {
        feld: &'static str,
        zeichen: char,
        position: usize,
    },

    #[error("Ungueltiger Hex-Chiffretext: {0}")]
    UngueltigesHex(#[from] hex::FromHexError),
}

pub type CipherResult<T> = Result<T, CipherError>;
