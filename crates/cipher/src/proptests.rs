//! Property-Tests fuer die additive Chiffre

use proptest::prelude::*;

use crate::{decode, encode, CipherError};

fn druckbares_ascii() -> impl Strategy<Value = String> {
    "[ -~]{0,200}"
}

fn schluessel_ascii() -> impl Strategy<Value = String> {
    "[ -~]{1,32}"
}

proptest! {
    /// Entschluesseln nach Verschluesseln liefert den Klartext zurueck.
    #[test]
    fn encode_decode_roundtrip(klartext in druckbares_ascii(), schluessel in schluessel_ascii()) {
        let hex = encode(&klartext, &schluessel).unwrap();
        prop_assert_eq!(decode(&hex, &schluessel).unwrap(), klartext);
    }

    /// Gleiche Eingaben ergeben immer denselben Chiffretext.
    #[test]
    fn encode_deterministisch(klartext in druckbares_ascii(), schluessel in schluessel_ascii()) {
        let a = encode(&klartext, &schluessel).unwrap();
        let b = encode(&klartext, &schluessel).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Zwei Hex-Ziffern pro Klartext-Zeichen, nur Kleinbuchstaben.
    #[test]
    fn chiffretext_laenge_doppelt(klartext in "[\\x00-\\xff]{0,200}", schluessel in "[\\x01-\\xff]{1,16}") {
        let hex = encode(&klartext, &schluessel).unwrap();
        prop_assert_eq!(hex.len(), 2 * klartext.chars().count());
        prop_assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    /// Ein leerer Schluessel erzeugt nie einen Chiffretext.
    #[test]
    fn leerer_schluessel_nie_erfolgreich(klartext in druckbares_ascii()) {
        prop_assert_eq!(encode(&klartext, ""), Err(CipherError::LeererSchluessel));
    }
}
