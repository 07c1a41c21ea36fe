//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist. Die Umgebungsvariable `PORT` ueberschreibt den
//! konfigurierten Port.

use rangerfunk_relay::RelayConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Statische Web-Dateien
    pub web: WebEinstellungen,
    /// Relay-Einstellungen (Queues, Frame-Limit)
    pub relay: RelayEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Observability-Einstellungen (Metriken, Health)
    pub observability: ObservabilityEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Anzeigename des Servers (nur fuer Logs)
    pub name: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            name: "Rangerfunk Relay".into(),
        }
    }
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse fuer HTTP und WebSocket
    pub bind_adresse: String,
    /// Port fuer HTTP und WebSocket
    pub port: u16,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

/// Statische Web-Dateien (Browser-Client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebEinstellungen {
    /// Verzeichnis mit index.html, chat.js, ...
    pub verzeichnis: PathBuf,
    /// Einstiegsseite fuer `GET /`
    pub index: String,
}

impl Default for WebEinstellungen {
    fn default() -> Self {
        Self {
            verzeichnis: PathBuf::from("public"),
            index: "index.html".into(),
        }
    }
}

/// Relay-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayEinstellungen {
    /// Kapazitaet der Send-Queue pro Verbindung
    pub send_queue_groesse: usize,
    /// Maximale Groesse einer eingehenden WebSocket-Nachricht in Bytes
    pub max_frame_groesse: usize,
}

impl Default for RelayEinstellungen {
    fn default() -> Self {
        let relay = RelayConfig::default();
        Self {
            send_queue_groesse: relay.send_queue_groesse,
            max_frame_groesse: relay.max_frame_groesse,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level oder Filter-Direktive, z.B. "info" oder "rangerfunk_relay=debug"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Observability-Einstellungen (Metriken + Health-Check)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityEinstellungen {
    /// Aktiviert den Observability-Server
    pub aktiviert: bool,
    /// Port fuer Metriken und Health (Standard: 9300)
    pub port: u16,
}

impl Default for ObservabilityEinstellungen {
    fn default() -> Self {
        Self {
            aktiviert: true,
            port: 9300,
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Uebernimmt den Port aus dem Wert der Umgebungsvariable `PORT`
    pub fn port_ueberschreiben(&mut self, port: Option<&str>) -> anyhow::Result<()> {
        if let Some(wert) = port.map(str::trim).filter(|w| !w.is_empty()) {
            self.netzwerk.port = wert
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT='{wert}' ist kein gueltiger Port: {e}"))?;
        }
        Ok(())
    }

    /// Gibt die Bind-Adresse fuer HTTP und WebSocket zurueck
    pub fn http_bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.port)
    }

    /// Gibt die Bind-Adresse fuer den Observability-Server zurueck
    pub fn observability_bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.observability.port)
    }

    /// Leitet die Relay-Konfiguration ab
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            public_verzeichnis: self.web.verzeichnis.clone(),
            index_datei: self.web.index.clone(),
            send_queue_groesse: self.relay.send_queue_groesse,
            max_frame_groesse: self.relay.max_frame_groesse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.netzwerk.port, 3000);
        assert_eq!(cfg.web.verzeichnis, PathBuf::from("public"));
        assert_eq!(cfg.web.index, "index.html");
        assert_eq!(cfg.relay.max_frame_groesse, 1024 * 1024);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.observability.aktiviert);
    }

    #[test]
    fn bind_adressen() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http_bind_adresse(), "0.0.0.0:3000");
        assert_eq!(cfg.observability_bind_adresse(), "0.0.0.0:9300");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [server]
            name = "Funkturm"

            [netzwerk]
            port = 8080

            [web]
            verzeichnis = "/srv/rangerfunk"
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.server.name, "Funkturm");
        assert_eq!(cfg.netzwerk.port, 8080);
        assert_eq!(cfg.web.verzeichnis, PathBuf::from("/srv/rangerfunk"));
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.netzwerk.bind_adresse, "0.0.0.0");
        assert_eq!(cfg.web.index, "index.html");
        assert_eq!(cfg.observability.port, 9300);
    }

    #[test]
    fn port_aus_umgebung() {
        let mut cfg = ServerConfig::default();
        cfg.port_ueberschreiben(Some("4000")).unwrap();
        assert_eq!(cfg.netzwerk.port, 4000);

        cfg.port_ueberschreiben(None).unwrap();
        cfg.port_ueberschreiben(Some("  ")).unwrap();
        assert_eq!(cfg.netzwerk.port, 4000);

        assert!(cfg.port_ueberschreiben(Some("abc")).is_err());
        assert!(cfg.port_ueberschreiben(Some("70000")).is_err());
        assert_eq!(cfg.netzwerk.port, 4000);
    }

    #[test]
    fn relay_config_uebernimmt_werte() {
        let mut cfg = ServerConfig::default();
        cfg.web.verzeichnis = PathBuf::from("web");
        cfg.relay.send_queue_groesse = 8;
        let relay = cfg.relay_config();
        assert_eq!(relay.index_pfad(), PathBuf::from("web").join("index.html"));
        assert_eq!(relay.send_queue_groesse, 8);
    }

    #[test]
    fn fehlende_datei_liefert_standardwerte() {
        let cfg = ServerConfig::laden("/gibt/es/nicht/rangerfunk.toml").unwrap();
        assert_eq!(cfg.netzwerk.port, 3000);
    }

    #[test]
    fn kaputte_datei_ist_fehler() {
        let verzeichnis = tempfile::tempdir().unwrap();
        let pfad = verzeichnis.path().join("config.toml");
        std::fs::write(&pfad, "[netzwerk]\nport = \"drei\"").unwrap();
        assert!(ServerConfig::laden(pfad.to_str().unwrap()).is_err());
    }
}
