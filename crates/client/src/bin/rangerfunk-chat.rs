//! Rangerfunk Terminal-Chat
//!
//! Liest Zeilen von stdin, verschluesselt sie lokal und sendet sie an das
//! Relay. Befehle: `/key <schluessel>`, `/ranger <tag>`, `/name <name>`,
//! `/quit`.

use anyhow::Context;
use clap::Parser;
use rangerfunk_client::{ClientError, ClientKontext, ServerVerbindung};
use rangerfunk_core::Ranger;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "rangerfunk-chat", version, about = "Verschluesselter Terminal-Chat fuer Rangerfunk")]
struct Args {
    /// WebSocket-URL des Relays
    #[arg(long, default_value = "ws://localhost:3000/ws")]
    url: String,

    /// Anzeigename (leer = Anonymous)
    #[arg(long, default_value = "")]
    name: String,

    /// Gemeinsamer Schluessel
    #[arg(long, env = "RANGERFUNK_KEY")]
    key: Option<String>,

    /// Ranger-Tag (red, blue, green, yellow, pink)
    #[arg(long, default_value = "red")]
    ranger: Ranger,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rangerfunk_client=info,warn".into()),
        )
        .init();

    let mut verbindung = ServerVerbindung::verbinden(&args.url)
        .await
        .with_context(|| format!("Verbindung zu {} fehlgeschlagen", args.url))?;

    let mut kontext = verbindung.kontext(&args.name);
    kontext.ranger_setzen(args.ranger);
    if let Some(key) = &args.key {
        kontext
            .schluessel_setzen(key)
            .context("Ungueltiger Schluessel")?;
    }

    println!(
        "Verbunden als {} [{}]. /key, /ranger, /name, /quit",
        kontext.name(),
        kontext.ranger().label()
    );

    let mut zeilen = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            zeile = zeilen.next_line() => {
                let Some(zeile) = zeile.context("stdin nicht lesbar")? else {
                    break;
                };
                if !zeile_verarbeiten(&mut kontext, &zeile).await {
                    break;
                }
            }
            nachricht = verbindung.empfangen() => {
                let Some(nachricht) = nachricht else {
                    tracing::warn!("Verbindung zum Relay verloren");
                    break;
                };
                if let Some(gerendert) = kontext.empfangen(&nachricht) {
                    println!("{gerendert}");
                }
            }
        }
    }

    verbindung.trennen().await;
    Ok(())
}

/// Verarbeitet eine Eingabezeile; `false` beendet den Chat
async fn zeile_verarbeiten(kontext: &mut ClientKontext, zeile: &str) -> bool {
    if let Some(befehl) = zeile.strip_prefix('/') {
        let (name, argument) = befehl.split_once(' ').unwrap_or((befehl, ""));
        match name {
            "quit" => return false,
            "key" => match kontext.schluessel_setzen(argument) {
                Ok(()) if kontext.hat_schluessel() => println!("Schluessel gesetzt"),
                Ok(()) => println!("Schluessel entfernt"),
                Err(e) => tracing::warn!(fehler = %e, "Schluessel abgelehnt"),
            },
            "ranger" => match argument.trim().parse::<Ranger>() {
                Ok(ranger) => {
                    kontext.ranger_setzen(ranger);
                    println!("Ranger: {}", ranger.label());
                }
                Err(e) => tracing::warn!(fehler = %e, "Ranger abgelehnt"),
            },
            "name" => {
                kontext.name_setzen(argument);
                println!("Name: {}", kontext.name());
            }
            _ => tracing::warn!(befehl = name, "Unbekannter Befehl"),
        }
        return true;
    }

    match kontext.senden(zeile).await {
        Ok(Some(eigene)) => println!("{eigene}"),
        Ok(None) => {}
        Err(ClientError::KeinSchluessel) => {
            tracing::warn!("Erst einen Schluessel setzen: /key <schluessel>");
        }
        Err(ClientError::NichtVerbunden) => {
            tracing::warn!("Verbindung zum Relay beendet");
            return false;
        }
        Err(e) => tracing::warn!(fehler = %e, "Nachricht nicht gesendet"),
    }
    true
}
