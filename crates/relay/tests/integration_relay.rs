//! Integration-Tests fuer das Relay (echter axum-Server auf Ephemeral-Port)

use futures_util::{SinkExt, StreamExt};
use rangerfunk_observability::RangerfunkMetrics;
use rangerfunk_relay::{relay_router, RelayConfig, RelayState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const INDEX_HTML: &str = "<!doctype html><title>rangerfunk</title>";

struct TestRelay {
    addr: SocketAddr,
    state: Arc<RelayState>,
    _web: tempfile::TempDir,
}

async fn relay_starten() -> TestRelay {
    relay_mit_limit(RelayConfig::default().max_frame_groesse).await
}

async fn relay_mit_limit(max_frame_groesse: usize) -> TestRelay {
    let web = tempfile::tempdir().expect("tempdir");
    std::fs::write(web.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(web.path().join("chat.js"), "// client").unwrap();

    let config = RelayConfig {
        public_verzeichnis: web.path().to_path_buf(),
        max_frame_groesse,
        ..RelayConfig::default()
    };
    let state = RelayState::neu(config, RangerfunkMetrics::neu().unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = relay_router(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    TestRelay {
        addr,
        state,
        _web: web,
    }
}

async fn verbinden(relay: &TestRelay) -> Client {
    let (ws, _) = connect_async(format!("ws://{}/ws", relay.addr))
        .await
        .expect("WebSocket-Verbindung");
    ws
}

/// Wartet bis der Broadcaster `anzahl` Verbindungen kennt
async fn warten_auf_clients(relay: &TestRelay, anzahl: usize) {
    for _ in 0..200 {
        if relay.state.broadcaster.client_anzahl() == anzahl {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "erwartet {anzahl} Clients, registriert: {}",
        relay.state.broadcaster.client_anzahl()
    );
}

async fn naechster_text(client: &mut Client) -> String {
    loop {
        let nachricht = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("Timeout beim Warten auf Frame")
            .expect("Stream beendet")
            .expect("WebSocket-Fehler");
        if let Message::Text(text) = nachricht {
            return text;
        }
    }
}

async fn kein_weiterer_text(client: &mut Client) {
    let ergebnis = tokio::time::timeout(Duration::from_millis(200), client.next()).await;
    assert!(ergebnis.is_err(), "unerwarteter weiterer Frame: {ergebnis:?}");
}

fn chat_frame(user: &str, cipher: &str) -> String {
    format!(r#"{{"event":"chatMessage","data":{{"user":"{user}","cipherText":"{cipher}","ranger":"red"}}}}"#)
}

async fn http_get(addr: SocketAddr, pfad: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let anfrage = format!("GET {pfad} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(anfrage.as_bytes()).await.unwrap();
    let mut antwort = String::new();
    stream.read_to_string(&mut antwort).await.unwrap();
    antwort
}

#[tokio::test]
async fn fan_out_an_alle_inklusive_absender() {
    let relay = relay_starten().await;
    let mut alice = verbinden(&relay).await;
    let mut bob = verbinden(&relay).await;
    let mut carol = verbinden(&relay).await;
    warten_auf_clients(&relay, 3).await;

    let frame = chat_frame("alice", "d3d4");
    alice.send(Message::Text(frame.clone())).await.unwrap();

    for client in [&mut alice, &mut bob, &mut carol] {
        assert_eq!(naechster_text(client).await, frame);
        kein_weiterer_text(client).await;
    }
}

#[tokio::test]
async fn grosse_chat_nachricht_erreicht_alle() {
    let relay = relay_starten().await;
    let mut alice = verbinden(&relay).await;
    let mut bob = verbinden(&relay).await;
    warten_auf_clients(&relay, 2).await;

    // ca. 80 KB, deutlich unter dem Standardlimit von 1 MiB
    let frame = chat_frame("alice", &"ab".repeat(40_000));
    alice.send(Message::Text(frame.clone())).await.unwrap();

    assert_eq!(naechster_text(&mut bob).await, frame);
    assert_eq!(naechster_text(&mut alice).await, frame);
    assert_eq!(relay.state.metriken.frames_ignored_total.get(), 0);
}

#[tokio::test]
async fn nachricht_ueber_limit_beendet_nur_diese_verbindung() {
    let relay = relay_mit_limit(1024).await;
    let mut alice = verbinden(&relay).await;
    let mut bob = verbinden(&relay).await;
    warten_auf_clients(&relay, 2).await;

    let zu_gross = chat_frame("alice", &"ab".repeat(2048));
    let _ = alice.send(Message::Text(zu_gross)).await;
    warten_auf_clients(&relay, 1).await;

    // bob hat nichts erhalten und ist weiter verbunden
    kein_weiterer_text(&mut bob).await;
    let frame = chat_frame("bob", "01");
    bob.send(Message::Text(frame.clone())).await.unwrap();
    assert_eq!(naechster_text(&mut bob).await, frame);
}

#[tokio::test]
async fn unbekannte_events_werden_nicht_verteilt() {
    let relay = relay_starten().await;
    let mut alice = verbinden(&relay).await;
    let mut bob = verbinden(&relay).await;
    warten_auf_clients(&relay, 2).await;

    alice
        .send(Message::Text(r#"{"event":"typing","data":{}}"#.into()))
        .await
        .unwrap();
    alice.send(Message::Text("kein json".into())).await.unwrap();

    // Verbindung bleibt offen und normale Nachrichten kommen weiter an
    let frame = chat_frame("alice", "01");
    alice.send(Message::Text(frame.clone())).await.unwrap();
    assert_eq!(naechster_text(&mut bob).await, frame);
    assert_eq!(naechster_text(&mut alice).await, frame);
}

#[tokio::test]
async fn gleichzeitige_sender_vollstaendige_frames_gleiche_reihenfolge() {
    let relay = relay_starten().await;
    let mut clients = Vec::new();
    for _ in 0..3 {
        clients.push(verbinden(&relay).await);
    }
    let mut beobachter = verbinden(&relay).await;
    warten_auf_clients(&relay, 4).await;

    const PRO_SENDER: usize = 20;
    let mut gesendet = Vec::new();
    let mut aufgaben = Vec::new();
    let mut leser = Vec::new();
    for (nr, client) in clients.into_iter().enumerate() {
        let (mut sink, stream) = client.split();
        leser.push(stream);
        let frames: Vec<String> = (0..PRO_SENDER)
            .map(|i| chat_frame(&format!("sender{nr}"), &format!("{:02x}{:02x}", nr, i)))
            .collect();
        gesendet.extend(frames.iter().cloned());
        aufgaben.push(tokio::spawn(async move {
            for frame in frames {
                sink.send(Message::Text(frame)).await.unwrap();
            }
            sink
        }));
    }
    let mut sinks = Vec::new();
    for aufgabe in aufgaben {
        sinks.push(aufgabe.await.unwrap());
    }

    let gesamt = 3 * PRO_SENDER;
    let mut beobachtet = Vec::new();
    for _ in 0..gesamt {
        beobachtet.push(naechster_text(&mut beobachter).await);
    }

    // Jeder empfangene Frame ist eine unveraenderte Kopie genau eines gesendeten
    let mut sortiert_gesendet = gesendet.clone();
    let mut sortiert_beobachtet = beobachtet.clone();
    sortiert_gesendet.sort();
    sortiert_beobachtet.sort();
    assert_eq!(sortiert_beobachtet, sortiert_gesendet);

    // Alle Absender sehen dieselbe Reihenfolge wie der Beobachter
    for mut stream in leser {
        let mut folge = Vec::new();
        while folge.len() < gesamt {
            let nachricht = tokio::time::timeout(Duration::from_secs(5), stream.next())
                .await
                .unwrap()
                .unwrap()
                .unwrap();
            if let Message::Text(text) = nachricht {
                folge.push(text);
            }
        }
        assert_eq!(folge, beobachtet);
    }
}

#[tokio::test]
async fn trennen_entfernt_client() {
    let relay = relay_starten().await;
    let mut alice = verbinden(&relay).await;
    let bob = verbinden(&relay).await;
    warten_auf_clients(&relay, 2).await;
    assert_eq!(relay.state.metriken.connected_clients.get(), 2);

    drop(bob);
    warten_auf_clients(&relay, 1).await;

    let frame = chat_frame("alice", "ff");
    alice.send(Message::Text(frame.clone())).await.unwrap();
    assert_eq!(naechster_text(&mut alice).await, frame);
    assert_eq!(relay.state.metriken.deliveries_total.get(), 1);
}

#[tokio::test]
async fn shutdown_schliesst_verbindungen() {
    let relay = relay_starten().await;
    let mut alice = verbinden(&relay).await;
    warten_auf_clients(&relay, 1).await;

    relay.state.herunterfahren();

    let ende = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(Ok(nachricht)) = alice.next().await {
            if let Message::Close(_) = nachricht {
                break;
            }
        }
    })
    .await;
    assert!(ende.is_ok(), "Verbindung muss nach Shutdown enden");
    warten_auf_clients(&relay, 0).await;
}

#[tokio::test]
async fn einstiegsseite_und_statische_dateien() {
    let relay = relay_starten().await;

    let index = http_get(relay.addr, "/").await;
    assert!(index.starts_with("HTTP/1.1 200"), "{index}");
    assert!(index.contains(INDEX_HTML));

    let js = http_get(relay.addr, "/chat.js").await;
    assert!(js.starts_with("HTTP/1.1 200"), "{js}");
    assert!(js.contains("// client"));

    let fehlt = http_get(relay.addr, "/gibt-es-nicht.css").await;
    assert!(fehlt.starts_with("HTTP/1.1 404"), "{fehlt}");
}
