use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

use tui_crush::adapter::protocol::{create_hello, hello_line, PROTOCOL_VERSION};
use tui_crush::adapter::server::{run_server, ServerConfig};
use tui_crush::adapter::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
use tui_crush::bridge::ObservationPump;
use tui_crush::core::{Board, GameState, Palette};
use tui_crush::types::GameAction;

struct Client {
    lines: tokio::io::Lines<BufReader<OwnedReadHalf>>,
    write: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: std::net::SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.expect("connect failed");
        let (read_half, write) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            write,
        }
    }

    async fn send(&mut self, line: &str) {
        self.write.write_all(line.as_bytes()).await.unwrap();
        self.write.write_all(b"\n").await.unwrap();
        self.write.flush().await.unwrap();
    }

    async fn hello(&mut self, seq: u64, stream: bool) -> serde_json::Value {
        let mut hello = create_hello(seq, "e2e-test", PROTOCOL_VERSION);
        hello.requested.stream_observations = stream;
        self.send(&hello_line(&hello).unwrap()).await;
        self.recv().await
    }

    async fn recv(&mut self) -> serde_json::Value {
        let line = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
            .await
            .expect("timed out waiting for a line")
            .unwrap()
            .expect("connection closed");
        serde_json::from_str(&line).unwrap()
    }
}

struct Harness {
    addr: std::net::SocketAddr,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    server: tokio::task::JoinHandle<()>,
}

async fn start(max_pending: usize) -> Harness {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_pending_commands: max_pending,
    };
    let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let (ready_tx, ready_rx) = oneshot::channel();

    let server = tokio::spawn(async move {
        let _ = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");

    Harness {
        addr,
        cmd_rx,
        out_tx,
        server,
    }
}

async fn next_inbound(rx: &mut mpsc::Receiver<InboundCommand>) -> InboundCommand {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .expect("expected inbound command")
}

#[tokio::test]
async fn adapter_hello_swap_ack_and_observation() {
    let mut h = start(8).await;
    let mut client = Client::connect(h.addr).await;

    let welcome = client.hello(1, true).await;
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(welcome["seq"], 1);
    assert_eq!(welcome["role"], "controller");

    let mut game = GameState::from_board(
        Board::from_rows(&["RGR", "GRY", "BYG"]).unwrap(),
        Palette::classic(),
        1,
    );
    let mut pump = ObservationPump::new();

    // Hello with streaming asks for an immediate observation.
    let snapshot_request = next_inbound(&mut h.cmd_rx).await;
    assert!(matches!(snapshot_request.payload, InboundPayload::SnapshotRequest));
    h.out_tx.send(pump.handle(&mut game, snapshot_request)).unwrap();
    let obs = client.recv().await;
    assert_eq!(obs["type"], "observation");
    assert_eq!(obs["width"], 3);
    assert_eq!(obs["board"][0], serde_json::json!([1, 4, 1]));

    client
        .send(r#"{"type":"command","seq":2,"ts":1,"mode":"swap","swap":{"from":1,"to":4}}"#)
        .await;
    let inbound = next_inbound(&mut h.cmd_rx).await;
    assert_eq!(inbound.seq, 2);
    assert!(matches!(
        inbound.payload,
        InboundPayload::Command(ClientCommand::Swap { from: 1, to: 4 })
    ));
    h.out_tx.send(pump.handle(&mut game, inbound)).unwrap();

    let ack = client.recv().await;
    assert_eq!(ack["type"], "ack");
    assert_eq!(ack["seq"], 2);
    assert_eq!(ack["committed"], true);
    assert_eq!(ack["score_delta"], 3);

    h.out_tx.send(pump.poll(&mut game).unwrap()).unwrap();
    let obs = client.recv().await;
    assert_eq!(obs["type"], "observation");
    assert_eq!(obs["score"], 3);
    assert_eq!(obs["last_event"]["kind"], "swap_committed");

    h.server.abort();
}

#[tokio::test]
async fn adapter_action_mode_and_rejected_swap() {
    let mut h = start(8).await;
    let mut client = Client::connect(h.addr).await;
    client.hello(1, false).await;

    client
        .send(r#"{"type":"command","seq":2,"ts":1,"mode":"action","actions":["cursorRight","select"]}"#)
        .await;
    let inbound = next_inbound(&mut h.cmd_rx).await;
    match inbound.payload {
        InboundPayload::Command(ClientCommand::Actions(a)) => {
            assert_eq!(a.as_slice(), &[GameAction::CursorRight, GameAction::Select]);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    let mut game = GameState::from_board(
        Board::from_rows(&["RGB", "GBR", "BRG"]).unwrap(),
        Palette::classic(),
        1,
    );
    let mut pump = ObservationPump::new();
    client
        .send(r#"{"type":"command","seq":3,"ts":1,"mode":"swap","swap":{"from":0,"to":1}}"#)
        .await;
    let inbound = next_inbound(&mut h.cmd_rx).await;
    h.out_tx.send(pump.handle(&mut game, inbound)).unwrap();
    let ack = client.recv().await;
    assert_eq!(ack["committed"], false);
    assert_eq!(ack["reason"], "noMatch");

    h.server.abort();
}

#[tokio::test]
async fn adapter_rejects_commands_before_hello_and_stale_seq() {
    let h = start(8).await;
    let mut client = Client::connect(h.addr).await;

    client
        .send(r#"{"type":"command","seq":1,"ts":1,"mode":"swap","swap":{"from":0,"to":1}}"#)
        .await;
    let err = client.recv().await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "handshake_required");

    client.hello(5, false).await;
    client
        .send(r#"{"type":"command","seq":5,"ts":1,"mode":"swap","swap":{"from":0,"to":1}}"#)
        .await;
    let err = client.recv().await;
    assert_eq!(err["code"], "invalid_command");
    assert_eq!(err["seq"], 5);

    client.send(r#"{"type":"command","seq":6,"#).await;
    let err = client.recv().await;
    assert_eq!(err["code"], "invalid_command");
    assert_eq!(err["seq"], 6);

    h.server.abort();
}

#[tokio::test]
async fn adapter_observer_cannot_command_and_is_promoted() {
    let mut h = start(8).await;
    let mut first = Client::connect(h.addr).await;
    assert_eq!(first.hello(1, false).await["role"], "controller");

    let mut second = Client::connect(h.addr).await;
    let welcome = second.hello(1, false).await;
    assert_eq!(welcome["role"], "observer");

    second
        .send(r#"{"type":"command","seq":2,"ts":1,"mode":"swap","swap":{"from":0,"to":1}}"#)
        .await;
    assert_eq!(second.recv().await["code"], "not_controller");

    drop(first);

    // Retry until the server has noticed the disconnect and the command is queued.
    let mut promoted = false;
    for seq in 3..40u64 {
        let line = format!(
            r#"{{"type":"command","seq":{seq},"ts":1,"mode":"swap","swap":{{"from":0,"to":1}}}}"#
        );
        second.send(&line).await;
        if let Ok(Some(inbound)) =
            tokio::time::timeout(Duration::from_millis(100), h.cmd_rx.recv()).await
        {
            assert_eq!(inbound.seq, seq);
            promoted = true;
            break;
        }
        assert_eq!(second.recv().await["code"], "not_controller");
    }
    assert!(promoted, "observer was never promoted");

    h.server.abort();
}

#[tokio::test]
async fn adapter_backpressure_returns_error() {
    let h = start(1).await;
    let mut client = Client::connect(h.addr).await;
    client.hello(1, false).await;

    // Nothing drains the queue, so the second command overflows it.
    client
        .send(r#"{"type":"command","seq":2,"ts":1,"mode":"swap","swap":{"from":0,"to":1}}"#)
        .await;
    client
        .send(r#"{"type":"command","seq":3,"ts":1,"mode":"swap","swap":{"from":1,"to":2}}"#)
        .await;

    let err = client.recv().await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["seq"], 3);
    assert_eq!(err["code"], "backpressure");

    h.server.abort();
}
