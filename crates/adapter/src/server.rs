//! TCP server for the control adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::core::GameSnapshot;
use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_pending_commands: 10,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup. Unparsable values fall back to
    /// the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let host = get("CRUSH_AI_HOST").unwrap_or(defaults.host);
        let port = parse_or(get("CRUSH_AI_PORT"), "CRUSH_AI_PORT", defaults.port);
        let max_pending_commands = parse_or(
            get("CRUSH_AI_MAX_PENDING"),
            "CRUSH_AI_MAX_PENDING",
            defaults.max_pending_commands,
        );

        Self {
            host,
            port,
            max_pending_commands: max_pending_commands.max(1),
        }
    }

    /// True when `CRUSH_AI_DISABLED` is `1` or `true`.
    pub fn is_disabled() -> bool {
        std::env::var("CRUSH_AI_DISABLED")
            .map(|v| is_truthy(&v))
            .unwrap_or(false)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid adapter address {}:{}", self.host, self.port))
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, var: &str, default: T) -> T {
    match value {
        None => default,
        Some(v) => v.parse().unwrap_or_else(|_| {
            warn!(var, value = %v, "ignoring unparsable adapter setting");
            default
        }),
    }
}

fn is_truthy(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

/// Handle to a connected client
#[derive(Debug)]
struct ClientHandle {
    id: usize,
    stream_observations: bool,
    handshaken: bool,
    last_seq: Option<u64>,
    tx: mpsc::UnboundedSender<ServerMessage>,
}

/// Shared server state
#[derive(Debug, Default)]
struct ServerState {
    clients: RwLock<Vec<ClientHandle>>,
    controller: RwLock<Option<usize>>,
}

impl ServerState {
    async fn is_handshaken(&self, client_id: usize) -> bool {
        self.clients
            .read()
            .await
            .iter()
            .find(|c| c.id == client_id)
            .map(|c| c.handshaken)
            .unwrap_or(false)
    }

    /// Record `seq` if it is greater than the last one seen from this client.
    async fn check_and_update_seq(&self, client_id: usize, seq: u64) -> bool {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
            return true;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    async fn send_to(&self, client_id: usize, msg: ServerMessage) {
        let clients = self.clients.read().await;
        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
            let _ = c.tx.send(msg);
        }
    }

    async fn broadcast(&self, msg: ServerMessage) {
        let clients = self.clients.read().await;
        for c in clients.iter().filter(|c| c.handshaken && c.stream_observations) {
            let _ = c.tx.send(msg.clone());
        }
    }

    /// Remove a client, promoting the lowest remaining handshaken id if it was
    /// the controller.
    async fn remove(&self, client_id: usize) {
        let mut controller = self.controller.write().await;
        let mut clients = self.clients.write().await;
        clients.retain(|c| c.id != client_id);

        if *controller == Some(client_id) {
            *controller = clients.iter().filter(|c| c.handshaken).map(|c| c.id).min();
            match *controller {
                Some(new_id) => info!(client = new_id, "controller promoted"),
                None => info!(client = client_id, "controller released"),
            }
        }
    }
}

/// Start the TCP server.
///
/// Sends the bound address on `ready_tx` once listening (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind adapter on {addr}"))?;
    let bound = listener.local_addr()?;
    info!(%bound, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::default());

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                match msg {
                    OutboundMessage::ToClient { client_id, msg } => state.send_to(client_id, msg).await,
                    OutboundMessage::Broadcast { msg } => state.broadcast(msg).await,
                }
            }
        });
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client = client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, &state, command_tx).await {
                warn!(client = client_id, error = %e, "client error");
            }
            state.remove(client_id).await;
            info!(client = client_id, "client disconnected");
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: &ServerState,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    state.clients.write().await.push(ClientHandle {
        id: client_id,
        stream_observations: false,
        handshaken: false,
        last_seq: None,
        tx: tx.clone(),
    });

    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            if serde_json::to_writer(&mut buf, &msg).is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() || writer.flush().await.is_err() {
                break;
            }
        }
    });

    let reply_error = |seq: u64, code: ErrorCode, message: &str| {
        let _ = tx.send(ServerMessage::Error(create_error(seq, code, message)));
    };

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(client = client_id, line = trimmed, "recv");

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, hello.seq).await
                {
                    reply_error(hello.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }

                if !same_major(&hello.protocol_version, PROTOCOL_VERSION) {
                    reply_error(
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("protocol version {} not supported", hello.protocol_version),
                    );
                    break;
                }

                let (role, controller_id) = {
                    let mut controller = state.controller.write().await;
                    let mut clients = state.clients.write().await;
                    if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                        client.handshaken = true;
                        client.last_seq = Some(hello.seq);
                        client.stream_observations = hello.requested.stream_observations;
                    }
                    if controller.is_none() {
                        *controller = Some(client_id);
                        info!(client = client_id, name = %hello.client.name, "client is now controller");
                    }
                    let role = if *controller == Some(client_id) {
                        AssignedRole::Controller
                    } else {
                        AssignedRole::Observer
                    };
                    (role, controller.map(|id| id as u64))
                };

                let welcome = create_welcome(hello.seq, client_id as u64, role, controller_id);
                let _ = tx.send(ServerMessage::Welcome(welcome));

                if hello.requested.stream_observations {
                    let _ = command_tx.try_send(InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    });
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                if !state.is_handshaken(client_id).await {
                    reply_error(cmd.seq, ErrorCode::HandshakeRequired, "send hello before command");
                    continue;
                }
                if !state.check_and_update_seq(client_id, cmd.seq).await {
                    reply_error(cmd.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                if *state.controller.read().await != Some(client_id) {
                    reply_error(cmd.seq, ErrorCode::NotController, "only the controller may send commands");
                    continue;
                }

                let command = match map_command(&cmd) {
                    Ok(c) => c,
                    Err(message) => {
                        reply_error(cmd.seq, ErrorCode::InvalidCommand, message);
                        continue;
                    }
                };

                // The game loop acks after applying; a full queue is reported now.
                if command_tx
                    .try_send(InboundCommand {
                        client_id,
                        seq: cmd.seq,
                        payload: InboundPayload::Command(command),
                    })
                    .is_err()
                {
                    warn!(client = client_id, seq = cmd.seq, "command queue full");
                    reply_error(cmd.seq, ErrorCode::Backpressure, "command queue is full");
                }
            }

            Ok(ParsedMessage::Unknown(unknown)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, unknown.seq).await
                {
                    reply_error(unknown.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                reply_error(unknown.seq, ErrorCode::InvalidCommand, "unknown message type");
            }

            Err(e) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                reply_error(seq, ErrorCode::InvalidCommand, &format!("JSON parse error: {e}"));
            }
        }
    }

    state.remove(client_id).await;
    drop(tx);
    let _ = write_task.await;
    Ok(())
}

fn same_major(version: &str, ours: &str) -> bool {
    let major = |v: &str| v.split('.').next().map(str::to_string);
    major(version).is_some_and(|m| Some(m) == major(ours))
}

/// Map a protocol command into a game-loop command.
fn map_command(cmd: &CommandMessage) -> Result<ClientCommand, &'static str> {
    match cmd.mode {
        CommandMode::Swap => {
            let swap = cmd.swap.ok_or("missing swap")?;
            Ok(ClientCommand::Swap {
                from: swap.from,
                to: swap.to,
            })
        }
        CommandMode::Action => {
            let actions = cmd.actions.as_ref().ok_or("missing actions")?;
            if actions.0.is_empty() {
                return Err("empty actions");
            }
            Ok(ClientCommand::Actions(actions.0.clone()))
        }
    }
}

/// Build an observation from a snapshot.
pub fn build_observation(snap: &GameSnapshot, seq: u64, last_event: Option<LastEvent>) -> ObservationMessage {
    ObservationMessage {
        seq,
        ts: current_timestamp_ms(),
        paused: snap.paused,
        episode_id: snap.episode_id,
        seed: snap.seed,
        width: snap.width,
        board: snap.rows().map(<[u8]>::to_vec).collect(),
        score: snap.score,
        tick: snap.tick,
        cursor: snap.cursor,
        held: snap.held,
        swaps_committed: snap.swaps_committed,
        swaps_rejected: snap.swaps_rejected,
        last_event,
        state_hash: StateHash(snap.fingerprint()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_server_config_from_lookup() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("CRUSH_AI_HOST", "0.0.0.0"),
            ("CRUSH_AI_PORT", "9000"),
            ("CRUSH_AI_MAX_PENDING", "0"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_pending_commands, 1);
    }

    #[test]
    fn test_server_config_bad_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup(&[("CRUSH_AI_PORT", "http")]));
        assert_eq!(config, ServerConfig::default());
        assert!(config.socket_addr().is_ok());
    }

    #[test]
    fn test_same_major() {
        assert!(same_major("1.4.2", PROTOCOL_VERSION));
        assert!(!same_major("2.0.0", PROTOCOL_VERSION));
        assert!(!same_major("", PROTOCOL_VERSION));
    }

    #[test]
    fn test_map_command_requires_payload() {
        let cmd = CommandMessage {
            seq: 1,
            ts: 0,
            mode: CommandMode::Swap,
            swap: None,
            actions: None,
        };
        assert_eq!(map_command(&cmd).unwrap_err(), "missing swap");
    }

    #[test]
    fn test_build_observation_rows() {
        let snap = GameSnapshot {
            width: 3,
            cells: vec![1, 2, 3, 0, 5, 6, 1, 1, 1],
            score: 12,
            ..GameSnapshot::default()
        };
        let obs = build_observation(&snap, 7, None);
        assert_eq!(obs.board, vec![vec![1, 2, 3], vec![0, 5, 6], vec![1, 1, 1]]);
        assert_eq!(obs.score, 12);
        assert_eq!(obs.state_hash, StateHash(snap.fingerprint()));
    }

    #[test]
    fn test_observation_reports_pause_once() {
        let snap = GameSnapshot {
            width: 3,
            cells: vec![1; 9],
            paused: true,
            ..GameSnapshot::default()
        };
        let v = serde_json::to_value(build_observation(&snap, 1, None)).unwrap();
        assert_eq!(v["paused"], true);
        assert!(v.get("playable").is_none());
    }
}
