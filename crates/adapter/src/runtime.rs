//! Adapter runtime integration.
//!
//! Bridges the synchronous game loop with the async TCP server: the server
//! runs on a private tokio runtime, commands arrive over a bounded channel and
//! replies leave over an unbounded one.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use arrayvec::ArrayVec;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::protocol::{ServerMessage, MAX_ACTIONS};
use crate::server::{run_server, ServerConfig};
use crate::types::GameAction;

/// Message delivered to the game loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone)]
pub enum InboundPayload {
    /// A client finished its handshake and wants an observation now.
    SnapshotRequest,
    Command(ClientCommand),
}

/// Command payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Swap { from: usize, to: usize },
    Actions(ArrayVec<GameAction, MAX_ACTIONS>),
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClient { client_id: usize, msg: ServerMessage },
    /// Sent to every client that asked for observation streaming.
    Broadcast { msg: ServerMessage },
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    local_addr: SocketAddr,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns `Ok(None)` if `CRUSH_AI_DISABLED` is set.
    pub fn start_from_env() -> anyhow::Result<Option<Self>> {
        if ServerConfig::is_disabled() {
            return Ok(None);
        }
        Self::start(ServerConfig::from_env()).map(Some)
    }

    /// Start the server and wait until it is listening.
    pub fn start(config: ServerConfig) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(config.max_pending_commands.max(1));
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let (ready_tx, ready_rx) = oneshot::channel();

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        rt.spawn(async move {
            if let Err(e) = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await {
                warn!(error = %e, "adapter server stopped");
            }
        });

        let local_addr = rt
            .block_on(async { tokio::time::timeout(Duration::from_secs(2), ready_rx).await })
            .context("adapter did not start in time")?
            .map_err(|_| anyhow!("adapter failed to start (see log)"))?;

        Ok(Self {
            _rt: rt,
            local_addr,
            cmd_rx,
            out_tx,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }
}
