//! Adapter module - external control via TCP socket with a JSON protocol
//!
//! Lets an external agent (a bot, a test harness, a replay tool) drive swaps
//! and receive board observations while the terminal game runs.
//!
//! # Protocol Overview
//!
//! Line-delimited JSON over TCP (default `127.0.0.1:7878`):
//!
//! 1. **Handshake**: client sends `hello`, server answers `welcome`
//! 2. **Controller**: the first client to hello becomes the controller; later
//!    clients are observers until the controller disconnects
//! 3. **Commands**: the controller sends `command` in `swap` or `action` mode
//! 4. **Observations**: streaming clients get an `observation` after every
//!    change to the board
//!
//! Every message carries `seq`; a client's seq must strictly increase.
//! Commands are queued for the game loop in a bounded channel and a full
//! queue is answered with a `backpressure` error.
//!
//! # Example Protocol Flow
//!
//! ```text
//! C: {"type":"hello","seq":1,"ts":0,"client":{"name":"bot","version":"0.1"},"protocol_version":"1.0.0"}
//! S: {"type":"welcome","seq":1,"ts":...,"protocol_version":"1.0.0","client_id":1,"role":"controller",...}
//! S: {"type":"observation","seq":1,"ts":...,"width":8,"board":[[1,3,...],...],"score":0,...}
//! C: {"type":"command","seq":2,"ts":0,"mode":"swap","swap":{"from":2,"to":10}}
//! S: {"type":"ack","seq":2,"ts":...,"status":"ok","committed":true,"score_delta":3}
//! ```
//!
//! # Environment Variables
//!
//! - `CRUSH_AI_HOST`: bind address (default `127.0.0.1`)
//! - `CRUSH_AI_PORT`: port (default 7878)
//! - `CRUSH_AI_MAX_PENDING`: inbound queue bound (default 10)
//! - `CRUSH_AI_DISABLED`: `1` or `true` disables the adapter

pub mod protocol;
pub mod runtime;
pub mod server;

pub use tui_crush_core as core;
pub use tui_crush_types as types;

pub use protocol::*;
pub use runtime::{Adapter, ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
pub use server::{build_observation, run_server, ServerConfig};
