//! Glue between a running game and the control adapter.
//!
//! Everything here is synchronous and owns no sockets, so the game loop and
//! the tests drive it the same way: feed it inbound messages, send whatever
//! it returns.

use crate::adapter::{
    build_observation, create_ack, ClientCommand, InboundCommand, InboundPayload, LastEvent,
    ObservationMessage, OutboundMessage, ServerMessage,
};
use crate::core::{GameSnapshot, GameState, SwapOutcome, SwapRejection};

/// Combined outcome of the swaps a command caused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub committed: bool,
    pub score_delta: u32,
    /// Reason for the most recent rejected swap, if any.
    pub rejection: Option<SwapRejection>,
}

impl CommandResult {
    fn record(&mut self, outcome: &SwapOutcome) {
        self.committed |= outcome.is_committed();
        self.score_delta = self.score_delta.saturating_add(outcome.score_delta());
        if let Some(reason) = outcome.rejection() {
            self.rejection = Some(reason);
        }
    }
}

/// Apply one adapter command to the game.
pub fn apply_command(game: &mut GameState, command: &ClientCommand) -> CommandResult {
    let mut result = CommandResult::default();
    match command {
        ClientCommand::Swap { from, to } => result.record(&game.attempt_swap(*from, *to)),
        ClientCommand::Actions(actions) => {
            for &action in actions {
                if let Some(outcome) = game.apply_action(action) {
                    result.record(&outcome);
                }
            }
        }
    }
    result
}

/// Turns game state into acks and observations.
#[derive(Debug, Default)]
pub struct ObservationPump {
    seq: u64,
    last_fingerprint: Option<u64>,
    snap: GameSnapshot,
}

impl ObservationPump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to one inbound message from the adapter.
    pub fn handle(&mut self, game: &mut GameState, inbound: InboundCommand) -> OutboundMessage {
        let msg = match inbound.payload {
            InboundPayload::SnapshotRequest => ServerMessage::Observation(self.observe(game, None)),
            InboundPayload::Command(command) => {
                let result = apply_command(game, &command);
                ServerMessage::Ack(create_ack(
                    inbound.seq,
                    result.committed,
                    result.score_delta,
                    result.rejection.map(|r| r.as_str()),
                ))
            }
        };
        OutboundMessage::ToClient {
            client_id: inbound.client_id,
            msg,
        }
    }

    /// Broadcast an observation if the visible state changed since the last
    /// one, or if the game recorded a clear or swap event.
    pub fn poll(&mut self, game: &mut GameState) -> Option<OutboundMessage> {
        game.snapshot_into(&mut self.snap);
        let fingerprint = self.snap.fingerprint();
        let last_event = game.take_last_event().map(LastEvent::from);
        if self.last_fingerprint == Some(fingerprint) && last_event.is_none() {
            return None;
        }
        self.last_fingerprint = Some(fingerprint);
        Some(OutboundMessage::Broadcast {
            msg: ServerMessage::Observation(self.observe(game, last_event)),
        })
    }

    fn observe(&mut self, game: &GameState, last_event: Option<LastEvent>) -> ObservationMessage {
        self.seq += 1;
        game.snapshot_into(&mut self.snap);
        build_observation(&self.snap, self.seq, last_event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::EventKindLower;
    use crate::core::{Board, Palette};
    use crate::types::GameAction;
    use arrayvec::ArrayVec;

    fn game() -> GameState {
        GameState::from_board(
            Board::from_rows(&["RGR", "GRY", "BYG"]).unwrap(),
            Palette::classic(),
            1,
        )
    }

    #[test]
    fn swap_command_reports_commit_and_score() {
        let mut g = game();
        let result = apply_command(&mut g, &ClientCommand::Swap { from: 1, to: 4 });
        assert!(result.committed);
        assert_eq!(result.score_delta, 3);
        assert_eq!(result.rejection, None);
    }

    #[test]
    fn action_command_drives_the_cursor() {
        let mut g = game();
        let mut actions = ArrayVec::new();
        actions.extend([
            GameAction::CursorRight,
            GameAction::Select,
            GameAction::CursorDown,
            GameAction::Select,
        ]);
        let result = apply_command(&mut g, &ClientCommand::Actions(actions));
        assert!(result.committed);
        assert_eq!(g.score(), 3);
    }

    #[test]
    fn rejected_swap_carries_reason() {
        let mut g = game();
        let result = apply_command(&mut g, &ClientCommand::Swap { from: 0, to: 8 });
        assert!(!result.committed);
        assert_eq!(result.rejection, Some(SwapRejection::NotAdjacent));
    }

    #[test]
    fn poll_broadcasts_only_on_change() {
        let mut g = game();
        let mut pump = ObservationPump::new();
        assert!(pump.poll(&mut g).is_some());
        assert!(pump.poll(&mut g).is_none());
        g.attempt_swap(1, 4);
        match pump.poll(&mut g) {
            Some(OutboundMessage::Broadcast {
                msg: ServerMessage::Observation(obs),
            }) => {
                assert_eq!(obs.seq, 2);
                assert_eq!(obs.score, 3);
                assert!(obs.last_event.is_some());
            }
            other => panic!("expected broadcast, got {other:?}"),
        }
    }

    #[test]
    fn rejected_swap_is_broadcast_with_its_own_event() {
        let mut g = game();
        let mut pump = ObservationPump::new();
        pump.poll(&mut g);

        assert!(!g.attempt_swap(0, 1).is_committed());
        match pump.poll(&mut g) {
            Some(OutboundMessage::Broadcast {
                msg: ServerMessage::Observation(obs),
            }) => {
                assert_eq!(obs.swaps_rejected, 1);
                assert_eq!(obs.last_event.map(|e| e.kind), Some(EventKindLower::SwapRejected));
            }
            other => panic!("expected broadcast, got {other:?}"),
        }

        // A later cursor move is reported without the old rejection.
        g.apply_action(GameAction::CursorRight);
        match pump.poll(&mut g) {
            Some(OutboundMessage::Broadcast {
                msg: ServerMessage::Observation(obs),
            }) => assert!(obs.last_event.is_none()),
            other => panic!("expected broadcast, got {other:?}"),
        }
    }
}
