//! Boundary to the turn relay
//!
//! The board pushes each locally committed turn out through `send_turn` and
//! pulls opponent turns in with `poll_turn`. Delivery is in order and exactly
//! once; pairing is the relay's business.

use crate::turn::Turn;
use std::sync::mpsc::{self, Receiver, Sender};

/// Outbound/inbound turn transport
pub trait TurnRelay {
    /// Fire-and-forget send to the paired peer
    fn send_turn(&mut self, turn: &Turn);

    /// Next turn received from the peer, if any
    fn poll_turn(&mut self) -> Option<Turn>;
}

/// Hot-seat play: nothing goes out, nothing comes in
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRelay;

impl TurnRelay for NullRelay {
    fn send_turn(&mut self, _turn: &Turn) {}

    fn poll_turn(&mut self) -> Option<Turn> {
        None
    }
}

/// One end of an in-process two-peer link
#[derive(Debug)]
pub struct ChannelRelay {
    outbound: Sender<Turn>,
    inbound: Receiver<Turn>,
}

impl ChannelRelay {
    /// Two relays wired to each other
    pub fn pair() -> (ChannelRelay, ChannelRelay) {
        let (to_second, from_first) = mpsc::channel();
        let (to_first, from_second) = mpsc::channel();
        (
            ChannelRelay { outbound: to_second, inbound: from_second },
            ChannelRelay { outbound: to_first, inbound: from_first },
        )
    }
}

impl TurnRelay for ChannelRelay {
    fn send_turn(&mut self, turn: &Turn) {
        if self.outbound.send(*turn).is_err() {
            tracing::warn!("peer hung up, dropping {:?}", turn);
        }
    }

    fn poll_turn(&mut self) -> Option<Turn> {
        self.inbound.try_recv().ok()
    }
}
