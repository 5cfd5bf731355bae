//! Point-to-point byte channel between the orchestrator and one worker.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::error::{Error, TransportError};
use crate::scheduling::{exchange, Schedule};

/// One end of a bidirectional, ordered message channel.
///
/// Each message is a complete byte buffer, so a message is either delivered
/// whole or not at all. Dropping an endpoint closes the channel; the peer's
/// next [`recv`](Endpoint::recv) then fails with
/// [`TransportError::Disconnected`] once buffered messages are drained.
#[derive(Debug)]
pub struct Endpoint {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

/// Creates a connected pair of endpoints.
pub fn duplex() -> (Endpoint, Endpoint) {
    let (a_tx, b_rx) = channel();
    let (b_tx, a_rx) = channel();
    (
        Endpoint { tx: a_tx, rx: a_rx },
        Endpoint { tx: b_tx, rx: b_rx },
    )
}

impl Endpoint {
    /// Sends one message to the peer.
    pub fn send(&self, bytes: Vec<u8>) -> Result<(), TransportError> {
        self.tx.send(bytes).map_err(|_| TransportError::SendFailed)
    }

    /// Blocks until the peer's next message arrives.
    pub fn recv(&self) -> Result<Vec<u8>, TransportError> {
        self.rx.recv().map_err(|_| TransportError::Disconnected)
    }

    /// Encodes and sends a schedule.
    pub fn send_schedule(&self, schedule: &Schedule) -> Result<(), Error> {
        self.send(exchange::to_bytes(schedule)?)?;
        Ok(())
    }

    /// Receives and decodes a schedule.
    pub fn recv_schedule(&self) -> Result<Schedule, Error> {
        let bytes = self.recv()?;
        Ok(exchange::from_bytes(&bytes)?)
    }
}
