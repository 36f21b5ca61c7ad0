//! Communication channels for the selection service

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::ParleyError;
use crate::protocol::{SelectionEvent, SelectionOp};

/// Service-side half: ops in, events out
pub struct ChannelPair {
    /// Receiver for operations
    pub op_rx: mpsc::UnboundedReceiver<SelectionOp>,
    /// Sender for events
    pub event_tx: mpsc::UnboundedSender<SelectionEvent>,
}

/// Client-side channel for talking to the service
#[derive(Clone)]
pub struct SelectorChannel {
    op_tx: mpsc::UnboundedSender<SelectionOp>,
    event_rx: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<SelectionEvent>>>,
}

impl SelectorChannel {
    /// Create a connected pair
    ///
    /// Returns the client channel and the service channel pair
    pub fn new() -> (Self, ChannelPair) {
        let (op_tx, op_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let channel = Self {
            op_tx,
            event_rx: Arc::new(tokio::sync::Mutex::new(event_rx)),
        };

        (channel, ChannelPair { op_rx, event_tx })
    }

    /// Queue an operation for the service
    pub fn send(&self, op: SelectionOp) -> Result<(), ParleyError> {
        self.op_tx.send(op).map_err(|_| ParleyError::ChannelClosed)
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv(&self) -> Option<SelectionEvent> {
        self.event_rx.try_lock().ok()?.try_recv().ok()
    }

    /// Wait for the next event; `None` once the service is gone
    pub async fn recv(&self) -> Option<SelectionEvent> {
        self.event_rx.lock().await.recv().await
    }

    /// Check if the service stopped listening
    pub fn is_closed(&self) -> bool {
        self.op_tx.is_closed()
    }
}
