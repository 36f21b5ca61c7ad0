//! Selection service - serializes solves through a single queue

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::channel::{ChannelPair, SelectorChannel};
use crate::config::EquilibriumConfig;
use crate::error::ParleyError;
use crate::protocol::{RequestId, SelectionEvent, SelectionOp};
use crate::selector::{EquilibriumSelector, SelectorHandle};

/// Owns a selector and answers ops one at a time.
///
/// Because the queue has a single consumer, the selector's last-run
/// snapshot always belongs to the most recently answered op.
pub struct SelectionService {
    selector: SelectorHandle,
    op_rx: mpsc::UnboundedReceiver<SelectionOp>,
    event_tx: mpsc::UnboundedSender<SelectionEvent>,
}

impl SelectionService {
    /// Create a service bound to the given channel pair
    pub fn new(selector: EquilibriumSelector, channels: ChannelPair) -> Self {
        Self {
            selector: SelectorHandle::new(selector),
            op_rx: channels.op_rx,
            event_tx: channels.event_tx,
        }
    }

    /// Create a service and return the client side of its channel
    pub fn with_channel(selector: EquilibriumSelector) -> (Self, SelectorChannel) {
        let (channel, pair) = SelectorChannel::new();
        (Self::new(selector, pair), channel)
    }

    /// Shared handle for introspecting the selector
    pub fn selector(&self) -> SelectorHandle {
        self.selector.clone()
    }

    /// Run until every op sender is dropped
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Result<(), ParleyError> {
        info!("Starting selection service");

        while let Some(op) = self.op_rx.recv().await {
            let request_id = op.request_id();
            if let Err(e) = self.handle_op(op) {
                error!(request_id = %request_id, error = %e, "Error handling operation");
                self.emit(SelectionEvent::Error {
                    request_id,
                    message: e.to_string(),
                })?;
            }
        }

        info!("Selection service stopped");
        Ok(())
    }

    fn handle_op(&self, op: SelectionOp) -> Result<(), ParleyError> {
        match op {
            SelectionOp::FindEquilibrium {
                request_id,
                task,
                agents,
            } => {
                let equilibrium = self.selector.solve(&task, &agents);
                self.emit(SelectionEvent::EquilibriumFound {
                    request_id,
                    task_id: task.id,
                    status: equilibrium.status,
                    iterations: equilibrium.iterations,
                    participations: equilibrium.ranked(),
                })
            }
            SelectionOp::SelectTop {
                request_id,
                task,
                agents,
                n,
            } => {
                let selected = self.selector.select_top_agents(&task, &agents, n);
                self.emit(SelectionEvent::AgentsSelected {
                    request_id,
                    task_id: task.id,
                    agents: selected,
                })
            }
            SelectionOp::Configure { request_id, config } => {
                self.configure(request_id, config)
            }
        }
    }

    fn configure(
        &self,
        request_id: RequestId,
        config: EquilibriumConfig,
    ) -> Result<(), ParleyError> {
        self.selector.set_config(config.clone())?;
        debug!(request_id = %request_id, "Configuration applied");
        self.emit(SelectionEvent::Configured { request_id, config })
    }

    fn emit(&self, event: SelectionEvent) -> Result<(), ParleyError> {
        self.event_tx
            .send(event)
            .map_err(|_| ParleyError::ChannelClosed)
    }
}
