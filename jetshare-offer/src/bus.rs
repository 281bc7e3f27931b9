use jetshare_shared::models::events::JetSelectedEvent;
use tokio::sync::broadcast;

/// Jet-selection notifications for the components of one offer form.
///
/// Each form session owns its own bus, so selections never leak between
/// concurrently edited offers.
#[derive(Debug, Clone)]
pub struct JetSelectionBus {
    tx: broadcast::Sender<JetSelectedEvent>,
}

impl JetSelectionBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JetSelectedEvent> {
        self.tx.subscribe()
    }

    /// Publish a selection; returns how many subscribers will see it
    pub fn publish(&self, event: JetSelectedEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::debug!("No subscribers for jet selection {}", event.jet_id);
                0
            }
        }
    }
}

impl Default for JetSelectionBus {
    fn default() -> Self {
        Self::new(16)
    }
}
