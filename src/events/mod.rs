use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Domain events emitted by the service layer after a unit of work commits.
/// Consumed by a background task; the sink only logs today, but the channel
/// is the integration point for notifications or audit feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Tenant events
    CompanyCreated(i32),
    CompanyDeleted(i32),

    // Catalog events
    EventCreated(i32),
    EventUpdated(i32),
    EventDeleted(i32),
    AllotmentSet {
        event_id: i32,
        ticket_category_id: i32,
        tickets_available: i32,
    },

    // Sales events
    PurchaseCreated {
        purchase_id: i32,
        event_id: i32,
        ticket_category_id: i32,
    },
    PurchaseDeleted {
        purchase_id: i32,
    },
    TicketIssued {
        ticket_id: i32,
        purchase_id: i32,
        attendee_id: i32,
    },
    TicketRevoked {
        ticket_id: i32,
        purchase_id: i32,
    },
    SoldCountRecomputed {
        event_id: i32,
        ticket_category_id: i32,
        tickets_sold: i32,
    },

    // Inventory events
    StockDeltaApplied {
        item_id: i32,
        delta: i32,
        quantity_available: i32,
    },
    StockConsumed {
        item_id: i32,
        quantity: i32,
        quantity_available: i32,
    },
    StockReturned {
        item_id: i32,
        quantity: i32,
        quantity_available: i32,
    },
    EventInventoryReclaimed {
        event_id: i32,
        items_reclaimed: u64,
    },

    // Expense events
    ExpenseCreated {
        expense_id: i32,
        event_id: i32,
    },
    ExpenseItemApplied {
        expense_id: i32,
        inventory_item_id: i32,
        old_quantity: i32,
        new_quantity: i32,
    },
    ExpenseDeleted {
        expense_id: i32,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Background consumer draining the event channel. Runs until every sender
/// is dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("Event processor started");
    while let Some(event) = receiver.recv().await {
        debug!(?event, "Processing domain event");
    }
    info!("Event processor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sender_delivers_to_processor() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender
            .send(Event::SoldCountRecomputed {
                event_id: 1,
                ticket_category_id: 2,
                tickets_sold: 3,
            })
            .await
            .expect("send should succeed");

        match rx.recv().await {
            Some(Event::SoldCountRecomputed { tickets_sold, .. }) => {
                assert_eq!(tickets_sold, 3)
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_fails_after_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        assert!(sender.send(Event::CompanyCreated(1)).await.is_err());
    }
}
