pub mod attachments;
pub mod attendees;
pub mod companies;
pub mod events;
pub mod expenses;
pub mod inventory;
pub mod purchases;
pub mod ticket_categories;
pub mod tickets;
pub mod users;

use crate::db::DbPool;
use crate::events::EventSender;
use axum::http::HeaderMap;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Header naming the operator performing a mutation. The acting user is
/// threaded explicitly into every stock and admission operation instead of
/// living in ambient request state.
pub const ACTING_USER_HEADER: &str = "x-acting-user";

pub(crate) fn acting_user(headers: &HeaderMap) -> Option<i32> {
    headers
        .get(ACTING_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub companies: Arc<crate::services::companies::CompanyService>,
    pub users: Arc<crate::services::users::UserService>,
    pub ticket_categories: Arc<crate::services::ticket_categories::TicketCategoryService>,
    pub events: Arc<crate::services::events::EventService>,
    pub attendees: Arc<crate::services::attendees::AttendeeService>,
    pub purchases: Arc<crate::services::purchases::PurchaseService>,
    pub tickets: Arc<crate::services::tickets::TicketService>,
    pub inventory: Arc<crate::services::inventory::InventoryService>,
    pub expenses: Arc<crate::services::expenses::ExpenseService>,
}

impl AppServices {
    /// Build the services container over one pool and one event channel.
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            companies: Arc::new(crate::services::companies::CompanyService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            users: Arc::new(crate::services::users::UserService::new(db_pool.clone())),
            ticket_categories: Arc::new(
                crate::services::ticket_categories::TicketCategoryService::new(db_pool.clone()),
            ),
            events: Arc::new(crate::services::events::EventService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            attendees: Arc::new(crate::services::attendees::AttendeeService::new(
                db_pool.clone(),
            )),
            purchases: Arc::new(crate::services::purchases::PurchaseService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            tickets: Arc::new(crate::services::tickets::TicketService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            inventory: Arc::new(crate::services::inventory::InventoryService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            expenses: Arc::new(crate::services::expenses::ExpenseService::new(
                db_pool, event_sender,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn acting_user_parses_header() {
        let mut headers = HeaderMap::new();
        headers.insert(ACTING_USER_HEADER, HeaderValue::from_static("42"));
        assert_eq!(acting_user(&headers), Some(42));
    }

    #[test]
    fn acting_user_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(ACTING_USER_HEADER, HeaderValue::from_static("not-a-number"));
        assert_eq!(acting_user(&headers), None);

        let empty = HeaderMap::new();
        assert_eq!(acting_user(&empty), None);
    }
}
