use utoipa::OpenApi;

/// Aggregated OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EventOps API",
        description = "Multi-tenant event management back office: ticket sales with admission control, per-event inventory, and expense tracking"
    ),
    paths(
        crate::handlers::companies::create_company,
        crate::handlers::companies::list_companies,
        crate::handlers::companies::get_company,
        crate::handlers::companies::update_company,
        crate::handlers::companies::delete_company,
        crate::handlers::users::create_user,
        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::delete_user,
        crate::handlers::ticket_categories::create_category,
        crate::handlers::ticket_categories::list_categories,
        crate::handlers::ticket_categories::get_category,
        crate::handlers::ticket_categories::update_category,
        crate::handlers::ticket_categories::delete_category,
        crate::handlers::events::create_event,
        crate::handlers::events::list_events,
        crate::handlers::events::get_event,
        crate::handlers::events::update_event,
        crate::handlers::events::delete_event,
        crate::handlers::events::set_allotment,
        crate::handlers::events::list_allotments,
        crate::handlers::events::reclaim_inventory,
        crate::handlers::attendees::create_attendee,
        crate::handlers::attendees::list_attendees,
        crate::handlers::attendees::get_attendee,
        crate::handlers::attendees::update_attendee,
        crate::handlers::attendees::delete_attendee,
        crate::handlers::attachments::create_attachment,
        crate::handlers::attachments::list_attachments,
        crate::handlers::attachments::get_attachment,
        crate::handlers::attachments::delete_attachment,
        crate::handlers::purchases::create_purchase,
        crate::handlers::purchases::list_purchases,
        crate::handlers::purchases::get_purchase,
        crate::handlers::purchases::delete_purchase,
        crate::handlers::tickets::issue_ticket,
        crate::handlers::tickets::list_tickets,
        crate::handlers::tickets::get_ticket,
        crate::handlers::tickets::revoke_ticket,
        crate::handlers::inventory::create_item,
        crate::handlers::inventory::list_items,
        crate::handlers::inventory::get_item,
        crate::handlers::inventory::update_item,
        crate::handlers::inventory::delete_item,
        crate::handlers::inventory::apply_stock_delta,
        crate::handlers::inventory::use_stock,
        crate::handlers::inventory::return_stock,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::list_expenses,
        crate::handlers::expenses::get_expense,
        crate::handlers::expenses::delete_expense,
        crate::handlers::expenses::apply_expense_item,
        crate::handlers::expenses::remove_expense_item,
    ),
    components(schemas(crate::errors::ErrorResponse)),
    tags(
        (name = "companies", description = "Tenant roots"),
        (name = "users", description = "Operator accounts"),
        (name = "ticket-categories", description = "Price tiers"),
        (name = "events", description = "Events and capacity allotments"),
        (name = "attendees", description = "Attendee records"),
        (name = "attachments", description = "Proof-of-payment metadata"),
        (name = "purchases", description = "Admission-controlled sales"),
        (name = "tickets", description = "Ticket issuance and revocation"),
        (name = "inventory", description = "Per-event stock"),
        (name = "expenses", description = "Sales against inventory"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_includes_core_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;
        assert!(paths.contains_key("/api/v1/purchases"));
        assert!(paths.contains_key("/api/v1/tickets"));
        assert!(paths.contains_key("/api/v1/inventory/{id}/apply-delta"));
        assert!(paths.contains_key("/api/v1/expenses/{id}/items/{inventory_item_id}"));
    }
}
