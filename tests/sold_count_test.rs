mod common;

use common::TestApp;
use eventops_api::services::purchases::CreatePurchaseRequest;
use eventops_api::services::tickets::IssueTicketRequest;

#[tokio::test]
async fn sold_count_tracks_live_ticket_rows() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Festival").await;
    let category = app.seed_category(company.id, "General").await;
    app.seed_allotment(event.id, category.id, 100).await;
    let attendee = app.seed_attendee(company.id, "Ana Torres").await;

    let purchase = app
        .state
        .services
        .purchases
        .create_purchase(CreatePurchaseRequest {
            company_id: company.id,
            event_id: event.id,
            ticket_category_id: category.id,
            buyer: "María Quispe".to_string(),
        })
        .await
        .expect("purchase");

    let mut ticket_ids = Vec::new();
    for _ in 0..50 {
        let ticket = app
            .state
            .services
            .tickets
            .issue_ticket(IssueTicketRequest {
                purchase_id: purchase.id,
                attendee_id: attendee.id,
                ticket_confirmed: false,
                ticket_owner: false,
                ticket_send_by_email: false,
            })
            .await
            .expect("ticket within capacity");
        ticket_ids.push(ticket.id);
    }

    assert_eq!(app.allotment(event.id, category.id).await.tickets_sold, 50);

    for ticket_id in ticket_ids.iter().take(10) {
        app.state
            .services
            .tickets
            .revoke_ticket(*ticket_id)
            .await
            .expect("revoke");
    }

    let allotment = app.allotment(event.id, category.id).await;
    assert_eq!(allotment.tickets_sold, 40);

    let remaining = app
        .state
        .services
        .tickets
        .list_tickets_for_purchase(purchase.id)
        .await
        .expect("list");
    assert_eq!(remaining.len(), 40);
}

#[tokio::test]
async fn deleting_purchase_recomputes_sold_count() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Festival").await;
    let category = app.seed_category(company.id, "General").await;
    app.seed_allotment(event.id, category.id, 10).await;
    let attendee = app.seed_attendee(company.id, "Ana Torres").await;

    let keep = app
        .state
        .services
        .purchases
        .create_purchase(CreatePurchaseRequest {
            company_id: company.id,
            event_id: event.id,
            ticket_category_id: category.id,
            buyer: "Compradora Uno".to_string(),
        })
        .await
        .expect("purchase kept");
    let drop = app
        .state
        .services
        .purchases
        .create_purchase(CreatePurchaseRequest {
            company_id: company.id,
            event_id: event.id,
            ticket_category_id: category.id,
            buyer: "Comprador Dos".to_string(),
        })
        .await
        .expect("purchase dropped");

    for purchase_id in [keep.id, drop.id] {
        for _ in 0..3 {
            app.state
                .services
                .tickets
                .issue_ticket(IssueTicketRequest {
                    purchase_id,
                    attendee_id: attendee.id,
                    ticket_confirmed: false,
                    ticket_owner: false,
                    ticket_send_by_email: false,
                })
                .await
                .expect("ticket");
        }
    }
    assert_eq!(app.allotment(event.id, category.id).await.tickets_sold, 6);

    // The cascade takes the tickets; the recount runs in the same
    // transaction as the delete.
    app.state
        .services
        .purchases
        .delete_purchase(drop.id)
        .await
        .expect("delete purchase");

    assert_eq!(app.allotment(event.id, category.id).await.tickets_sold, 3);
}
