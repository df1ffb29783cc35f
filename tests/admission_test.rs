mod common;

use assert_matches::assert_matches;
use common::TestApp;
use eventops_api::errors::ServiceError;
use eventops_api::services::purchases::CreatePurchaseRequest;
use eventops_api::services::tickets::IssueTicketRequest;

fn purchase_request(company_id: i32, event_id: i32, ticket_category_id: i32) -> CreatePurchaseRequest {
    CreatePurchaseRequest {
        company_id,
        event_id,
        ticket_category_id,
        buyer: "María Quispe".to_string(),
    }
}

fn issue_request(purchase_id: i32, attendee_id: i32) -> IssueTicketRequest {
    IssueTicketRequest {
        purchase_id,
        attendee_id,
        ticket_confirmed: true,
        ticket_owner: false,
        ticket_send_by_email: false,
    }
}

#[tokio::test]
async fn capacity_bounds_surviving_tickets() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Feria Gastronómica").await;
    let category = app.seed_category(company.id, "General").await;
    app.seed_allotment(event.id, category.id, 3).await;
    let attendee = app.seed_attendee(company.id, "Ana Torres").await;

    let purchase = app
        .state
        .services
        .purchases
        .create_purchase(purchase_request(company.id, event.id, category.id))
        .await
        .expect("purchase should pass the admission pre-check");

    for _ in 0..3 {
        app.state
            .services
            .tickets
            .issue_ticket(issue_request(purchase.id, attendee.id))
            .await
            .expect("ticket within capacity");
    }

    let err = app
        .state
        .services
        .tickets
        .issue_ticket(issue_request(purchase.id, attendee.id))
        .await
        .expect_err("fourth ticket must be rejected");
    assert_matches!(err, ServiceError::CapacityExceeded(_));

    let allotment = app.allotment(event.id, category.id).await;
    assert_eq!(allotment.tickets_sold, 3);
    assert_eq!(allotment.tickets_available, 3);
}

#[tokio::test]
async fn purchase_rejected_once_category_exhausted() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Concierto").await;
    let category = app.seed_category(company.id, "VIP").await;
    app.seed_allotment(event.id, category.id, 1).await;
    let attendee = app.seed_attendee(company.id, "Ana Torres").await;

    let purchase = app
        .state
        .services
        .purchases
        .create_purchase(purchase_request(company.id, event.id, category.id))
        .await
        .expect("first purchase");
    app.state
        .services
        .tickets
        .issue_ticket(issue_request(purchase.id, attendee.id))
        .await
        .expect("only seat");

    let err = app
        .state
        .services
        .purchases
        .create_purchase(purchase_request(company.id, event.id, category.id))
        .await
        .expect_err("category is sold out");
    assert_matches!(err, ServiceError::CapacityExceeded(_));
}

#[tokio::test]
async fn purchase_rejected_for_unoffered_category() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Charla").await;
    let category = app.seed_category(company.id, "General").await;
    // no allotment row for (event, category)

    let err = app
        .state
        .services
        .purchases
        .create_purchase(purchase_request(company.id, event.id, category.id))
        .await
        .expect_err("category is not offered for the event");
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn allotment_cannot_shrink_below_sold() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Taller").await;
    let category = app.seed_category(company.id, "General").await;
    app.seed_allotment(event.id, category.id, 5).await;
    let attendee = app.seed_attendee(company.id, "Ana Torres").await;

    let purchase = app
        .state
        .services
        .purchases
        .create_purchase(purchase_request(company.id, event.id, category.id))
        .await
        .expect("purchase");
    for _ in 0..2 {
        app.state
            .services
            .tickets
            .issue_ticket(issue_request(purchase.id, attendee.id))
            .await
            .expect("ticket");
    }

    let err = app
        .state
        .services
        .events
        .set_allotment(
            event.id,
            eventops_api::services::events::SetAllotmentRequest {
                ticket_category_id: category.id,
                tickets_available: 1,
            },
        )
        .await
        .expect_err("cannot shrink below two sold tickets");
    assert_matches!(err, ServiceError::ValidationError(_));
}
