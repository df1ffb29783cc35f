mod common;

use common::TestApp;
use eventops_api::errors::ServiceError;
use eventops_api::services::purchases::CreatePurchaseRequest;
use eventops_api::services::tickets::IssueTicketRequest;

/// Five concurrent purchase-plus-ticket attempts against a category with
/// two seats must end with exactly two tickets issued and three capacity
/// rejections, whatever the interleaving.
#[tokio::test]
async fn concurrent_sales_never_oversubscribe() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Lanzamiento").await;
    let category = app.seed_category(company.id, "General").await;
    app.seed_allotment(event.id, category.id, 2).await;
    let attendee = app.seed_attendee(company.id, "Ana Torres").await;

    let mut tasks = Vec::new();
    for i in 0..5 {
        let purchases = app.state.services.purchases.clone();
        let tickets = app.state.services.tickets.clone();
        let company_id = company.id;
        let event_id = event.id;
        let category_id = category.id;
        let attendee_id = attendee.id;

        tasks.push(tokio::spawn(async move {
            let purchase = purchases
                .create_purchase(CreatePurchaseRequest {
                    company_id,
                    event_id,
                    ticket_category_id: category_id,
                    buyer: format!("Comprador {i}"),
                })
                .await?;

            tickets
                .issue_ticket(IssueTicketRequest {
                    purchase_id: purchase.id,
                    attendee_id,
                    ticket_confirmed: false,
                    ticket_owner: false,
                    ticket_send_by_email: false,
                })
                .await
        }));
    }

    let mut successes = 0;
    let mut capacity_failures = 0;
    for task in tasks {
        match task.await.expect("task must not panic") {
            Ok(_) => successes += 1,
            Err(ServiceError::CapacityExceeded(_)) => capacity_failures += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 2, "exactly two sales may go through");
    assert_eq!(capacity_failures, 3, "the rest must be capacity rejections");

    let allotment = app.allotment(event.id, category.id).await;
    assert_eq!(allotment.tickets_sold, 2);
    assert_eq!(allotment.tickets_available, 2);
}
