mod common;

use chrono::NaiveDate;
use common::TestApp;
use eventops_api::services::expenses::{CreateExpenseRequest, ExpenseItemInput};

#[tokio::test]
async fn reclaim_restores_consumed_stock_for_every_item() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let operator = app.seed_user(company.id, "operador").await;
    let event = app.seed_event(company.id, "Feria").await;
    let beer = app.seed_item(event.id, "Cerveza", 30, true).await;
    let snacks = app.seed_item(event.id, "Piqueos", 40, true).await;

    app.state
        .services
        .expenses
        .create_expense(
            CreateExpenseRequest {
                company_id: company.id,
                event_id: event.id,
                customer_id: operator.id,
                description: None,
                date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                items: vec![
                    ExpenseItemInput {
                        inventory_item_id: beer.id,
                        quantity: 12,
                    },
                    ExpenseItemInput {
                        inventory_item_id: snacks.id,
                        quantity: 5,
                    },
                ],
            },
            Some(operator.id),
        )
        .await
        .expect("expense");

    let reclaimed = app
        .state
        .services
        .inventory
        .reclaim_event_inventory(event.id)
        .await
        .expect("reclaim");
    assert_eq!(reclaimed, 2);

    let beer_after = app.state.services.inventory.get_item(beer.id).await.unwrap();
    assert_eq!(beer_after.quantity_available, 30);
    assert_eq!(beer_after.quantity_sold, 0);

    let snacks_after = app.state.services.inventory.get_item(snacks.id).await.unwrap();
    assert_eq!(snacks_after.quantity_available, 40);
    assert_eq!(snacks_after.quantity_sold, 0);

    // Reclaiming again is harmless: nothing is recorded as sold anymore.
    app.state
        .services
        .inventory
        .reclaim_event_inventory(event.id)
        .await
        .expect("reclaim again");
    let beer_final = app.state.services.inventory.get_item(beer.id).await.unwrap();
    assert_eq!(beer_final.quantity_available, 30);
}

#[tokio::test]
async fn deleting_event_removes_its_subtree() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let operator = app.seed_user(company.id, "operador").await;
    let event = app.seed_event(company.id, "Feria").await;
    let category = app.seed_category(company.id, "General").await;
    app.seed_allotment(event.id, category.id, 10).await;
    let item = app.seed_item(event.id, "Cerveza", 30, true).await;

    app.state
        .services
        .expenses
        .create_expense(
            CreateExpenseRequest {
                company_id: company.id,
                event_id: event.id,
                customer_id: operator.id,
                description: None,
                date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                items: vec![ExpenseItemInput {
                    inventory_item_id: item.id,
                    quantity: 8,
                }],
            },
            Some(operator.id),
        )
        .await
        .expect("expense");

    app.state
        .services
        .events
        .delete_event(event.id)
        .await
        .expect("delete event");

    assert!(app.state.services.events.get_event(event.id).await.is_err());

    // No orphaned inventory survives the event.
    let leftovers = app
        .state
        .services
        .inventory
        .list_items(event.id)
        .await
        .expect("list");
    assert!(leftovers.is_empty());

    // The ticket category itself is company-scoped and survives.
    app.state
        .services
        .ticket_categories
        .get_category(category.id)
        .await
        .expect("category survives event deletion");
}
