mod common;

use assert_matches::assert_matches;
use common::TestApp;
use eventops_api::errors::ServiceError;
use eventops_api::services::inventory::UpdateInventoryItemRequest;

#[tokio::test]
async fn stock_delta_applies_exactly_once() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Feria").await;
    let item = app.seed_item(event.id, "Sillas", 10, false).await;

    let after_delta = app
        .state
        .services
        .inventory
        .apply_stock_delta(item.id, 5, Some(1))
        .await
        .expect("delta applies");
    assert_eq!(after_delta.quantity_available, 15);

    // A later save with no delta must leave the stock untouched.
    let renamed = app
        .state
        .services
        .inventory
        .update_item(
            item.id,
            UpdateInventoryItemRequest {
                name: Some("Sillas plegables".to_string()),
                ..Default::default()
            },
            Some(1),
        )
        .await
        .expect("detail update");
    assert_eq!(renamed.quantity_available, 15);
    assert_eq!(renamed.name, "Sillas plegables");

    let fetched = app
        .state
        .services
        .inventory
        .get_item(item.id)
        .await
        .expect("fetch");
    assert_eq!(fetched.quantity_available, 15);
}

#[tokio::test]
async fn negative_delta_cannot_overdraw_stock() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Feria").await;
    let item = app.seed_item(event.id, "Mesas", 4, false).await;

    let err = app
        .state
        .services
        .inventory
        .apply_stock_delta(item.id, -5, None)
        .await
        .expect_err("delta larger than availability");
    assert_matches!(err, ServiceError::InsufficientStock(_));

    // Nothing was written
    let unchanged = app
        .state
        .services
        .inventory
        .get_item(item.id)
        .await
        .expect("fetch");
    assert_eq!(unchanged.quantity_available, 4);

    let reduced = app
        .state
        .services
        .inventory
        .apply_stock_delta(item.id, -3, None)
        .await
        .expect("delta within availability");
    assert_eq!(reduced.quantity_available, 1);
}

#[tokio::test]
async fn use_stock_moves_units_to_sold() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Feria").await;
    let item = app.seed_item(event.id, "Vasos", 10, true).await;

    let used = app
        .state
        .services
        .inventory
        .use_stock(item.id, 4, Some(1))
        .await
        .expect("consumption within stock");
    assert_eq!(used.quantity_available, 6);
    assert_eq!(used.quantity_sold, 4);

    let err = app
        .state
        .services
        .inventory
        .use_stock(item.id, 7, Some(1))
        .await
        .expect_err("consumption beyond stock");
    assert_matches!(err, ServiceError::InsufficientStock(_));

    let returned = app
        .state
        .services
        .inventory
        .return_stock(item.id, 4, Some(1))
        .await
        .expect("return");
    assert_eq!(returned.quantity_available, 10);
    assert_eq!(returned.quantity_sold, 0);
}

#[tokio::test]
async fn use_stock_rejects_nonpositive_quantity() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Feria").await;
    let item = app.seed_item(event.id, "Platos", 10, true).await;

    let err = app
        .state
        .services
        .inventory
        .use_stock(item.id, 0, None)
        .await
        .expect_err("zero quantity");
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = app
        .state
        .services
        .inventory
        .use_stock(item.id, -2, None)
        .await
        .expect_err("negative quantity");
    assert_matches!(err, ServiceError::ValidationError(_));
}
