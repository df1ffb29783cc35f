mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use common::TestApp;
use eventops_api::errors::ServiceError;
use eventops_api::services::expenses::{CreateExpenseRequest, ExpenseItemInput};
use rust_decimal::Decimal;

fn expense_request(
    company_id: i32,
    event_id: i32,
    customer_id: i32,
    items: Vec<ExpenseItemInput>,
) -> CreateExpenseRequest {
    CreateExpenseRequest {
        company_id,
        event_id,
        customer_id,
        description: Some("Venta en barra".to_string()),
        date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        items,
    }
}

#[tokio::test]
async fn expense_edit_applies_net_delta_only() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let operator = app.seed_user(company.id, "operador").await;
    let event = app.seed_event(company.id, "Feria").await;
    let item = app.seed_item(event.id, "Cerveza artesanal", 10, true).await;

    // Creation consumes the full quantity once.
    let created = app
        .state
        .services
        .expenses
        .create_expense(
            expense_request(
                company.id,
                event.id,
                operator.id,
                vec![ExpenseItemInput {
                    inventory_item_id: item.id,
                    quantity: 3,
                }],
            ),
            Some(operator.id),
        )
        .await
        .expect("expense creation");

    let after_create = app.state.services.inventory.get_item(item.id).await.unwrap();
    assert_eq!(after_create.quantity_available, 7);
    assert_eq!(after_create.quantity_sold, 3);

    // Raising 3 -> 5 applies a delta of 2, not 5 again.
    let after_increase = app
        .state
        .services
        .expenses
        .apply_expense_item(created.expense.id, item.id, 5, Some(operator.id))
        .await
        .expect("increase");
    assert_eq!(after_increase.quantity_available, 5);
    assert_eq!(after_increase.quantity_sold, 5);

    // Lowering 5 -> 2 returns 3 units.
    let after_decrease = app
        .state
        .services
        .expenses
        .apply_expense_item(created.expense.id, item.id, 2, Some(operator.id))
        .await
        .expect("decrease");
    assert_eq!(after_decrease.quantity_available, 8);
    assert_eq!(after_decrease.quantity_sold, 2);

    // Unchanged quantity mutates nothing.
    let unchanged = app
        .state
        .services
        .expenses
        .apply_expense_item(created.expense.id, item.id, 2, Some(operator.id))
        .await
        .expect("no-op edit");
    assert_eq!(unchanged.quantity_available, 8);
    assert_eq!(unchanged.quantity_sold, 2);
}

#[tokio::test]
async fn expense_amount_is_derived_from_items() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let operator = app.seed_user(company.id, "operador").await;
    let event = app.seed_event(company.id, "Feria").await;
    // price_category_sold is 15.00 per unit (seed_item)
    let item = app.seed_item(event.id, "Pisco sour", 20, true).await;

    let created = app
        .state
        .services
        .expenses
        .create_expense(
            expense_request(
                company.id,
                event.id,
                operator.id,
                vec![ExpenseItemInput {
                    inventory_item_id: item.id,
                    quantity: 4,
                }],
            ),
            Some(operator.id),
        )
        .await
        .expect("expense creation");
    assert_eq!(created.expense.amount, Decimal::new(6000, 2));

    app.state
        .services
        .expenses
        .apply_expense_item(created.expense.id, item.id, 6, Some(operator.id))
        .await
        .expect("increase");

    let fetched = app
        .state
        .services
        .expenses
        .get_expense(created.expense.id)
        .await
        .expect("fetch");
    assert_eq!(fetched.expense.amount, Decimal::new(9000, 2));

    app.state
        .services
        .expenses
        .remove_expense_item(created.expense.id, item.id, Some(operator.id))
        .await
        .expect("remove line");

    let emptied = app
        .state
        .services
        .expenses
        .get_expense(created.expense.id)
        .await
        .expect("fetch");
    assert_eq!(emptied.expense.amount, Decimal::ZERO);
    assert!(emptied.items.is_empty());

    let restored = app.state.services.inventory.get_item(item.id).await.unwrap();
    assert_eq!(restored.quantity_available, 20);
    assert_eq!(restored.quantity_sold, 0);
}

#[tokio::test]
async fn expense_creation_fails_without_stock_and_writes_nothing() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let operator = app.seed_user(company.id, "operador").await;
    let event = app.seed_event(company.id, "Feria").await;
    let scarce = app.seed_item(event.id, "Chicha morada", 2, true).await;
    let plenty = app.seed_item(event.id, "Empanadas", 50, true).await;

    let err = app
        .state
        .services
        .expenses
        .create_expense(
            expense_request(
                company.id,
                event.id,
                operator.id,
                vec![
                    ExpenseItemInput {
                        inventory_item_id: plenty.id,
                        quantity: 10,
                    },
                    ExpenseItemInput {
                        inventory_item_id: scarce.id,
                        quantity: 3,
                    },
                ],
            ),
            Some(operator.id),
        )
        .await
        .expect_err("second line exceeds stock");
    assert_matches!(err, ServiceError::InsufficientStock(_));

    // The whole transaction rolled back, including the first line.
    let untouched = app.state.services.inventory.get_item(plenty.id).await.unwrap();
    assert_eq!(untouched.quantity_available, 50);
    assert_eq!(untouched.quantity_sold, 0);

    let (expenses, total) = app
        .state
        .services
        .expenses
        .list_expenses(company.id, 1, 20)
        .await
        .expect("list");
    assert!(expenses.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn unsellable_item_is_rejected() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let operator = app.seed_user(company.id, "operador").await;
    let event = app.seed_event(company.id, "Feria").await;
    let internal = app.seed_item(event.id, "Sillas", 30, false).await;

    let err = app
        .state
        .services
        .expenses
        .create_expense(
            expense_request(
                company.id,
                event.id,
                operator.id,
                vec![ExpenseItemInput {
                    inventory_item_id: internal.id,
                    quantity: 1,
                }],
            ),
            Some(operator.id),
        )
        .await
        .expect_err("item is not resold");
    assert_matches!(err, ServiceError::ValidationError(_));

    // Deleting a whole expense returns stock for every line.
    let sellable = app.seed_item(event.id, "Gaseosa", 12, true).await;
    let created = app
        .state
        .services
        .expenses
        .create_expense(
            expense_request(
                company.id,
                event.id,
                operator.id,
                vec![ExpenseItemInput {
                    inventory_item_id: sellable.id,
                    quantity: 5,
                }],
            ),
            Some(operator.id),
        )
        .await
        .expect("expense");

    app.state
        .services
        .expenses
        .delete_expense(created.expense.id, Some(operator.id))
        .await
        .expect("delete expense");

    let restored = app.state.services.inventory.get_item(sellable.id).await.unwrap();
    assert_eq!(restored.quantity_available, 12);
    assert_eq!(restored.quantity_sold, 0);
}
