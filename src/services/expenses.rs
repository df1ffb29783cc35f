use crate::{
    db::DbPool,
    entities::{event, expense, expense_item, inventory_item, user},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseItemInput {
    pub inventory_item_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateExpenseRequest {
    pub company_id: i32,
    pub event_id: i32,
    /// The client user this sale is recorded for
    pub customer_id: i32,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<ExpenseItemInput>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    #[serde(flatten)]
    pub expense: expense::Model,
    pub items: Vec<expense_item::Model>,
}

/// Loads an inventory item and checks it can be sold as a line of an
/// expense recorded against `event_id`.
async fn sellable_item_on<C>(
    conn: &C,
    inventory_item_id: i32,
    event_id: i32,
) -> Result<inventory_item::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let item = super::inventory::find_item_on(conn, inventory_item_id).await?;
    if item.event_id != event_id {
        return Err(ServiceError::ValidationError(format!(
            "Inventory item {} belongs to another event",
            item.id
        )));
    }
    if !item.is_category_sold {
        return Err(ServiceError::ValidationError(format!(
            "Inventory item {} \"{}\" is not marked for resale",
            item.id, item.name
        )));
    }
    Ok(item)
}

/// Recomputes the derived expense amount (sale price times quantity summed
/// over surviving items) inside the caller's transaction.
async fn recompute_amount_on<C>(conn: &C, expense_id: i32) -> Result<Decimal, ServiceError>
where
    C: ConnectionTrait,
{
    let lines = expense_item::Entity::find()
        .filter(expense_item::Column::ExpenseId.eq(expense_id))
        .find_also_related(inventory_item::Entity)
        .all(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    let total = lines.iter().fold(Decimal::ZERO, |acc, (line, item)| {
        let unit_price = item
            .as_ref()
            .map(|i| i.price_category_sold)
            .unwrap_or(Decimal::ZERO);
        acc + unit_price * Decimal::from(line.quantity)
    });

    expense::Entity::update_many()
        .col_expr(expense::Column::Amount, Expr::value(total))
        .col_expr(expense::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(expense::Column::Id.eq(expense_id))
        .exec(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    Ok(total)
}

/// Service recording sales against event inventory. Every stock mutation
/// applies the net quantity change exactly once, in the same transaction as
/// the expense rows.
#[derive(Clone)]
pub struct ExpenseService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl ExpenseService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates an expense and consumes stock for each of its items.
    #[instrument(skip(self, request), fields(event_id = request.event_id))]
    pub async fn create_expense(
        &self,
        request: CreateExpenseRequest,
        acting_user: Option<i32>,
    ) -> Result<ExpenseResponse, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let mut seen = HashSet::new();
        for item in &request.items {
            if item.quantity < 1 {
                return Err(ServiceError::ValidationError(format!(
                    "Quantity for inventory item {} must be at least 1",
                    item.inventory_item_id
                )));
            }
            if !seen.insert(item.inventory_item_id) {
                return Err(ServiceError::ValidationError(format!(
                    "Inventory item {} appears more than once",
                    item.inventory_item_id
                )));
            }
        }

        let db = self.db_pool.clone();
        let response = db
            .transaction::<_, ExpenseResponse, ServiceError>(move |txn| {
                Box::pin(async move {
                    let event = event::Entity::find_by_id(request.event_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Event {} not found", request.event_id))
                        })?;

                    if event.company_id != request.company_id {
                        return Err(ServiceError::ValidationError(format!(
                            "Event {} belongs to another company",
                            event.id
                        )));
                    }

                    let customer = user::Entity::find_by_id(request.customer_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "User {} not found",
                                request.customer_id
                            ))
                        })?;

                    if customer.company_id != request.company_id {
                        return Err(ServiceError::ValidationError(format!(
                            "User {} belongs to another company",
                            customer.id
                        )));
                    }

                    let now = Utc::now();
                    let header = expense::ActiveModel {
                        company_id: Set(request.company_id),
                        event_id: Set(request.event_id),
                        customer_id: Set(request.customer_id),
                        description: Set(request.description.clone()),
                        date: Set(request.date),
                        amount: Set(Decimal::ZERO),
                        created_by: Set(acting_user),
                        updated_by: Set(acting_user),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                    let mut lines = Vec::with_capacity(request.items.len());
                    for input in &request.items {
                        sellable_item_on(txn, input.inventory_item_id, request.event_id).await?;

                        let line = expense_item::ActiveModel {
                            expense_id: Set(header.id),
                            inventory_item_id: Set(input.inventory_item_id),
                            quantity: Set(input.quantity),
                            created_by: Set(acting_user),
                            updated_by: Set(acting_user),
                            created_at: Set(now),
                            updated_at: Set(now),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?;

                        super::inventory::consume_stock_on(
                            txn,
                            input.inventory_item_id,
                            input.quantity,
                            acting_user,
                        )
                        .await?;

                        lines.push(line);
                    }

                    let amount = recompute_amount_on(txn, header.id).await?;

                    let expense = expense::Model { amount, ..header };
                    Ok(ExpenseResponse {
                        expense,
                        items: lines,
                    })
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            expense_id = response.expense.id,
            items = response.items.len(),
            "Expense created"
        );

        self.event_sender
            .send(Event::ExpenseCreated {
                expense_id: response.expense.id,
                event_id: response.expense.event_id,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(response)
    }

    /// Creates or edits one expense line, applying only the net quantity
    /// change to the inventory counters.
    ///
    /// An increase consumes `(new - old)`; a decrease returns `(old - new)`;
    /// an unchanged quantity touches no stock. Returns the inventory item
    /// as it stands after the change.
    #[instrument(skip(self))]
    pub async fn apply_expense_item(
        &self,
        expense_id: i32,
        inventory_item_id: i32,
        new_quantity: i32,
        acting_user: Option<i32>,
    ) -> Result<inventory_item::Model, ServiceError> {
        if new_quantity < 1 {
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1; remove the line to drop it".to_string(),
            ));
        }

        let db = self.db_pool.clone();
        let (model, old_quantity) = db
            .transaction::<_, (inventory_item::Model, i32), ServiceError>(move |txn| {
                Box::pin(async move {
                    let header = expense::Entity::find_by_id(expense_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Expense {} not found", expense_id))
                        })?;

                    let existing = expense_item::Entity::find()
                        .filter(expense_item::Column::ExpenseId.eq(expense_id))
                        .filter(expense_item::Column::InventoryItemId.eq(inventory_item_id))
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?;

                    let now = Utc::now();
                    let (item, old_quantity) = match existing {
                        Some(line) => {
                            let old_quantity = line.quantity;
                            let delta = new_quantity - old_quantity;

                            let item = if delta > 0 {
                                super::inventory::consume_stock_on(
                                    txn,
                                    inventory_item_id,
                                    delta,
                                    acting_user,
                                )
                                .await?
                            } else if delta < 0 {
                                super::inventory::return_stock_on(
                                    txn,
                                    inventory_item_id,
                                    -delta,
                                    acting_user,
                                )
                                .await?
                            } else {
                                super::inventory::find_item_on(txn, inventory_item_id).await?
                            };

                            let mut active: expense_item::ActiveModel = line.into();
                            active.quantity = Set(new_quantity);
                            active.updated_by = Set(acting_user);
                            active.updated_at = Set(now);
                            active
                                .update(txn)
                                .await
                                .map_err(ServiceError::DatabaseError)?;

                            (item, old_quantity)
                        }
                        None => {
                            sellable_item_on(txn, inventory_item_id, header.event_id).await?;

                            expense_item::ActiveModel {
                                expense_id: Set(expense_id),
                                inventory_item_id: Set(inventory_item_id),
                                quantity: Set(new_quantity),
                                created_by: Set(acting_user),
                                updated_by: Set(acting_user),
                                created_at: Set(now),
                                updated_at: Set(now),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await
                            .map_err(ServiceError::DatabaseError)?;

                            let item = super::inventory::consume_stock_on(
                                txn,
                                inventory_item_id,
                                new_quantity,
                                acting_user,
                            )
                            .await?;

                            (item, 0)
                        }
                    };

                    recompute_amount_on(txn, expense_id).await?;

                    Ok((item, old_quantity))
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            expense_id,
            inventory_item_id, old_quantity, new_quantity, "Expense item applied"
        );

        self.event_sender
            .send(Event::ExpenseItemApplied {
                expense_id,
                inventory_item_id,
                old_quantity,
                new_quantity,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    /// Removes one expense line and returns its full quantity to stock.
    #[instrument(skip(self))]
    pub async fn remove_expense_item(
        &self,
        expense_id: i32,
        inventory_item_id: i32,
        acting_user: Option<i32>,
    ) -> Result<(), ServiceError> {
        let db = self.db_pool.clone();
        let old_quantity = db
            .transaction::<_, i32, ServiceError>(move |txn| {
                Box::pin(async move {
                    let line = expense_item::Entity::find()
                        .filter(expense_item::Column::ExpenseId.eq(expense_id))
                        .filter(expense_item::Column::InventoryItemId.eq(inventory_item_id))
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Expense {} has no line for inventory item {}",
                                expense_id, inventory_item_id
                            ))
                        })?;

                    let quantity = line.quantity;
                    super::inventory::return_stock_on(
                        txn,
                        inventory_item_id,
                        quantity,
                        acting_user,
                    )
                    .await?;

                    line.delete(txn).await.map_err(ServiceError::DatabaseError)?;
                    recompute_amount_on(txn, expense_id).await?;

                    Ok(quantity)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            expense_id,
            inventory_item_id, old_quantity, "Expense item removed"
        );

        self.event_sender
            .send(Event::ExpenseItemApplied {
                expense_id,
                inventory_item_id,
                old_quantity,
                new_quantity: 0,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// Deletes an expense, returning every line's quantity to stock first.
    #[instrument(skip(self))]
    pub async fn delete_expense(
        &self,
        expense_id: i32,
        acting_user: Option<i32>,
    ) -> Result<(), ServiceError> {
        let db = self.db_pool.clone();
        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                let header = expense::Entity::find_by_id(expense_id)
                    .one(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Expense {} not found", expense_id))
                    })?;

                let lines = expense_item::Entity::find()
                    .filter(expense_item::Column::ExpenseId.eq(expense_id))
                    .all(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                for line in &lines {
                    super::inventory::return_stock_on(
                        txn,
                        line.inventory_item_id,
                        line.quantity,
                        acting_user,
                    )
                    .await?;
                }

                header
                    .delete(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                Ok(())
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })?;

        info!(expense_id, "Expense deleted");

        self.event_sender
            .send(Event::ExpenseDeleted { expense_id })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// Gets one expense with its lines
    #[instrument(skip(self))]
    pub async fn get_expense(&self, expense_id: i32) -> Result<ExpenseResponse, ServiceError> {
        let db = &*self.db_pool;
        let expense = expense::Entity::find_by_id(expense_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Expense {} not found", expense_id)))?;

        let items = expense_item::Entity::find()
            .filter(expense_item::Column::ExpenseId.eq(expense_id))
            .order_by_asc(expense_item::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(ExpenseResponse { expense, items })
    }

    /// Lists expenses for one company with pagination
    #[instrument(skip(self))]
    pub async fn list_expenses(
        &self,
        company_id: i32,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<expense::Model>, u64), ServiceError> {
        let paginator = expense::Entity::find()
            .filter(expense::Column::CompanyId.eq(company_id))
            .order_by_desc(expense::Column::Id)
            .paginate(&*self.db_pool, limit);

        let total = paginator
            .num_items()
            .await
            .map_err(ServiceError::DatabaseError)?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok((items, total))
    }
}
