use crate::{
    db::DbPool,
    entities::{event, inventory_item},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateInventoryItemRequest {
    pub event_id: i32,
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    pub category: Option<String>,
    /// Opening stock; later changes go through the stock-delta operations
    #[validate(range(min = 0, message = "Initial stock must not be negative"))]
    #[serde(default)]
    pub initial_stock: i32,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub price_category_sold: Decimal,
    #[serde(default)]
    pub is_category_sold: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateInventoryItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub price_category_sold: Option<Decimal>,
    pub is_category_sold: Option<bool>,
}

pub(crate) async fn find_item_on<C>(
    conn: &C,
    item_id: i32,
) -> Result<inventory_item::Model, ServiceError>
where
    C: ConnectionTrait,
{
    inventory_item::Entity::find_by_id(item_id)
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| ServiceError::NotFound(format!("Inventory item {} not found", item_id)))
}

/// Consumes `quantity` units: `quantity_available` down, `quantity_sold` up,
/// in one guarded atomic update. Zero rows affected with the item present
/// means the stock would have gone negative.
pub(crate) async fn consume_stock_on<C>(
    conn: &C,
    item_id: i32,
    quantity: i32,
    acting_user: Option<i32>,
) -> Result<inventory_item::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let updated = inventory_item::Entity::update_many()
        .col_expr(
            inventory_item::Column::QuantityAvailable,
            Expr::col(inventory_item::Column::QuantityAvailable).sub(quantity),
        )
        .col_expr(
            inventory_item::Column::QuantitySold,
            Expr::col(inventory_item::Column::QuantitySold).add(quantity),
        )
        .col_expr(inventory_item::Column::UpdatedBy, Expr::value(acting_user))
        .col_expr(inventory_item::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(inventory_item::Column::Id.eq(item_id))
        .filter(Expr::col(inventory_item::Column::QuantityAvailable).gte(quantity))
        .exec(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    if updated.rows_affected == 0 {
        let item = find_item_on(conn, item_id).await?;
        return Err(ServiceError::InsufficientStock(format!(
            "item {} \"{}\": requested {}, available {}",
            item.id, item.name, quantity, item.quantity_available
        )));
    }

    find_item_on(conn, item_id).await
}

/// Returns `quantity` previously consumed units to availability. The sold
/// counter must cover the return; going below zero would mean the ledger
/// never recorded the consumption.
pub(crate) async fn return_stock_on<C>(
    conn: &C,
    item_id: i32,
    quantity: i32,
    acting_user: Option<i32>,
) -> Result<inventory_item::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let updated = inventory_item::Entity::update_many()
        .col_expr(
            inventory_item::Column::QuantityAvailable,
            Expr::col(inventory_item::Column::QuantityAvailable).add(quantity),
        )
        .col_expr(
            inventory_item::Column::QuantitySold,
            Expr::col(inventory_item::Column::QuantitySold).sub(quantity),
        )
        .col_expr(inventory_item::Column::UpdatedBy, Expr::value(acting_user))
        .col_expr(inventory_item::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(inventory_item::Column::Id.eq(item_id))
        .filter(Expr::col(inventory_item::Column::QuantitySold).gte(quantity))
        .exec(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    if updated.rows_affected == 0 {
        let item = find_item_on(conn, item_id).await?;
        return Err(ServiceError::DataIntegrity(format!(
            "item {} \"{}\": cannot return {} units, only {} recorded as sold",
            item.id, item.name, quantity, item.quantity_sold
        )));
    }

    find_item_on(conn, item_id).await
}

/// Folds consumed stock back into availability for every item of an event.
/// Invoked from event deletion so the reclamation is explicit and testable
/// instead of hiding behind cascades.
pub(crate) async fn reclaim_event_inventory_on<C>(
    conn: &C,
    event_id: i32,
) -> Result<u64, ServiceError>
where
    C: ConnectionTrait,
{
    let updated = inventory_item::Entity::update_many()
        .col_expr(
            inventory_item::Column::QuantityAvailable,
            Expr::col(inventory_item::Column::QuantityAvailable)
                .add(Expr::col(inventory_item::Column::QuantitySold)),
        )
        .col_expr(inventory_item::Column::QuantitySold, Expr::value(0))
        .col_expr(inventory_item::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(inventory_item::Column::EventId.eq(event_id))
        .exec(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    Ok(updated.rows_affected)
}

/// Service for per-event inventory. Stock changes are explicit one-shot
/// commands; no pending delta is ever persisted, so a delta can never be
/// applied twice.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a stocked item for an event
    #[instrument(skip(self, request), fields(event_id = request.event_id))]
    pub async fn create_item(
        &self,
        request: CreateInventoryItemRequest,
        acting_user: Option<i32>,
    ) -> Result<inventory_item::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;
        event::Entity::find_by_id(request.event_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Event {} not found", request.event_id))
            })?;

        let now = Utc::now();
        let model = inventory_item::ActiveModel {
            event_id: Set(request.event_id),
            name: Set(request.name.clone()),
            category: Set(request.category.clone()),
            quantity_available: Set(request.initial_stock),
            quantity_sold: Set(0),
            price: Set(request.price),
            price_category_sold: Set(request.price_category_sold),
            is_category_sold: Set(request.is_category_sold),
            created_by: Set(acting_user),
            updated_by: Set(acting_user),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(ServiceError::DatabaseError)?;

        info!(item_id = model.id, "Inventory item created");
        Ok(model)
    }

    /// Updates item details. Counters are out of reach here; saving an item
    /// with no delta leaves its stock untouched.
    #[instrument(skip(self, request))]
    pub async fn update_item(
        &self,
        item_id: i32,
        request: UpdateInventoryItemRequest,
        acting_user: Option<i32>,
    ) -> Result<inventory_item::Model, ServiceError> {
        let db = &*self.db_pool;
        let item = find_item_on(db, item_id).await?;

        let mut active: inventory_item::ActiveModel = item.into();
        if let Some(name) = request.name {
            if name.is_empty() {
                return Err(ServiceError::ValidationError(
                    "Item name is required".to_string(),
                ));
            }
            active.name = Set(name);
        }
        if let Some(category) = request.category {
            active.category = Set(Some(category));
        }
        if let Some(price) = request.price {
            active.price = Set(price);
        }
        if let Some(price_category_sold) = request.price_category_sold {
            active.price_category_sold = Set(price_category_sold);
        }
        if let Some(is_category_sold) = request.is_category_sold {
            active.is_category_sold = Set(is_category_sold);
        }
        active.updated_by = Set(acting_user);
        active.updated_at = Set(Utc::now());

        active.update(db).await.map_err(ServiceError::DatabaseError)
    }

    /// Applies a signed one-shot stock delta to `quantity_available`.
    ///
    /// A negative delta larger than the current availability is rejected
    /// before anything is written; the guard lives here, not at the form
    /// edge.
    #[instrument(skip(self))]
    pub async fn apply_stock_delta(
        &self,
        item_id: i32,
        delta: i32,
        acting_user: Option<i32>,
    ) -> Result<inventory_item::Model, ServiceError> {
        if delta == 0 {
            return find_item_on(&*self.db_pool, item_id).await;
        }

        let db = self.db_pool.clone();
        let model = db
            .transaction::<_, inventory_item::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let mut update = inventory_item::Entity::update_many()
                        .col_expr(
                            inventory_item::Column::QuantityAvailable,
                            Expr::col(inventory_item::Column::QuantityAvailable).add(delta),
                        )
                        .col_expr(inventory_item::Column::UpdatedBy, Expr::value(acting_user))
                        .col_expr(inventory_item::Column::UpdatedAt, Expr::value(Utc::now()))
                        .filter(inventory_item::Column::Id.eq(item_id));

                    if delta < 0 {
                        update = update.filter(
                            Expr::col(inventory_item::Column::QuantityAvailable).gte(-delta),
                        );
                    }

                    let updated = update.exec(txn).await.map_err(ServiceError::DatabaseError)?;

                    if updated.rows_affected == 0 {
                        let item = find_item_on(txn, item_id).await?;
                        return Err(ServiceError::InsufficientStock(format!(
                            "item {} \"{}\": delta {}, available {}",
                            item.id, item.name, delta, item.quantity_available
                        )));
                    }

                    find_item_on(txn, item_id).await
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            item_id,
            delta,
            quantity_available = model.quantity_available,
            "Stock delta applied"
        );

        self.event_sender
            .send(Event::StockDeltaApplied {
                item_id,
                delta,
                quantity_available: model.quantity_available,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    /// Explicit stock consumption, distinct from the signed delta path:
    /// moves `quantity` units from available to sold, failing without a
    /// write when stock does not cover the request.
    #[instrument(skip(self))]
    pub async fn use_stock(
        &self,
        item_id: i32,
        quantity: i32,
        acting_user: Option<i32>,
    ) -> Result<inventory_item::Model, ServiceError> {
        if quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "Quantity must be positive".to_string(),
            ));
        }

        let db = self.db_pool.clone();
        let model = db
            .transaction::<_, inventory_item::Model, ServiceError>(move |txn| {
                Box::pin(async move { consume_stock_on(txn, item_id, quantity, acting_user).await })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        self.event_sender
            .send(Event::StockConsumed {
                item_id,
                quantity,
                quantity_available: model.quantity_available,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    /// Inverse of `use_stock`: returns consumed units to availability.
    #[instrument(skip(self))]
    pub async fn return_stock(
        &self,
        item_id: i32,
        quantity: i32,
        acting_user: Option<i32>,
    ) -> Result<inventory_item::Model, ServiceError> {
        if quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "Quantity must be positive".to_string(),
            ));
        }

        let db = self.db_pool.clone();
        let model = db
            .transaction::<_, inventory_item::Model, ServiceError>(move |txn| {
                Box::pin(async move { return_stock_on(txn, item_id, quantity, acting_user).await })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        self.event_sender
            .send(Event::StockReturned {
                item_id,
                quantity,
                quantity_available: model.quantity_available,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    /// Restores availability for every item of an event. Also reachable on
    /// its own so reclamation can be exercised without deleting the event.
    #[instrument(skip(self))]
    pub async fn reclaim_event_inventory(&self, event_id: i32) -> Result<u64, ServiceError> {
        let db = self.db_pool.clone();
        let reclaimed = db
            .transaction::<_, u64, ServiceError>(move |txn| {
                Box::pin(async move { reclaim_event_inventory_on(txn, event_id).await })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(event_id, reclaimed, "Event inventory reclaimed");

        self.event_sender
            .send(Event::EventInventoryReclaimed {
                event_id,
                items_reclaimed: reclaimed,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(reclaimed)
    }

    /// Gets a single item by id
    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: i32) -> Result<inventory_item::Model, ServiceError> {
        find_item_on(&*self.db_pool, item_id).await
    }

    /// Lists the inventory of one event
    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        event_id: i32,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        inventory_item::Entity::find()
            .filter(inventory_item::Column::EventId.eq(event_id))
            .order_by_asc(inventory_item::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Deletes an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let item = find_item_on(db, item_id).await?;
        item.delete(db).await.map_err(ServiceError::DatabaseError)?;
        Ok(())
    }
}
