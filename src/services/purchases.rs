use crate::{
    db::DbPool,
    entities::{event, event_ticket_category, purchase},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseRequest {
    pub company_id: i32,
    pub event_id: i32,
    pub ticket_category_id: i32,
    #[validate(length(min = 1, message = "Buyer name is required"))]
    pub buyer: String,
}

/// Service for creating sales transactions under admission control.
#[derive(Clone)]
pub struct PurchaseService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl PurchaseService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a purchase for an (event, ticket_category) pair.
    ///
    /// The capacity check runs against the allotment row at the point of
    /// persistence, not only at form time, because `tickets_sold` changes
    /// frequently. The check is an early rejection: capacity is actually
    /// held by ticket issuance, so a purchase with no tickets consumes no
    /// seats.
    #[instrument(skip(self, request), fields(event_id = request.event_id, ticket_category_id = request.ticket_category_id))]
    pub async fn create_purchase(
        &self,
        request: CreatePurchaseRequest,
    ) -> Result<purchase::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = self.db_pool.clone();
        let model = db
            .transaction::<_, purchase::Model, ServiceError>(move |txn| {
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

                    let allotment = event_ticket_category::Entity::find()
                        .filter(event_ticket_category::Column::EventId.eq(request.event_id))
                        .filter(
                            event_ticket_category::Column::TicketCategoryId
                                .eq(request.ticket_category_id),
                        )
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::ValidationError(format!(
                                "Ticket category {} is not offered for event {}",
                                request.ticket_category_id, request.event_id
                            ))
                        })?;

                    if allotment.tickets_sold >= allotment.tickets_available {
                        return Err(ServiceError::CapacityExceeded(format!(
                            "event {} ticket category {}: {} of {} sold",
                            request.event_id,
                            request.ticket_category_id,
                            allotment.tickets_sold,
                            allotment.tickets_available
                        )));
                    }

                    let now = Utc::now();
                    purchase::ActiveModel {
                        company_id: Set(request.company_id),
                        event_id: Set(request.event_id),
                        ticket_category_id: Set(request.ticket_category_id),
                        buyer: Set(request.buyer.clone()),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(purchase_id = model.id, "Purchase created");

        self.event_sender
            .send(Event::PurchaseCreated {
                purchase_id: model.id,
                event_id: model.event_id,
                ticket_category_id: model.ticket_category_id,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    /// Deletes a purchase. Its tickets go with it (cascade), so the
    /// allotment's sold count is recomputed in the same transaction.
    #[instrument(skip(self))]
    pub async fn delete_purchase(&self, purchase_id: i32) -> Result<(), ServiceError> {
        let db = self.db_pool.clone();
        let (event_id, ticket_category_id, sold) = db
            .transaction::<_, (i32, i32, i32), ServiceError>(move |txn| {
                Box::pin(async move {
                    let purchase = purchase::Entity::find_by_id(purchase_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Purchase {} not found", purchase_id))
                        })?;

                    let event_id = purchase.event_id;
                    let ticket_category_id = purchase.ticket_category_id;

                    purchase
                        .delete(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?;

                    let sold = super::tickets::recompute_sold(txn, event_id, ticket_category_id)
                        .await?;

                    Ok((event_id, ticket_category_id, sold))
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(purchase_id, event_id, ticket_category_id, sold, "Purchase deleted");

        self.event_sender
            .send(Event::PurchaseDeleted { purchase_id })
            .await
            .map_err(ServiceError::EventError)?;
        self.event_sender
            .send(Event::SoldCountRecomputed {
                event_id,
                ticket_category_id,
                tickets_sold: sold,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// Gets a single purchase by id
    #[instrument(skip(self))]
    pub async fn get_purchase(&self, purchase_id: i32) -> Result<purchase::Model, ServiceError> {
        purchase::Entity::find_by_id(purchase_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase {} not found", purchase_id)))
    }

    /// Lists purchases for one company with pagination
    #[instrument(skip(self))]
    pub async fn list_purchases(
        &self,
        company_id: i32,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<purchase::Model>, u64), ServiceError> {
        let paginator = purchase::Entity::find()
            .filter(purchase::Column::CompanyId.eq(company_id))
            .order_by_desc(purchase::Column::Id)
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
