use crate::{
    db::DbPool,
    entities::{event, event_ticket_category, ticket_category},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Utc};
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
pub struct CreateEventRequest {
    pub company_id: i32,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub is_paid_event: bool,
    #[serde(default)]
    pub total_tickets: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_paid_event: Option<bool>,
    pub total_tickets: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetAllotmentRequest {
    pub ticket_category_id: i32,
    #[validate(range(min = 0, message = "Tickets available must not be negative"))]
    pub tickets_available: i32,
}

/// Service for event lifecycle and per-category capacity allotments.
#[derive(Clone)]
pub struct EventService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl EventService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates an event
    #[instrument(skip(self, request), fields(company_id = request.company_id))]
    pub async fn create_event(
        &self,
        request: CreateEventRequest,
        acting_user: Option<i32>,
    ) -> Result<event::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        if request.end_time <= request.start_time {
            return Err(ServiceError::ValidationError(
                "Event must end after it starts".to_string(),
            ));
        }

        let db = &*self.db_pool;
        crate::entities::company::Entity::find_by_id(request.company_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Company {} not found", request.company_id))
            })?;

        let now = Utc::now();
        let model = event::ActiveModel {
            company_id: Set(request.company_id),
            title: Set(request.title.clone()),
            description: Set(request.description.clone()),
            location: Set(request.location.clone()),
            start_time: Set(request.start_time),
            end_time: Set(request.end_time),
            is_paid_event: Set(request.is_paid_event),
            total_tickets: Set(request.total_tickets),
            created_by: Set(acting_user),
            updated_by: Set(acting_user),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(ServiceError::DatabaseError)?;

        info!(event_id = model.id, "Event created");

        self.event_sender
            .send(Event::EventCreated(model.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    /// Updates event details
    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        event_id: i32,
        request: UpdateEventRequest,
        acting_user: Option<i32>,
    ) -> Result<event::Model, ServiceError> {
        let db = &*self.db_pool;
        let existing = self.get_event(event_id).await?;

        let start_time = request.start_time.unwrap_or(existing.start_time);
        let end_time = request.end_time.unwrap_or(existing.end_time);
        if end_time <= start_time {
            return Err(ServiceError::ValidationError(
                "Event must end after it starts".to_string(),
            ));
        }

        let mut active: event::ActiveModel = existing.into();
        if let Some(title) = request.title {
            if title.is_empty() {
                return Err(ServiceError::ValidationError("Title is required".to_string()));
            }
            active.title = Set(title);
        }
        if let Some(description) = request.description {
            active.description = Set(description);
        }
        if let Some(location) = request.location {
            active.location = Set(location);
        }
        active.start_time = Set(start_time);
        active.end_time = Set(end_time);
        if let Some(is_paid_event) = request.is_paid_event {
            active.is_paid_event = Set(is_paid_event);
        }
        if let Some(total_tickets) = request.total_tickets {
            active.total_tickets = Set(total_tickets);
        }
        active.updated_by = Set(acting_user);
        active.updated_at = Set(Utc::now());

        let model = active.update(db).await.map_err(ServiceError::DatabaseError)?;

        self.event_sender
            .send(Event::EventUpdated(model.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    /// Creates or resizes the capacity allotment for one (event,
    /// ticket_category) pair. Shrinking below the current sold count is
    /// rejected so the admission invariant keeps holding.
    #[instrument(skip(self, request), fields(ticket_category_id = request.ticket_category_id))]
    pub async fn set_allotment(
        &self,
        event_id: i32,
        request: SetAllotmentRequest,
    ) -> Result<event_ticket_category::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = self.db_pool.clone();
        let model = db
            .transaction::<_, event_ticket_category::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let event = event::Entity::find_by_id(event_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Event {} not found", event_id))
                        })?;

                    let category =
                        ticket_category::Entity::find_by_id(request.ticket_category_id)
                            .one(txn)
                            .await
                            .map_err(ServiceError::DatabaseError)?
                            .ok_or_else(|| {
                                ServiceError::NotFound(format!(
                                    "Ticket category {} not found",
                                    request.ticket_category_id
                                ))
                            })?;

                    if category.company_id != event.company_id {
                        return Err(ServiceError::ValidationError(format!(
                            "Ticket category {} belongs to another company",
                            category.id
                        )));
                    }

                    let existing = event_ticket_category::Entity::find()
                        .filter(event_ticket_category::Column::EventId.eq(event_id))
                        .filter(
                            event_ticket_category::Column::TicketCategoryId
                                .eq(request.ticket_category_id),
                        )
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?;

                    match existing {
                        Some(allotment) => {
                            if request.tickets_available < allotment.tickets_sold {
                                return Err(ServiceError::ValidationError(format!(
                                    "Cannot shrink allotment below {} tickets already sold",
                                    allotment.tickets_sold
                                )));
                            }
                            let mut active: event_ticket_category::ActiveModel = allotment.into();
                            active.tickets_available = Set(request.tickets_available);
                            active
                                .update(txn)
                                .await
                                .map_err(ServiceError::DatabaseError)
                        }
                        None => event_ticket_category::ActiveModel {
                            event_id: Set(event_id),
                            ticket_category_id: Set(request.ticket_category_id),
                            tickets_available: Set(request.tickets_available),
                            tickets_sold: Set(0),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await
                        .map_err(ServiceError::DatabaseError),
                    }
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        self.event_sender
            .send(Event::AllotmentSet {
                event_id,
                ticket_category_id: model.ticket_category_id,
                tickets_available: model.tickets_available,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    /// Lists the capacity allotments of one event
    #[instrument(skip(self))]
    pub async fn list_allotments(
        &self,
        event_id: i32,
    ) -> Result<Vec<event_ticket_category::Model>, ServiceError> {
        event_ticket_category::Entity::find()
            .filter(event_ticket_category::Column::EventId.eq(event_id))
            .order_by_asc(event_ticket_category::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Deletes an event. Consumed stock is reclaimed first, inside the same
    /// transaction; cascades then remove allotments, purchases, tickets,
    /// inventory, attachments, and expenses.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: i32) -> Result<(), ServiceError> {
        let db = self.db_pool.clone();
        let reclaimed = db
            .transaction::<_, u64, ServiceError>(move |txn| {
                Box::pin(async move {
                    let event = event::Entity::find_by_id(event_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Event {} not found", event_id))
                        })?;

                    let reclaimed =
                        super::inventory::reclaim_event_inventory_on(txn, event_id).await?;

                    event
                        .delete(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?;

                    Ok(reclaimed)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(event_id, reclaimed, "Event deleted");

        self.event_sender
            .send(Event::EventInventoryReclaimed {
                event_id,
                items_reclaimed: reclaimed,
            })
            .await
            .map_err(ServiceError::EventError)?;
        self.event_sender
            .send(Event::EventDeleted(event_id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// Gets a single event by id
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: i32) -> Result<event::Model, ServiceError> {
        event::Entity::find_by_id(event_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Event {} not found", event_id)))
    }

    /// Lists events for one company with pagination
    #[instrument(skip(self))]
    pub async fn list_events(
        &self,
        company_id: i32,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<event::Model>, u64), ServiceError> {
        let paginator = event::Entity::find()
            .filter(event::Column::CompanyId.eq(company_id))
            .order_by_desc(event::Column::StartTime)
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
