use crate::{
    db::DbPool,
    entities::{event_ticket_category, purchase, ticket},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionError,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueTicketRequest {
    pub purchase_id: i32,
    pub attendee_id: i32,
    #[serde(default)]
    pub ticket_confirmed: bool,
    #[serde(default)]
    pub ticket_owner: bool,
    #[serde(default)]
    pub ticket_send_by_email: bool,
}

/// Recomputes `tickets_sold` for one (event, ticket_category) pair as the
/// exact count of ticket rows whose purchase matches the pair, and persists
/// it. The value is a materialized view over ticket rows: running this twice,
/// or after a bulk deletion, converges to the same correct count.
///
/// Must be called inside the same transaction as the ticket insert or delete
/// that made the stored value stale.
pub(crate) async fn recompute_sold<C>(
    conn: &C,
    event_id: i32,
    ticket_category_id: i32,
) -> Result<i32, ServiceError>
where
    C: ConnectionTrait,
{
    let sold = ticket::Entity::find()
        .join(JoinType::InnerJoin, ticket::Relation::Purchase.def())
        .filter(purchase::Column::EventId.eq(event_id))
        .filter(purchase::Column::TicketCategoryId.eq(ticket_category_id))
        .count(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    let updated = event_ticket_category::Entity::update_many()
        .col_expr(
            event_ticket_category::Column::TicketsSold,
            Expr::value(sold as i32),
        )
        .filter(event_ticket_category::Column::EventId.eq(event_id))
        .filter(event_ticket_category::Column::TicketCategoryId.eq(ticket_category_id))
        .exec(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    // A sale referencing a pair without an allotment row is upstream
    // misconfiguration, not a user error.
    if updated.rows_affected == 0 {
        return Err(ServiceError::DataIntegrity(format!(
            "no allotment row for event {} and ticket category {}",
            event_id, ticket_category_id
        )));
    }

    Ok(sold as i32)
}

/// Service for issuing and revoking tickets.
///
/// Both paths recompute `tickets_sold` in the same transaction as the ticket
/// row change; issuance additionally claims a seat on the allotment row,
/// which serializes concurrent issuers per (event, ticket_category).
#[derive(Clone)]
pub struct TicketService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl TicketService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Issues a ticket for an attendee against a purchase.
    ///
    /// Admission control happens here: a conditional increment on the
    /// allotment row claims one seat only while `tickets_sold <
    /// tickets_available`. The claimed row stays locked until commit, so two
    /// issuers racing for the last seat cannot both pass. The exact recount
    /// afterwards keeps the counter a derived value.
    #[instrument(skip(self), fields(purchase_id = request.purchase_id, attendee_id = request.attendee_id))]
    pub async fn issue_ticket(
        &self,
        request: IssueTicketRequest,
    ) -> Result<ticket::Model, ServiceError> {
        let db = self.db_pool.clone();
        let (model, event_id, ticket_category_id, sold) = db
            .transaction::<_, (ticket::Model, i32, i32, i32), ServiceError>(move |txn| {
                Box::pin(async move {
                    let purchase = purchase::Entity::find_by_id(request.purchase_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Purchase {} not found",
                                request.purchase_id
                            ))
                        })?;

                    let attendee =
                        crate::entities::attendee::Entity::find_by_id(request.attendee_id)
                            .one(txn)
                            .await
                            .map_err(ServiceError::DatabaseError)?
                            .ok_or_else(|| {
                                ServiceError::NotFound(format!(
                                    "Attendee {} not found",
                                    request.attendee_id
                                ))
                            })?;

                    if attendee.company_id != purchase.company_id {
                        return Err(ServiceError::ValidationError(format!(
                            "Attendee {} belongs to another company",
                            attendee.id
                        )));
                    }

                    let claimed = event_ticket_category::Entity::update_many()
                        .col_expr(
                            event_ticket_category::Column::TicketsSold,
                            Expr::col(event_ticket_category::Column::TicketsSold).add(1),
                        )
                        .filter(event_ticket_category::Column::EventId.eq(purchase.event_id))
                        .filter(
                            event_ticket_category::Column::TicketCategoryId
                                .eq(purchase.ticket_category_id),
                        )
                        .filter(
                            Expr::col(event_ticket_category::Column::TicketsSold)
                                .lt(Expr::col(event_ticket_category::Column::TicketsAvailable)),
                        )
                        .exec(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?;

                    if claimed.rows_affected == 0 {
                        let allotment = event_ticket_category::Entity::find()
                            .filter(event_ticket_category::Column::EventId.eq(purchase.event_id))
                            .filter(
                                event_ticket_category::Column::TicketCategoryId
                                    .eq(purchase.ticket_category_id),
                            )
                            .one(txn)
                            .await
                            .map_err(ServiceError::DatabaseError)?;

                        return Err(match allotment {
                            Some(a) => ServiceError::CapacityExceeded(format!(
                                "event {} ticket category {}: {} of {} sold",
                                purchase.event_id,
                                purchase.ticket_category_id,
                                a.tickets_sold,
                                a.tickets_available
                            )),
                            None => ServiceError::DataIntegrity(format!(
                                "purchase {} references event {} and ticket category {} without an allotment",
                                purchase.id, purchase.event_id, purchase.ticket_category_id
                            )),
                        });
                    }

                    let now = Utc::now();
                    let model = ticket::ActiveModel {
                        purchase_id: Set(purchase.id),
                        attendee_id: Set(attendee.id),
                        ticket_confirmed: Set(request.ticket_confirmed),
                        ticket_owner: Set(request.ticket_owner),
                        ticket_send_by_email: Set(request.ticket_send_by_email),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                    let sold =
                        recompute_sold(txn, purchase.event_id, purchase.ticket_category_id).await?;

                    Ok((model, purchase.event_id, purchase.ticket_category_id, sold))
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            ticket_id = model.id,
            event_id, ticket_category_id, sold, "Ticket issued"
        );

        self.event_sender
            .send(Event::TicketIssued {
                ticket_id: model.id,
                purchase_id: model.purchase_id,
                attendee_id: model.attendee_id,
            })
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

        Ok(model)
    }

    /// Revokes (deletes) a ticket and recomputes the owning allotment's
    /// sold count in the same transaction.
    #[instrument(skip(self))]
    pub async fn revoke_ticket(&self, ticket_id: i32) -> Result<(), ServiceError> {
        let db = self.db_pool.clone();
        let (purchase_id, event_id, ticket_category_id, sold) = db
            .transaction::<_, (i32, i32, i32, i32), ServiceError>(move |txn| {
                Box::pin(async move {
                    let ticket = ticket::Entity::find_by_id(ticket_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Ticket {} not found", ticket_id))
                        })?;

                    let purchase = purchase::Entity::find_by_id(ticket.purchase_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::DataIntegrity(format!(
                                "ticket {} references missing purchase {}",
                                ticket.id, ticket.purchase_id
                            ))
                        })?;

                    ticket
                        .delete(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?;

                    let sold =
                        recompute_sold(txn, purchase.event_id, purchase.ticket_category_id).await?;

                    Ok((
                        purchase.id,
                        purchase.event_id,
                        purchase.ticket_category_id,
                        sold,
                    ))
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(ticket_id, event_id, ticket_category_id, sold, "Ticket revoked");

        self.event_sender
            .send(Event::TicketRevoked {
                ticket_id,
                purchase_id,
            })
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

    /// Gets a single ticket by id
    #[instrument(skip(self))]
    pub async fn get_ticket(&self, ticket_id: i32) -> Result<ticket::Model, ServiceError> {
        ticket::Entity::find_by_id(ticket_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Ticket {} not found", ticket_id)))
    }

    /// Lists tickets belonging to one purchase
    #[instrument(skip(self))]
    pub async fn list_tickets_for_purchase(
        &self,
        purchase_id: i32,
    ) -> Result<Vec<ticket::Model>, ServiceError> {
        ticket::Entity::find()
            .filter(ticket::Column::PurchaseId.eq(purchase_id))
            .order_by_asc(ticket::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
