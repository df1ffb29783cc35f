use crate::{db::DbPool, entities::ticket_category, errors::ServiceError};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTicketCategoryRequest {
    pub company_id: i32,
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTicketCategoryRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

/// Service for the price tiers a company can sell tickets under.
#[derive(Clone)]
pub struct TicketCategoryService {
    db_pool: Arc<DbPool>,
}

impl TicketCategoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(company_id = request.company_id))]
    pub async fn create_category(
        &self,
        request: CreateTicketCategoryRequest,
    ) -> Result<ticket_category::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;
        crate::entities::company::Entity::find_by_id(request.company_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Company {} not found", request.company_id))
            })?;

        let now = Utc::now();
        ticket_category::ActiveModel {
            company_id: Set(request.company_id),
            name: Set(request.name.clone()),
            price: Set(request.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn get_category(
        &self,
        category_id: i32,
    ) -> Result<ticket_category::Model, ServiceError> {
        ticket_category::Entity::find_by_id(category_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Ticket category {} not found", category_id))
            })
    }

    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        company_id: i32,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<ticket_category::Model>, u64), ServiceError> {
        let paginator = ticket_category::Entity::find()
            .filter(ticket_category::Column::CompanyId.eq(company_id))
            .order_by_asc(ticket_category::Column::Name)
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

    #[instrument(skip(self, request))]
    pub async fn update_category(
        &self,
        category_id: i32,
        request: UpdateTicketCategoryRequest,
    ) -> Result<ticket_category::Model, ServiceError> {
        let existing = self.get_category(category_id).await?;
        let mut active: ticket_category::ActiveModel = existing.into();
        if let Some(name) = request.name {
            if name.is_empty() {
                return Err(ServiceError::ValidationError(
                    "Category name is required".to_string(),
                ));
            }
            active.name = Set(name);
        }
        if let Some(price) = request.price {
            active.price = Set(price);
        }
        active.updated_at = Set(Utc::now());

        active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, category_id: i32) -> Result<(), ServiceError> {
        let existing = self.get_category(category_id).await?;
        existing
            .delete(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok(())
    }
}
