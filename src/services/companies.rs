use crate::{
    db::DbPool,
    entities::company,
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: String,
}

/// Service for tenant roots. Deleting a company takes its whole subtree
/// with it via cascades.
#[derive(Clone)]
pub struct CompanyService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl CompanyService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn create_company(
        &self,
        request: CreateCompanyRequest,
    ) -> Result<company::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let now = Utc::now();
        let model = company::ActiveModel {
            name: Set(request.name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;

        info!(company_id = model.id, "Company created");

        self.event_sender
            .send(Event::CompanyCreated(model.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_company(&self, company_id: i32) -> Result<company::Model, ServiceError> {
        company::Entity::find_by_id(company_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Company {} not found", company_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_companies(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<company::Model>, u64), ServiceError> {
        let paginator = company::Entity::find()
            .order_by_asc(company::Column::Name)
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
    pub async fn update_company(
        &self,
        company_id: i32,
        request: CreateCompanyRequest,
    ) -> Result<company::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let existing = self.get_company(company_id).await?;
        let mut active: company::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.updated_at = Set(Utc::now());

        active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn delete_company(&self, company_id: i32) -> Result<(), ServiceError> {
        let existing = self.get_company(company_id).await?;
        existing
            .delete(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(company_id, "Company deleted");

        self.event_sender
            .send(Event::CompanyDeleted(company_id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }
}
