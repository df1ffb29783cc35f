use crate::{
    db::DbPool,
    entities::{attachment, attendee, event},
    errors::ServiceError,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];
const MAX_ATTACHMENT_SIZE_BYTES: i64 = 5 * 1024 * 1024;

const DOCUMENT_TYPES: [&str; 4] = ["DNI", "Pasaporte", "Carné de Extranjería", "Otros"];
const GENDERS: [&str; 3] = ["M", "F", "O"];

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAttendeeRequest {
    pub company_id: i32,
    #[validate(length(min = 1, message = "Attendee name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default = "default_document_type")]
    pub document_type: String,
    #[validate(length(min = 1, message = "Document number is required"))]
    pub document_number: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub attachment_id: Option<i32>,
}

fn default_document_type() -> String {
    "DNI".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAttendeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub attachment_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAttachmentRequest {
    pub company_id: i32,
    pub event_id: i32,
    #[validate(length(min = 1, message = "Attachment subject is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
}

/// Service for attendee records and their proof-of-payment attachments.
/// Only attachment metadata lives here; the blob itself is stored elsewhere.
#[derive(Clone)]
pub struct AttendeeService {
    db_pool: Arc<DbPool>,
}

impl AttendeeService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    async fn check_attachment_reference(
        &self,
        company_id: i32,
        attachment_id: i32,
    ) -> Result<(), ServiceError> {
        let attachment = attachment::Entity::find_by_id(attachment_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Attachment {} not found", attachment_id))
            })?;
        if attachment.company_id != company_id {
            return Err(ServiceError::ValidationError(format!(
                "Attachment {} belongs to another company",
                attachment_id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, request), fields(company_id = request.company_id))]
    pub async fn create_attendee(
        &self,
        request: CreateAttendeeRequest,
    ) -> Result<attendee::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        if !DOCUMENT_TYPES.contains(&request.document_type.as_str()) {
            return Err(ServiceError::ValidationError(format!(
                "Unknown document type \"{}\"",
                request.document_type
            )));
        }
        if let Some(gender) = &request.gender {
            if !GENDERS.contains(&gender.as_str()) {
                return Err(ServiceError::ValidationError(format!(
                    "Unknown gender \"{}\"",
                    gender
                )));
            }
        }
        if let Some(attachment_id) = request.attachment_id {
            self.check_attachment_reference(request.company_id, attachment_id)
                .await?;
        }

        let now = Utc::now();
        attendee::ActiveModel {
            company_id: Set(request.company_id),
            name: Set(request.name.clone()),
            email: Set(request.email.clone()),
            document_type: Set(request.document_type.clone()),
            document_number: Set(request.document_number.clone()),
            phone_number: Set(request.phone_number.clone()),
            address: Set(request.address.clone()),
            date_of_birth: Set(request.date_of_birth),
            gender: Set(request.gender.clone()),
            attachment_id: Set(request.attachment_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self, request))]
    pub async fn update_attendee(
        &self,
        attendee_id: i32,
        request: UpdateAttendeeRequest,
    ) -> Result<attendee::Model, ServiceError> {
        let existing = self.get_attendee(attendee_id).await?;

        if let Some(document_type) = &request.document_type {
            if !DOCUMENT_TYPES.contains(&document_type.as_str()) {
                return Err(ServiceError::ValidationError(format!(
                    "Unknown document type \"{}\"",
                    document_type
                )));
            }
        }
        if let Some(gender) = &request.gender {
            if !GENDERS.contains(&gender.as_str()) {
                return Err(ServiceError::ValidationError(format!(
                    "Unknown gender \"{}\"",
                    gender
                )));
            }
        }
        if let Some(attachment_id) = request.attachment_id {
            self.check_attachment_reference(existing.company_id, attachment_id)
                .await?;
        }

        let mut active: attendee::ActiveModel = existing.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(email) = request.email {
            active.email = Set(email);
        }
        if let Some(document_type) = request.document_type {
            active.document_type = Set(document_type);
        }
        if let Some(document_number) = request.document_number {
            active.document_number = Set(document_number);
        }
        if let Some(phone_number) = request.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(address) = request.address {
            active.address = Set(Some(address));
        }
        if let Some(date_of_birth) = request.date_of_birth {
            active.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(gender) = request.gender {
            active.gender = Set(Some(gender));
        }
        if let Some(attachment_id) = request.attachment_id {
            active.attachment_id = Set(Some(attachment_id));
        }
        active.updated_at = Set(Utc::now());

        active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn get_attendee(&self, attendee_id: i32) -> Result<attendee::Model, ServiceError> {
        attendee::Entity::find_by_id(attendee_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Attendee {} not found", attendee_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_attendees(
        &self,
        company_id: i32,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<attendee::Model>, u64), ServiceError> {
        let paginator = attendee::Entity::find()
            .filter(attendee::Column::CompanyId.eq(company_id))
            .order_by_asc(attendee::Column::Name)
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

    #[instrument(skip(self))]
    pub async fn delete_attendee(&self, attendee_id: i32) -> Result<(), ServiceError> {
        let existing = self.get_attendee(attendee_id).await?;
        existing
            .delete(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok(())
    }

    /// Records attachment metadata, enforcing the upload rules (file type,
    /// size ceiling) the admin surface used to apply.
    #[instrument(skip(self, request), fields(event_id = request.event_id))]
    pub async fn create_attachment(
        &self,
        request: CreateAttachmentRequest,
    ) -> Result<attachment::Model, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let extension = request
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ServiceError::ValidationError(format!(
                "Unsupported file type \"{}\"; allowed: {}",
                extension,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
        if request.size_bytes <= 0 || request.size_bytes > MAX_ATTACHMENT_SIZE_BYTES {
            return Err(ServiceError::ValidationError(format!(
                "File size must be between 1 and {} bytes",
                MAX_ATTACHMENT_SIZE_BYTES
            )));
        }

        let db = &*self.db_pool;
        let event = event::Entity::find_by_id(request.event_id)
            .one(db)
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

        let now = Utc::now();
        attachment::ActiveModel {
            company_id: Set(request.company_id),
            event_id: Set(request.event_id),
            name: Set(request.name.clone()),
            description: Set(request.description.clone()),
            file_name: Set(request.file_name.clone()),
            content_type: Set(request.content_type.clone()),
            size_bytes: Set(request.size_bytes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn get_attachment(
        &self,
        attachment_id: i32,
    ) -> Result<attachment::Model, ServiceError> {
        attachment::Entity::find_by_id(attachment_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Attachment {} not found", attachment_id))
            })
    }

    #[instrument(skip(self))]
    pub async fn list_attachments(
        &self,
        event_id: i32,
    ) -> Result<Vec<attachment::Model>, ServiceError> {
        attachment::Entity::find()
            .filter(attachment::Column::EventId.eq(event_id))
            .order_by_asc(attachment::Column::Id)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn delete_attachment(&self, attachment_id: i32) -> Result<(), ServiceError> {
        let existing = self.get_attachment(attachment_id).await?;
        existing
            .delete(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn allowed_extensions() -> &'static [&'static str] {
        &ALLOWED_EXTENSIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("receipt.pdf", true; "pdf accepted")]
    #[test_case("receipt.PDF", true; "uppercase extension accepted")]
    #[test_case("photo.jpeg", true; "jpeg accepted")]
    #[test_case("archive.zip", false; "zip rejected")]
    #[test_case("receipt", false; "extensionless rejected")]
    fn file_extension_rules(file_name: &str, accepted: bool) {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        assert_eq!(
            AttendeeService::allowed_extensions().contains(&extension.as_str()),
            accepted
        );
    }
}
