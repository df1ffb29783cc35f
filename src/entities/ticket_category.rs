use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A named price tier, many-to-many with events through
/// `event_ticket_categories`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub price: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Company,
    #[sea_orm(has_many = "super::event_ticket_category::Entity")]
    EventTicketCategories,
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::event_ticket_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventTicketCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
