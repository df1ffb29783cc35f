use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Capacity ledger row for one (event, ticket_category) pair.
///
/// `tickets_sold` is derived: it always converges to the live count of
/// ticket rows for the pair, recomputed inside the same transaction as any
/// ticket insert or delete. `tickets_sold <= tickets_available` holds for
/// every committed sale.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_ticket_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub event_id: i32,
    pub ticket_category_id: i32,
    pub tickets_available: i32,
    pub tickets_sold: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::ticket_category::Entity",
        from = "Column::TicketCategoryId",
        to = "super::ticket_category::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TicketCategory,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::ticket_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
