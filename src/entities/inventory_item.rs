use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stocked item scoped to one event.
///
/// `quantity_available` never goes negative: every decrement path runs as a
/// guarded atomic update. Stock changes arrive as explicit commands
/// (`apply_stock_delta`, `use_stock`, `return_stock`), never as persisted
/// pending deltas.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub event_id: i32,
    pub name: String,
    pub category: Option<String>,
    pub quantity_available: i32,
    pub quantity_sold: i32,
    pub price: Decimal,
    pub price_category_sold: Decimal,
    pub is_category_sold: bool,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
    #[sea_orm(has_many = "super::expense_item::Entity")]
    ExpenseItems,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::expense_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
