use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240115_000001_create_companies_table::Migration),
            Box::new(m20240115_000002_create_users_table::Migration),
            Box::new(m20240115_000003_create_ticket_categories_table::Migration),
            Box::new(m20240115_000004_create_events_table::Migration),
            Box::new(m20240115_000005_create_event_ticket_categories_table::Migration),
            Box::new(m20240115_000006_create_attachments_table::Migration),
            Box::new(m20240115_000007_create_attendees_table::Migration),
            Box::new(m20240115_000008_create_purchases_table::Migration),
            Box::new(m20240115_000009_create_tickets_table::Migration),
            Box::new(m20240115_000010_create_inventory_items_table::Migration),
            Box::new(m20240115_000011_create_expenses_table::Migration),
            Box::new(m20240115_000012_create_expense_items_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240115_000001_create_companies_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000001_create_companies_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Companies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Companies::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Companies::Name).string().not_null())
                        .col(
                            ColumnDef::new(Companies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Companies::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Companies::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Companies {
        Table,
        Id,
        Name,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000002_create_users_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_companies_table::Companies;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000002_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Users::CompanyId).integer().not_null())
                        .col(ColumnDef::new(Users::Username).string().not_null())
                        .col(ColumnDef::new(Users::Email).string().not_null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_users_company_id")
                                .from(Users::Table, Users::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_username")
                        .table(Users::Table)
                        .col(Users::Username)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        Id,
        CompanyId,
        Username,
        Email,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000003_create_ticket_categories_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_companies_table::Companies;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000003_create_ticket_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TicketCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TicketCategories::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(TicketCategories::CompanyId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TicketCategories::Name).string().not_null())
                        .col(
                            ColumnDef::new(TicketCategories::Price)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(TicketCategories::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TicketCategories::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_categories_company_id")
                                .from(TicketCategories::Table, TicketCategories::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TicketCategories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum TicketCategories {
        Table,
        Id,
        CompanyId,
        Name,
        Price,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000004_create_events_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_companies_table::Companies;
    use super::m20240115_000002_create_users_table::Users;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000004_create_events_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Events::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Events::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Events::CompanyId).integer().not_null())
                        .col(ColumnDef::new(Events::Title).string().not_null())
                        .col(ColumnDef::new(Events::Description).text().not_null())
                        .col(ColumnDef::new(Events::Location).string().not_null())
                        .col(
                            ColumnDef::new(Events::StartTime)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Events::EndTime)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Events::IsPaidEvent)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Events::TotalTickets)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Events::CreatedBy).integer().null())
                        .col(ColumnDef::new(Events::UpdatedBy).integer().null())
                        .col(
                            ColumnDef::new(Events::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Events::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_events_company_id")
                                .from(Events::Table, Events::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_events_created_by")
                                .from(Events::Table, Events::CreatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_events_updated_by")
                                .from(Events::Table, Events::UpdatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_events_company_id")
                        .table(Events::Table)
                        .col(Events::CompanyId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Events::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Events {
        Table,
        Id,
        CompanyId,
        Title,
        Description,
        Location,
        StartTime,
        EndTime,
        IsPaidEvent,
        TotalTickets,
        CreatedBy,
        UpdatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000005_create_event_ticket_categories_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000003_create_ticket_categories_table::TicketCategories;
    use super::m20240115_000004_create_events_table::Events;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000005_create_event_ticket_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(EventTicketCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(EventTicketCategories::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(EventTicketCategories::EventId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(EventTicketCategories::TicketCategoryId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(EventTicketCategories::TicketsAvailable)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(EventTicketCategories::TicketsSold)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_event_ticket_categories_event_id")
                                .from(EventTicketCategories::Table, EventTicketCategories::EventId)
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_event_ticket_categories_ticket_category_id")
                                .from(
                                    EventTicketCategories::Table,
                                    EventTicketCategories::TicketCategoryId,
                                )
                                .to(TicketCategories::Table, TicketCategories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One allotment row per (event, ticket_category) pair
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_event_ticket_categories_event_category")
                        .table(EventTicketCategories::Table)
                        .col(EventTicketCategories::EventId)
                        .col(EventTicketCategories::TicketCategoryId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(EventTicketCategories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum EventTicketCategories {
        Table,
        Id,
        EventId,
        TicketCategoryId,
        TicketsAvailable,
        TicketsSold,
    }
}

mod m20240115_000006_create_attachments_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_companies_table::Companies;
    use super::m20240115_000004_create_events_table::Events;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000006_create_attachments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Attachments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Attachments::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Attachments::CompanyId).integer().not_null())
                        .col(ColumnDef::new(Attachments::EventId).integer().not_null())
                        .col(ColumnDef::new(Attachments::Name).string().not_null())
                        .col(ColumnDef::new(Attachments::Description).text().null())
                        .col(ColumnDef::new(Attachments::FileName).string().not_null())
                        .col(ColumnDef::new(Attachments::ContentType).string().not_null())
                        .col(
                            ColumnDef::new(Attachments::SizeBytes)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Attachments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Attachments::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_attachments_company_id")
                                .from(Attachments::Table, Attachments::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_attachments_event_id")
                                .from(Attachments::Table, Attachments::EventId)
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Attachments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Attachments {
        Table,
        Id,
        CompanyId,
        EventId,
        Name,
        Description,
        FileName,
        ContentType,
        SizeBytes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000007_create_attendees_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_companies_table::Companies;
    use super::m20240115_000006_create_attachments_table::Attachments;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000007_create_attendees_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Attendees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Attendees::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Attendees::CompanyId).integer().not_null())
                        .col(ColumnDef::new(Attendees::Name).string().not_null())
                        .col(ColumnDef::new(Attendees::Email).string().not_null())
                        .col(
                            ColumnDef::new(Attendees::DocumentType)
                                .string()
                                .not_null()
                                .default("DNI"),
                        )
                        .col(
                            ColumnDef::new(Attendees::DocumentNumber)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Attendees::PhoneNumber).string().not_null())
                        .col(ColumnDef::new(Attendees::Address).string().null())
                        .col(ColumnDef::new(Attendees::DateOfBirth).date().null())
                        .col(ColumnDef::new(Attendees::Gender).string_len(1).null())
                        .col(ColumnDef::new(Attendees::AttachmentId).integer().null())
                        .col(
                            ColumnDef::new(Attendees::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Attendees::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_attendees_company_id")
                                .from(Attendees::Table, Attendees::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_attendees_attachment_id")
                                .from(Attendees::Table, Attendees::AttachmentId)
                                .to(Attachments::Table, Attachments::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Attendees::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Attendees {
        Table,
        Id,
        CompanyId,
        Name,
        Email,
        DocumentType,
        DocumentNumber,
        PhoneNumber,
        Address,
        DateOfBirth,
        Gender,
        AttachmentId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000008_create_purchases_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_companies_table::Companies;
    use super::m20240115_000003_create_ticket_categories_table::TicketCategories;
    use super::m20240115_000004_create_events_table::Events;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000008_create_purchases_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Purchases::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Purchases::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Purchases::CompanyId).integer().not_null())
                        .col(ColumnDef::new(Purchases::EventId).integer().not_null())
                        .col(
                            ColumnDef::new(Purchases::TicketCategoryId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Purchases::Buyer).string().not_null())
                        .col(
                            ColumnDef::new(Purchases::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Purchases::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchases_company_id")
                                .from(Purchases::Table, Purchases::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchases_event_id")
                                .from(Purchases::Table, Purchases::EventId)
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchases_ticket_category_id")
                                .from(Purchases::Table, Purchases::TicketCategoryId)
                                .to(TicketCategories::Table, TicketCategories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchases_event_category")
                        .table(Purchases::Table)
                        .col(Purchases::EventId)
                        .col(Purchases::TicketCategoryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Purchases::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Purchases {
        Table,
        Id,
        CompanyId,
        EventId,
        TicketCategoryId,
        Buyer,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000009_create_tickets_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000007_create_attendees_table::Attendees;
    use super::m20240115_000008_create_purchases_table::Purchases;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000009_create_tickets_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tickets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Tickets::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Tickets::PurchaseId).integer().not_null())
                        .col(ColumnDef::new(Tickets::AttendeeId).integer().not_null())
                        .col(
                            ColumnDef::new(Tickets::TicketConfirmed)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Tickets::TicketOwner)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Tickets::TicketSendByEmail)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Tickets::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Tickets::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_tickets_purchase_id")
                                .from(Tickets::Table, Tickets::PurchaseId)
                                .to(Purchases::Table, Purchases::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_tickets_attendee_id")
                                .from(Tickets::Table, Tickets::AttendeeId)
                                .to(Attendees::Table, Attendees::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tickets_purchase_id")
                        .table(Tickets::Table)
                        .col(Tickets::PurchaseId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Tickets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Tickets {
        Table,
        Id,
        PurchaseId,
        AttendeeId,
        TicketConfirmed,
        TicketOwner,
        TicketSendByEmail,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000010_create_inventory_items_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000002_create_users_table::Users;
    use super::m20240115_000004_create_events_table::Events;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000010_create_inventory_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(InventoryItems::EventId).integer().not_null())
                        .col(ColumnDef::new(InventoryItems::Name).string().not_null())
                        .col(ColumnDef::new(InventoryItems::Category).string().null())
                        .col(
                            ColumnDef::new(InventoryItems::QuantityAvailable)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::QuantitySold)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::Price)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::PriceCategorySold)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::IsCategorySold)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(InventoryItems::CreatedBy).integer().null())
                        .col(ColumnDef::new(InventoryItems::UpdatedBy).integer().null())
                        .col(
                            ColumnDef::new(InventoryItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_items_event_id")
                                .from(InventoryItems::Table, InventoryItems::EventId)
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_items_created_by")
                                .from(InventoryItems::Table, InventoryItems::CreatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_items_updated_by")
                                .from(InventoryItems::Table, InventoryItems::UpdatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            // One item name per event
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_items_event_name")
                        .table(InventoryItems::Table)
                        .col(InventoryItems::EventId)
                        .col(InventoryItems::Name)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryItems {
        Table,
        Id,
        EventId,
        Name,
        Category,
        QuantityAvailable,
        QuantitySold,
        Price,
        PriceCategorySold,
        IsCategorySold,
        CreatedBy,
        UpdatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000011_create_expenses_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000001_create_companies_table::Companies;
    use super::m20240115_000002_create_users_table::Users;
    use super::m20240115_000004_create_events_table::Events;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000011_create_expenses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Expenses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Expenses::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Expenses::CompanyId).integer().not_null())
                        .col(ColumnDef::new(Expenses::EventId).integer().not_null())
                        .col(ColumnDef::new(Expenses::CustomerId).integer().not_null())
                        .col(ColumnDef::new(Expenses::Description).text().null())
                        .col(ColumnDef::new(Expenses::Date).date().not_null())
                        .col(
                            ColumnDef::new(Expenses::Amount)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Expenses::CreatedBy).integer().null())
                        .col(ColumnDef::new(Expenses::UpdatedBy).integer().null())
                        .col(
                            ColumnDef::new(Expenses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Expenses::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expenses_company_id")
                                .from(Expenses::Table, Expenses::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expenses_event_id")
                                .from(Expenses::Table, Expenses::EventId)
                                .to(Events::Table, Events::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expenses_customer_id")
                                .from(Expenses::Table, Expenses::CustomerId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expenses_created_by")
                                .from(Expenses::Table, Expenses::CreatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expenses_updated_by")
                                .from(Expenses::Table, Expenses::UpdatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Expenses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Expenses {
        Table,
        Id,
        CompanyId,
        EventId,
        CustomerId,
        Description,
        Date,
        Amount,
        CreatedBy,
        UpdatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240115_000012_create_expense_items_table {
    use sea_orm_migration::prelude::*;

    use super::m20240115_000002_create_users_table::Users;
    use super::m20240115_000010_create_inventory_items_table::InventoryItems;
    use super::m20240115_000011_create_expenses_table::Expenses;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240115_000012_create_expense_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ExpenseItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ExpenseItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ExpenseItems::ExpenseId).integer().not_null())
                        .col(
                            ColumnDef::new(ExpenseItems::InventoryItemId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ExpenseItems::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(ExpenseItems::CreatedBy).integer().null())
                        .col(ColumnDef::new(ExpenseItems::UpdatedBy).integer().null())
                        .col(
                            ColumnDef::new(ExpenseItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ExpenseItems::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expense_items_expense_id")
                                .from(ExpenseItems::Table, ExpenseItems::ExpenseId)
                                .to(Expenses::Table, Expenses::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expense_items_inventory_item_id")
                                .from(ExpenseItems::Table, ExpenseItems::InventoryItemId)
                                .to(InventoryItems::Table, InventoryItems::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expense_items_created_by")
                                .from(ExpenseItems::Table, ExpenseItems::CreatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_expense_items_updated_by")
                                .from(ExpenseItems::Table, ExpenseItems::UpdatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            // One line per inventory item within an expense
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_expense_items_expense_item")
                        .table(ExpenseItems::Table)
                        .col(ExpenseItems::ExpenseId)
                        .col(ExpenseItems::InventoryItemId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ExpenseItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ExpenseItems {
        Table,
        Id,
        ExpenseId,
        InventoryItemId,
        Quantity,
        CreatedBy,
        UpdatedBy,
        CreatedAt,
        UpdatedAt,
    }
}
