#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use eventops_api::{
    api_v1_routes,
    config::AppConfig,
    db,
    entities::{attendee, company, event, event_ticket_category, inventory_item, ticket_category, user},
    events::{self, EventSender},
    handlers::AppServices,
    services::attendees::CreateAttendeeRequest,
    services::companies::CreateCompanyRequest,
    services::events::{CreateEventRequest, SetAllotmentRequest},
    services::inventory::CreateInventoryItemRequest,
    services::ticket_categories::CreateTicketCategoryRequest,
    services::users::CreateUserRequest,
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Test harness over a file-backed SQLite database with a single pooled
/// connection, so overlapping transactions serialize the way a row-locking
/// backend would.
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    _event_task: tokio::task::JoinHandle<()>,
    _tmp: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("temp dir");
        let db_path = tmp.path().join("eventops_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool).await.expect("migrations");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(1024);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), event_sender.clone());
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = Router::new()
            .nest("/api/v1", api_v1_routes())
            .with_state(state.clone());

        Self {
            state,
            router,
            _event_task: event_task,
            _tmp: tmp,
        }
    }

    pub async fn seed_company(&self) -> company::Model {
        self.state
            .services
            .companies
            .create_company(CreateCompanyRequest {
                name: "Eventos Andinos".to_string(),
            })
            .await
            .expect("seed company")
    }

    pub async fn seed_user(&self, company_id: i32, username: &str) -> user::Model {
        self.state
            .services
            .users
            .create_user(CreateUserRequest {
                company_id,
                username: username.to_string(),
                email: format!("{username}@example.com"),
            })
            .await
            .expect("seed user")
    }

    pub async fn seed_event(&self, company_id: i32, title: &str) -> event::Model {
        let start = Utc::now() + Duration::days(30);
        self.state
            .services
            .events
            .create_event(
                CreateEventRequest {
                    company_id,
                    title: title.to_string(),
                    description: "Seeded event".to_string(),
                    location: "Lima".to_string(),
                    start_time: start,
                    end_time: start + Duration::hours(6),
                    is_paid_event: true,
                    total_tickets: 500,
                },
                None,
            )
            .await
            .expect("seed event")
    }

    pub async fn seed_category(&self, company_id: i32, name: &str) -> ticket_category::Model {
        self.state
            .services
            .ticket_categories
            .create_category(CreateTicketCategoryRequest {
                company_id,
                name: name.to_string(),
                price: Decimal::new(5000, 2),
            })
            .await
            .expect("seed category")
    }

    pub async fn seed_allotment(
        &self,
        event_id: i32,
        ticket_category_id: i32,
        tickets_available: i32,
    ) -> event_ticket_category::Model {
        self.state
            .services
            .events
            .set_allotment(
                event_id,
                SetAllotmentRequest {
                    ticket_category_id,
                    tickets_available,
                },
            )
            .await
            .expect("seed allotment")
    }

    pub async fn seed_attendee(&self, company_id: i32, name: &str) -> attendee::Model {
        self.state
            .services
            .attendees
            .create_attendee(CreateAttendeeRequest {
                company_id,
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                document_type: "DNI".to_string(),
                document_number: "12345678".to_string(),
                phone_number: "+51 999 999 999".to_string(),
                address: None,
                date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12),
                gender: Some("F".to_string()),
                attachment_id: None,
            })
            .await
            .expect("seed attendee")
    }

    pub async fn seed_item(
        &self,
        event_id: i32,
        name: &str,
        initial_stock: i32,
        sellable: bool,
    ) -> inventory_item::Model {
        self.state
            .services
            .inventory
            .create_item(
                CreateInventoryItemRequest {
                    event_id,
                    name: name.to_string(),
                    category: Some("Productos".to_string()),
                    initial_stock,
                    price: Decimal::new(1000, 2),
                    price_category_sold: Decimal::new(1500, 2),
                    is_category_sold: sellable,
                },
                None,
            )
            .await
            .expect("seed inventory item")
    }

    /// Reads the allotment row straight from the store.
    pub async fn allotment(
        &self,
        event_id: i32,
        ticket_category_id: i32,
    ) -> event_ticket_category::Model {
        event_ticket_category::Entity::find()
            .filter(event_ticket_category::Column::EventId.eq(event_id))
            .filter(event_ticket_category::Column::TicketCategoryId.eq(ticket_category_id))
            .one(&*self.state.db)
            .await
            .expect("allotment query")
            .expect("allotment row")
    }
}
