//! Shared Server State

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    AddOnRepository, BookingRepository, BroadcastRepository, DiscountRepository, EventRepository,
    GalleryRepository, GiftTicketRepository, MenuItemRepository,
};
use crate::discounts::DiscountValidator;
use crate::events::EventMaterializer;
use crate::payments::{CheckoutService, WebhookProcessor};
use std::sync::Arc;

/// Everything the handlers need, cloned cheaply behind an Arc
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub checkout: CheckoutService,
}

impl ServerState {
    /// Open the database and build the shared state
    pub async fn initialize(config: Config) -> anyhow::Result<Arc<Self>> {
        let db = DbService::new(&config.db_path()).await?;
        let checkout = CheckoutService::new(config.checkout.clone())?;
        tracing::info!(work_dir = %config.work_dir, "Server state initialized");
        Ok(Arc::new(Self {
            config,
            db,
            checkout,
        }))
    }

    /// In-memory variant for tests
    pub async fn for_tests(config: Config) -> anyhow::Result<Arc<Self>> {
        let db = DbService::memory().await?;
        let checkout = CheckoutService::new(config.checkout.clone())?;
        Ok(Arc::new(Self {
            config,
            db,
            checkout,
        }))
    }

    pub fn events(&self) -> EventRepository {
        EventRepository::new(self.db.db.clone())
    }

    pub fn bookings(&self) -> BookingRepository {
        BookingRepository::new(self.db.db.clone())
    }

    pub fn gift_tickets(&self) -> GiftTicketRepository {
        GiftTicketRepository::new(self.db.db.clone())
    }

    pub fn discounts(&self) -> DiscountRepository {
        DiscountRepository::new(self.db.db.clone())
    }

    pub fn add_ons(&self) -> AddOnRepository {
        AddOnRepository::new(self.db.db.clone())
    }

    pub fn menu_items(&self) -> MenuItemRepository {
        MenuItemRepository::new(self.db.db.clone())
    }

    pub fn broadcasts(&self) -> BroadcastRepository {
        BroadcastRepository::new(self.db.db.clone())
    }

    pub fn gallery(&self) -> GalleryRepository {
        GalleryRepository::new(self.db.db.clone())
    }

    pub fn discount_validator(&self) -> DiscountValidator {
        DiscountValidator::new(self.discounts())
    }

    pub fn materializer(&self) -> EventMaterializer {
        EventMaterializer::new(self.events(), self.config.default_capacity, self.config.pricing)
    }

    pub fn webhook_processor(&self) -> WebhookProcessor {
        WebhookProcessor::new(self.bookings(), self.gift_tickets(), self.events())
    }
}
