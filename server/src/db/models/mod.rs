//! Database Models

// Serde helpers
pub mod serde_id;

// Events
pub mod event;

// Bookings
pub mod booking;
pub mod gift_ticket;

// Catalog
pub mod add_on;
pub mod menu_item;

// Discounts
pub mod discount;

// Admin content
pub mod broadcast;
pub mod gallery;

// Re-exports
pub use add_on::{AddOn, AddOnCategory, AddOnCreate, AddOnUpdate};
pub use booking::{Booking, BookingAddOn, BookingDiscount, MealSelection, PaymentStatus};
pub use broadcast::{Broadcast, BroadcastAudience, BroadcastChannel, BroadcastCreate};
pub use discount::{
    Discount, DiscountCreate, DiscountKind, DiscountRules, DiscountScope, DiscountUpdate,
};
pub use event::{Event, EventPricing, EventStatus, EventUpdate, EventVenue};
pub use gallery::{GalleryItem, GalleryItemCreate, GalleryMediaType};
pub use gift_ticket::{GiftTicket, GiftTicketStatus};
pub use menu_item::{Course, MenuItem, MenuItemCreate, MenuItemUpdate};
