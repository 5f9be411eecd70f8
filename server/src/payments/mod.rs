//! Hosted Checkout Integration

pub mod checkout;
pub mod webhook;

pub use checkout::{CheckoutError, CheckoutService, CheckoutSession, SessionRequest};
pub use webhook::{CHECKOUT_COMPLETED, CHECKOUT_EXPIRED, CheckoutEvent, WebhookOutcome, WebhookProcessor};
