//! Server Configuration

use crate::domain::PricingConfig;
use crate::payments::checkout::CheckoutConfig;
use chrono_tz::Tz;
use std::time::Duration;

/// Server configuration, loaded from environment variables.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/supperclub | Database and log files |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development, staging or production |
/// | TIMEZONE | Europe/London | Venue timezone for the event calendar |
/// | SEAT_PRICE_PENCE | 2500 | Per-seat dinner price |
/// | CORKAGE_FEE_PENCE | 200 | Bring-your-own corkage fee |
/// | DEFAULT_CAPACITY | 30 | Seats on a freshly created event |
/// | MAX_SEATS_PER_BOOKING | 8 | Upper bound on seats in one booking |
/// | CHECKOUT_API_BASE | https://api.stripe.com | Payment provider origin |
/// | CHECKOUT_SECRET_KEY | (empty) | Provider secret key |
/// | CHECKOUT_CURRENCY | gbp | Charge currency |
/// | CHECKOUT_SUCCESS_URL | http://localhost:3000/booking/success | Redirect after payment |
/// | CHECKOUT_CANCEL_URL | http://localhost:3000/booking/cancelled | Redirect on abandon |
/// | CHECKOUT_TIMEOUT_SECS | 30 | Provider request timeout |
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Venue timezone; all calendar rules resolve in it
    pub timezone: Tz,
    pub pricing: PricingConfig,
    pub default_capacity: u32,
    pub max_seats_per_booking: u32,
    pub checkout: CheckoutConfig,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = PricingConfig::default();
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/supperclub".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Europe::London),
            pricing: PricingConfig {
                seat_price_pence: std::env::var("SEAT_PRICE_PENCE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.seat_price_pence),
                corkage_fee_pence: std::env::var("CORKAGE_FEE_PENCE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.corkage_fee_pence),
            },
            default_capacity: std::env::var("DEFAULT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            max_seats_per_booking: std::env::var("MAX_SEATS_PER_BOOKING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            checkout: CheckoutConfig {
                api_base: std::env::var("CHECKOUT_API_BASE")
                    .unwrap_or_else(|_| "https://api.stripe.com".into()),
                secret_key: std::env::var("CHECKOUT_SECRET_KEY").unwrap_or_default(),
                currency: std::env::var("CHECKOUT_CURRENCY").unwrap_or_else(|_| "gbp".into()),
                success_url: std::env::var("CHECKOUT_SUCCESS_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/booking/success".into()),
                cancel_url: std::env::var("CHECKOUT_CANCEL_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/booking/cancelled".into()),
                timeout: Duration::from_secs(
                    std::env::var("CHECKOUT_TIMEOUT_SECS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(30),
                ),
            },
        }
    }

    /// Override the bits tests care about
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn db_path(&self) -> String {
        format!("{}/data.db", self.work_dir)
    }

    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir)
    }
}
