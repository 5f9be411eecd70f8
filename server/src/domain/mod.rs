//! Domain Logic
//!
//! Pure calendar, money, and code-generation rules. Nothing in here
//! touches the database or the network, which keeps every rule unit
//! testable without fixtures.

pub mod codes;
pub mod pricing;
pub mod schedule;

pub use pricing::PricingConfig;
