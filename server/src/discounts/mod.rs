//! Discount Validation

pub mod validator;

pub use validator::{AppliedDiscount, DiscountRefusal, DiscountValidator};
