//! Checkout API Handlers
//!
//! Records are created PENDING before the customer is sent to the
//! hosted payment page; seats only join the event when the webhook
//! confirms payment.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{
    Booking, BookingAddOn, BookingDiscount, Event, EventStatus, GiftTicket, GiftTicketStatus,
    MealSelection, PaymentStatus,
};
use crate::domain::{codes, pricing};
use crate::payments::checkout::SessionRequest;
use crate::utils::time::now_utc;
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct AddOnLine {
    pub add_on_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BookingCheckoutRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub user_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub user_email: String,
    pub user_phone: Option<String>,
    pub event_id: String,
    #[validate(range(min = 1, message = "At least one seat is required"))]
    pub seats: u32,
    /// Bring-your-own bottles; charged per-seat corkage instead of
    /// ordering from the drinks list
    #[serde(default)]
    pub byob: bool,
    #[serde(default)]
    pub add_ons: Vec<AddOnLine>,
    pub discount_code: Option<String>,
    pub meal_selections: Vec<MealSelection>,
    pub dietary_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingCheckoutResponse {
    pub booking_id: String,
    pub booking_code: String,
    pub total_pence: i64,
    pub session_id: String,
    /// Hosted payment page the customer is redirected to
    pub url: String,
}

/// POST /api/checkout/booking
pub async fn booking(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<BookingCheckoutRequest>,
) -> AppResult<Json<AppResponse<BookingCheckoutResponse>>> {
    payload.validate()?;

    if payload.seats > state.config.max_seats_per_booking {
        return Err(AppError::business_rule(format!(
            "Maximum {} seats per booking",
            state.config.max_seats_per_booking
        )));
    }
    if payload.meal_selections.len() != payload.seats as usize {
        return Err(AppError::validation(
            "One meal selection per seat is required",
        ));
    }
    for selection in &payload.meal_selections {
        if selection.mains.is_empty() {
            return Err(AppError::validation(
                "Each meal selection needs at least one main",
            ));
        }
    }

    let event = bookable_event(&state, &payload.event_id, payload.seats).await?;
    let event_id = event
        .id
        .clone()
        .ok_or_else(|| AppError::database("Event record has no id"))?;

    // Price drink lines from the stored records, never from the client
    let mut add_ons = Vec::with_capacity(payload.add_ons.len());
    for line in &payload.add_ons {
        if line.quantity == 0 {
            continue;
        }
        let record = state
            .add_ons()
            .find_by_id(&line.add_on_id)
            .await?
            .filter(|a| a.active)
            .ok_or_else(|| {
                AppError::validation(format!("Unknown drink add-on: {}", line.add_on_id))
            })?;
        add_ons.push(BookingAddOn {
            add_on: record
                .id
                .ok_or_else(|| AppError::database("Add-on record has no id"))?,
            name: record.name,
            quantity: line.quantity,
            unit_price_pence: record.price_pence,
        });
    }

    let seat_pricing = crate::domain::PricingConfig {
        seat_price_pence: event.pricing.seat_price_pence,
        corkage_fee_pence: event.pricing.corkage_fee_pence,
    };
    let subtotal_pence = pricing::seats_subtotal(&seat_pricing, payload.seats)
        + pricing::corkage_total(&seat_pricing, payload.seats, payload.byob)
        + pricing::add_ons_total(&add_ons);

    let mut discounts = Vec::new();
    let mut discount_total_pence = 0;
    if let Some(code) = payload.discount_code.as_deref().filter(|c| !c.trim().is_empty()) {
        let outcome = state
            .discount_validator()
            .validate(code, payload.seats, subtotal_pence, now_utc())
            .await?;
        match outcome {
            Ok(applied) => {
                discount_total_pence = applied.amount_pence;
                discounts.push(BookingDiscount {
                    discount: applied.discount,
                    code: applied.code,
                    amount_pence: applied.amount_pence,
                });
            }
            Err(refusal) => return Err(AppError::business_rule(refusal.message())),
        }
    }

    let total_pence = pricing::booking_total(subtotal_pence, discount_total_pence);

    let booking = state
        .bookings()
        .create(Booking {
            id: None,
            user_name: payload.user_name,
            user_email: payload.user_email.clone(),
            user_phone: payload.user_phone,
            event: event_id,
            seats: payload.seats,
            byob: payload.byob,
            add_ons,
            discounts,
            subtotal_pence,
            discount_total_pence,
            total_pence,
            payment_status: PaymentStatus::Pending,
            checkout_session_id: None,
            booking_code: codes::booking_code(),
            attended: false,
            meal_selections: payload.meal_selections,
            dietary_notes: payload.dietary_notes,
            created_at: now_utc(),
        })
        .await?;

    let booking_id = booking
        .id
        .clone()
        .ok_or_else(|| AppError::database("Booking record has no id"))?;

    let session = state
        .checkout
        .create_session(SessionRequest {
            customer_email: payload.user_email,
            description: format!(
                "Supper club dinner {} - {} seats",
                event.month_key, booking.seats
            ),
            amount_pence: total_pence,
            metadata: vec![
                ("booking_id".to_string(), booking_id.to_string()),
                ("booking_code".to_string(), booking.booking_code.clone()),
            ],
        })
        .await?;

    state.bookings().set_session(&booking_id, &session.id).await?;

    Ok(ok(BookingCheckoutResponse {
        booking_id: booking_id.to_string(),
        booking_code: booking.booking_code,
        total_pence,
        session_id: session.id,
        url: session.url,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct GiftCheckoutRequest {
    #[validate(length(min = 1, message = "Purchaser name is required"))]
    pub purchaser_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub purchaser_email: String,
    pub event_id: String,
    #[validate(length(min = 1, message = "Recipient name is required"))]
    pub recipient_name: String,
    #[validate(length(min = 1, message = "Recipient phone is required"))]
    pub recipient_phone: String,
    pub recipient_email: Option<String>,
    pub meal_selection: MealSelection,
}

#[derive(Debug, Serialize)]
pub struct GiftCheckoutResponse {
    pub gift_ticket_id: String,
    pub code: String,
    pub total_pence: i64,
    pub session_id: String,
    pub url: String,
}

/// POST /api/checkout/gift - one prepaid seat for someone else
pub async fn gift(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<GiftCheckoutRequest>,
) -> AppResult<Json<AppResponse<GiftCheckoutResponse>>> {
    payload.validate()?;

    if payload.meal_selection.mains.is_empty() {
        return Err(AppError::validation(
            "The meal selection needs at least one main",
        ));
    }

    let event = bookable_event(&state, &payload.event_id, 1).await?;
    let event_id = event
        .id
        .clone()
        .ok_or_else(|| AppError::database("Event record has no id"))?;

    let total_pence = event.pricing.seat_price_pence;

    let ticket = state
        .gift_tickets()
        .create(GiftTicket {
            id: None,
            purchaser_name: payload.purchaser_name,
            purchaser_email: payload.purchaser_email.clone(),
            event: event_id,
            code: codes::gift_code(),
            status: GiftTicketStatus::Purchased,
            payment_status: PaymentStatus::Pending,
            recipient_name: payload.recipient_name,
            recipient_phone: payload.recipient_phone,
            recipient_email: payload.recipient_email,
            redeemed_by: None,
            seats: 1,
            meal_selection: payload.meal_selection,
            price_paid_pence: total_pence,
            checkout_session_id: None,
            created_at: now_utc(),
        })
        .await?;

    let ticket_id = ticket
        .id
        .clone()
        .ok_or_else(|| AppError::database("Gift ticket record has no id"))?;

    let session = state
        .checkout
        .create_session(SessionRequest {
            customer_email: payload.purchaser_email,
            description: format!("Supper club gift ticket {}", event.month_key),
            amount_pence: total_pence,
            metadata: vec![
                ("gift_ticket_id".to_string(), ticket_id.to_string()),
                ("gift_code".to_string(), ticket.code.clone()),
            ],
        })
        .await?;

    state
        .gift_tickets()
        .set_session(&ticket_id, &session.id)
        .await?;

    Ok(ok(GiftCheckoutResponse {
        gift_ticket_id: ticket_id.to_string(),
        code: ticket.code,
        total_pence,
        session_id: session.id,
        url: session.url,
    }))
}

/// Load an event and check it can still take `seats` more seats
async fn bookable_event(
    state: &ServerState,
    event_id: &str,
    seats: u32,
) -> Result<Event, AppError> {
    let event = state
        .events()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", event_id)))?;

    if event.status != EventStatus::Published {
        return Err(AppError::business_rule(
            "This event is not open for booking",
        ));
    }
    if event.date_time <= now_utc() {
        return Err(AppError::business_rule(
            "Booking for this event has closed",
        ));
    }
    let remaining = event.capacity.saturating_sub(event.seats_booked);
    if seats > remaining {
        return Err(AppError::business_rule(format!(
            "Only {} seats remaining for this event",
            remaining
        )));
    }
    Ok(event)
}
