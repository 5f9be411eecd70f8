//! Event API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::ServerState;
use crate::db::models::{Event, EventUpdate};
use crate::domain::schedule;
use crate::utils::time::{business_now, now_utc};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/events - upcoming events, soonest first
pub async fn list_upcoming(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<Event>>>> {
    let events = state.events().find_upcoming(now_utc()).await?;
    Ok(ok(events))
}

#[derive(Debug, Serialize)]
pub struct NextEventResponse {
    /// Calendar instant of the next dinner, whether or not its record
    /// has been materialized yet
    pub next_event_at: DateTime<Utc>,
    pub event: Option<Event>,
}

/// GET /api/events/next - the next dinner on the calendar, with its
/// record when one exists
pub async fn next_event(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<NextEventResponse>>> {
    let next_at = schedule::next_event_instant(business_now(state.config.timezone));
    let upcoming = state.events().find_upcoming(now_utc()).await?;
    Ok(ok(NextEventResponse {
        next_event_at: next_at.with_timezone(&Utc),
        event: upcoming.into_iter().next(),
    }))
}

/// GET /api/events/all - every event including drafts and past months
pub async fn list_all(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Vec<Event>>>> {
    let events = state.events().find_all().await?;
    Ok(ok(events))
}

/// GET /api/events/:id
pub async fn get_by_id(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Event>>> {
    let event = state
        .events()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;
    Ok(ok(event))
}

/// PUT /api/events/:id - admin edits to status, capacity, venue, menu
pub async fn update(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(payload): Json<EventUpdate>,
) -> AppResult<Json<AppResponse<Event>>> {
    if let Some(capacity) = payload.capacity {
        let current = state
            .events()
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;
        // Capacity can never drop below the seats already sold
        if capacity < current.seats_booked {
            return Err(AppError::business_rule(format!(
                "Capacity {} is below the {} seats already booked",
                capacity, current.seats_booked
            )));
        }
    }
    let event = state.events().update(&id, payload).await?;
    Ok(ok(event))
}

/// POST /api/events/materialize - admin trigger for this month's draft
pub async fn materialize(
    State(state): State<Arc<ServerState>>,
) -> AppResult<Json<AppResponse<Value>>> {
    let now = business_now(state.config.timezone);
    let created = state.materializer().ensure_monthly_event(now).await?;
    let message = if created {
        "Draft event created"
    } else {
        "Event already exists"
    };
    Ok(ok_with_message(json!({ "created": created }), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_router, router_ext::OneshotRouter};
    use crate::core::Config;
    use crate::db::models::{EventPricing, EventStatus, EventVenue};
    use axum::body::{Body, to_bytes};
    use chrono::Duration;
    use http::{Request, StatusCode};

    async fn get_json(state: Arc<ServerState>, uri: &str) -> (StatusCode, Value) {
        let mut router = build_router();
        let response = router
            .oneshot(
                state,
                Request::builder().uri(uri).body(Body::empty()).unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn next_reports_the_calendar_instant_with_no_record_yet() {
        let state = ServerState::for_tests(Config::from_env()).await.unwrap();

        let (status, body) = get_json(state, "/api/events/next").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["event"].is_null());

        // A dinner is always on the calendar, materialized or not
        let at: DateTime<Utc> =
            serde_json::from_value(body["data"]["next_event_at"].clone()).unwrap();
        assert!(at > Utc::now());
    }

    #[tokio::test]
    async fn next_attaches_the_published_record_when_one_exists() {
        let state = ServerState::for_tests(Config::from_env()).await.unwrap();
        state
            .events()
            .create_if_absent(Event {
                id: None,
                month_key: "2099-01".to_string(),
                date_time: Utc::now() + Duration::days(30),
                capacity: 30,
                seats_booked: 0,
                pricing: EventPricing {
                    seat_price_pence: 2500,
                    corkage_fee_pence: 200,
                },
                status: EventStatus::Published,
                venue: EventVenue::default(),
                menu: vec![],
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let (status, body) = get_json(state, "/api/events/next").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["event"]["month_key"], "2099-01");
    }
}
