//! Event Scheduler
//!
//! Background task that wakes at midnight venue time on the first of
//! each month and asks the materializer for that month's draft. One
//! catch-up tick runs at startup so a server that was down over a month
//! boundary still gets its event.

use super::EventMaterializer;
use crate::utils::time::business_now;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct EventScheduler {
    materializer: EventMaterializer,
    timezone: Tz,
    cancel_token: CancellationToken,
}

impl EventScheduler {
    pub fn new(materializer: EventMaterializer, timezone: Tz) -> Self {
        Self {
            materializer,
            timezone,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Spawn the scheduling loop. Returns immediately; the loop runs
    /// until the cancel token fires.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.tick().await;

            loop {
                let now = business_now(self.timezone);
                let sleep = duration_until_next_first(now);
                tracing::debug!(sleep_secs = sleep.as_secs(), "Scheduler sleeping until the first of next month");

                tokio::select! {
                    _ = self.cancel_token.cancelled() => {
                        tracing::info!("Event scheduler stopped");
                        return;
                    }
                    _ = tokio::time::sleep(sleep) => {
                        self.tick().await;
                    }
                }
            }
        })
    }

    async fn tick(&self) {
        let now = business_now(self.timezone);
        match self.materializer.ensure_monthly_event(now).await {
            Ok(true) => tracing::info!("Scheduler materialized this month's event"),
            Ok(false) => tracing::debug!("Scheduler tick: event already in place"),
            Err(e) => tracing::error!(error = %e, "Scheduler failed to materialize event"),
        }
    }
}

/// Wall-clock duration from `now` until 00:00 on the first of next
/// month, venue time
fn duration_until_next_first(now: DateTime<Tz>) -> Duration {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .expect("first of month is always valid")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid");
    let tz = now.timezone();
    let target = tz
        .from_local_datetime(&first)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&first));
    (target - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::London;

    #[test]
    fn sleeps_until_midnight_on_the_first() {
        let now = London.with_ymd_and_hms(2026, 2, 27, 23, 0, 0).unwrap();
        let sleep = duration_until_next_first(now);
        // Feb 27 23:00 to Mar 1 00:00 is 49 hours
        assert_eq!(sleep, Duration::from_secs(49 * 3600));
    }

    #[test]
    fn december_wraps_into_january() {
        let now = London.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap();
        let sleep = duration_until_next_first(now);
        assert_eq!(sleep, Duration::from_secs(60));
    }
}
