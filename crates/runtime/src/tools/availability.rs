//! Calendar availability checks with nearby-date suggestions.

use crate::Business;
use chrono::{Days, NaiveDate};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use store::{EventType, Store};

/// How far out, in days, the alternative search probes in each direction.
const SEARCH_SPAN_DAYS: u64 = 7;

/// Most alternative dates ever suggested.
const MAX_ALTERNATIVES: usize = 3;

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct Input {
    /// Event date in YYYY-MM-DD format.
    pub event_date: NaiveDate,
    /// Type of event.
    pub event_type: EventType,
}

pub(super) async fn run(store: &dyn Store, business: &Business, input: Input) -> Value {
    let booked = match store.confirmed_booking_on(input.event_date).await {
        Ok(booked) => booked,
        Err(err) => {
            tracing::warn!(error = %err, date = %input.event_date, "availability lookup failed");
            return json!({
                "available": null,
                "error": format!(
                    "Unable to check availability right now. Please call {} for immediate confirmation.",
                    business.phone
                ),
            });
        }
    };

    if !booked {
        return json!({
            "available": true,
            "requested_date": input.event_date,
            "event_type": input.event_type,
            "alternative_dates": [],
            "message": format!(
                "Great news! {} is currently available for your {}.",
                input.event_date,
                input.event_type.as_str()
            ),
        });
    }

    let alternatives = alternatives(store, input.event_date).await;
    json!({
        "available": false,
        "requested_date": input.event_date,
        "event_type": input.event_type,
        "alternative_dates": alternatives,
        "message": format!(
            "{} is already booked, but I have these nearby dates available: {}",
            input.event_date,
            alternatives.join(", ")
        ),
    })
}

/// Collect up to three open dates around `date`.
///
/// Probes outward day by day, the next day before the previous day at each
/// distance; a probe that errors is skipped rather than suggested blind.
async fn alternatives(store: &dyn Store, date: NaiveDate) -> Vec<String> {
    let mut open = Vec::new();

    'search: for distance in 1..=SEARCH_SPAN_DAYS {
        let candidates = [
            date.checked_add_days(Days::new(distance)),
            date.checked_sub_days(Days::new(distance)),
        ];

        for candidate in candidates.into_iter().flatten() {
            match store.confirmed_booking_on(candidate).await {
                Ok(false) => {
                    open.push(candidate.to_string());
                    if open.len() >= MAX_ALTERNATIVES {
                        break 'search;
                    }
                }
                Ok(true) => {}
                Err(err) => {
                    tracing::debug!(error = %err, date = %candidate, "alternative probe failed");
                }
            }
        }
    }

    open
}
