//! Response delay calculation.

use chrono::{NaiveDate, NaiveDateTime};

/// Minimum response content length for a delay to be computable; anything
/// shorter cannot hold a date token plus content.
const MIN_RESPONSE_LEN: usize = 10;

/// Compute the response latency in whole days.
///
/// `created` is the ticket's `%d.%m.%y %H:%M` creation stamp; the first
/// whitespace-delimited token of `response` is a `%d.%m.%y` date. Returns
/// the day difference floored at 0, or -1 when the response is empty, too
/// short, or either date fails to parse. Never panics: the delay is
/// advisory context for the scoring prompt, not a hard requirement.
pub fn response_delay(created: &str, response: &str) -> i64 {
    if response.len() < MIN_RESPONSE_LEN {
        return -1;
    }

    let Ok(created_dt) = NaiveDateTime::parse_from_str(created, "%d.%m.%y %H:%M") else {
        return -1;
    };

    let Some(response_token) = response.split_whitespace().next() else {
        return -1;
    };
    let Ok(response_date) = NaiveDate::parse_from_str(response_token, "%d.%m.%y") else {
        return -1;
    };

    // Whole days from the creation instant to response-day midnight, so a
    // reply at 09:30 three calendar days later counts as 2 full days.
    let elapsed = response_date.and_hms_opt(0, 0, 0).map(|dt| dt - created_dt);
    match elapsed {
        Some(delta) => delta.num_days().max(0),
        None => -1,
    }
}
