use chrono::NaiveDateTime;
use thiserror::Error;

use crate::normalize::TIMESTAMP_FORMAT;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date format: {input:?}")]
pub struct ParseError {
    pub input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeDecision {
    Aged,
    NotAged,
}

/// Whole days between `added_date` and `now`, floored.
///
/// `added_date` is compared as-is against the local clock; no timezone
/// correction is applied.
pub fn age_in_days(now: NaiveDateTime, added_date: &str) -> Result<i64, ParseError> {
    let added = NaiveDateTime::parse_from_str(added_date, TIMESTAMP_FORMAT).map_err(|_| ParseError {
        input: added_date.to_string(),
    })?;
    Ok((now - added).num_seconds().div_euclid(SECONDS_PER_DAY))
}

pub fn classify(age_days: i64, threshold_days: i64) -> AgeDecision {
    if age_days >= threshold_days {
        AgeDecision::Aged
    } else {
        AgeDecision::NotAged
    }
}

pub fn evaluate(
    now: NaiveDateTime,
    added_date: &str,
    threshold_days: i64,
) -> Result<(i64, AgeDecision), ParseError> {
    let age = age_in_days(now, added_date)?;
    Ok((age, classify(age, threshold_days)))
}
