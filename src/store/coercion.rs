//! Field-level type coercion for rows read from the backing file or an
//! import.
//!
//! Each parser trims its input and reports a [`ParseError`]; none of them
//! panic. Dates accept `YYYY-MM-DD`, `YYYY/MM/DD`, and ISO datetimes whose
//! time part is discarded.

use crate::errors::ParseError;
use crate::scoring::{to_score, Posture};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn non_empty(raw: Option<&str>) -> Result<&str, ParseError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ParseError::Missing),
    }
}

pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ParseError> {
    let value = non_empty(raw)?;

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .ok_or_else(|| ParseError::InvalidDate(value.to_string()))
}

pub fn parse_task(raw: Option<&str>) -> Result<String, ParseError> {
    let value = raw.ok_or(ParseError::Missing)?.trim();
    if value.is_empty() {
        Err(ParseError::EmptyTask)
    } else {
        Ok(value.to_string())
    }
}

fn parse_finite(value: &str) -> Result<f64, ParseError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(value.to_string()))
}

pub fn parse_load(raw: Option<&str>) -> Result<f64, ParseError> {
    let value = non_empty(raw)?;
    let load = parse_finite(value)?;
    if load < 0.0 {
        return Err(ParseError::Negative(value.to_string()));
    }
    Ok(load)
}

/// Whole non-negative count; integral reals such as `20.0` are accepted.
pub fn parse_frequency(raw: Option<&str>) -> Result<u32, ParseError> {
    let value = non_empty(raw)?;
    if let Ok(count) = value.parse::<u32>() {
        return Ok(count);
    }

    let number = parse_finite(value)?;
    if number < 0.0 {
        Err(ParseError::Negative(value.to_string()))
    } else if number.fract() != 0.0 {
        Err(ParseError::NotInteger(value.to_string()))
    } else if number > f64::from(u32::MAX) {
        Err(ParseError::InvalidNumber(value.to_string()))
    } else {
        Ok(number as u32)
    }
}

pub fn parse_posture(raw: Option<&str>) -> Result<Posture, ParseError> {
    non_empty(raw).map(Posture::parse)
}

/// Stored score, rounded half-to-even and clamped into 0-100.
pub fn parse_score(raw: Option<&str>) -> Result<u8, ParseError> {
    let value = non_empty(raw)?;
    parse_finite(value).map(to_score)
}
