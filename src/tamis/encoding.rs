//! # Wire Encoding
//!
//! Composite filter values travel as flat strings so that session slots and
//! query-string parameters share one representation: multi-value lists are
//! comma-joined, date ranges are `YYYYMMDD..YYYYMMDD`, scalars pass through
//! verbatim. Decoding sniffs the separators back out of the string.
//!
//! The sniffing is a documented limitation: a legitimate scalar containing
//! `..` or `,` would be misread as a range or list. The value domain (ids,
//! dates, enum codes) never contains these characters, so the ambiguity is
//! accepted rather than rejected.

use chrono::NaiveDate;

use crate::error::{Result, TamisError};
use crate::model::{DateRange, FilterInput, FilterValue};

/// Date format of range endpoints on the wire.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Separator between the two endpoints of an encoded date range.
pub const RANGE_SEPARATOR: &str = "..";

/// Separator between entries of an encoded multi-value list.
pub const LIST_SEPARATOR: char = ',';

/// Normalizes structured input to its flat string form.
///
/// An empty list normalizes to `None` (the filter is unset); everything else
/// becomes a string.
pub fn normalize(input: FilterInput) -> Option<String> {
    match input {
        FilterInput::List(values) if values.is_empty() => None,
        FilterInput::List(values) => Some(values.join(",")),
        FilterInput::Range(range) => Some(encode_range(&range)),
        FilterInput::Scalar(value) => Some(value),
    }
}

pub fn encode_range(range: &DateRange) -> String {
    format!(
        "{}{}{}",
        range.start.format(DATE_FORMAT),
        RANGE_SEPARATOR,
        range.end.format(DATE_FORMAT)
    )
}

/// Decodes a flat string back into a structured value, sniffing the range and
/// list separators in that order.
///
/// Malformed date tokens in a range propagate as [`TamisError::DateParse`].
pub fn decode(raw: &str) -> Result<FilterValue> {
    if raw.contains(RANGE_SEPARATOR) {
        return decode_range(raw);
    }

    if raw.contains(LIST_SEPARATOR) {
        return Ok(FilterValue::Multiple(split_list(raw)));
    }

    Ok(FilterValue::Single(raw.to_string()))
}

/// Decodes a `YYYYMMDD..YYYYMMDD` string into a full-day inclusive range.
pub fn decode_range(raw: &str) -> Result<FilterValue> {
    let (start, end) = raw.split_once(RANGE_SEPARATOR).unwrap_or((raw, ""));

    Ok(FilterValue::Range(DateRange::full_days(
        parse_date(start)?,
        parse_date(end)?,
    )))
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR).map(str::to_string).collect()
}

fn parse_date(token: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(token, DATE_FORMAT).map_err(|source| TamisError::DateParse {
        token: token.to_string(),
        source,
    })
}
