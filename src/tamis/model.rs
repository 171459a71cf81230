use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Timestamp format used when a resolved range is serialized for the front end.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// An inclusive date range resolved from a filter value.
///
/// `start` sits at 00:00:00.000 of its date and `end` at 23:59:59.999 of its
/// date, so the pair can be fed directly into a `BETWEEN`-style query clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Expands two dates into a full-day inclusive range.
    pub fn full_days(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(end_of_day()),
        }
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("23:59:59.999 is a valid time")
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DateRange", 2)?;
        s.serialize_field("start", &self.start.format(TIMESTAMP_FORMAT).to_string())?;
        s.serialize_field("end", &self.end.format(TIMESTAMP_FORMAT).to_string())?;
        s.end()
    }
}

/// A resolved filter value, as returned by `filter_for` and
/// `default_value_for`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    Multiple(Vec<String>),
    Range(DateRange),
}

/// Structured input accepted by `set_filter_value`, before normalization to
/// the flat string form used for storage and transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    Scalar(String),
    List(Vec<String>),
    Range(DateRange),
}

impl From<FilterValue> for FilterInput {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Single(s) => FilterInput::Scalar(s),
            FilterValue::Multiple(v) => FilterInput::List(v),
            FilterValue::Range(r) => FilterInput::Range(r),
        }
    }
}

/// Raw value of one incoming query-string parameter: scalar, or repeated
/// (array) form as sent by multi-select widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Many(Vec<String>),
}

impl From<ParamValue> for FilterInput {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Single(s) => FilterInput::Scalar(s),
            ParamValue::Many(v) => FilterInput::List(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_days_expands_to_day_boundaries() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let range = DateRange::full_days(start, end);

        assert_eq!(range.start.to_string(), "2024-01-01 00:00:00");
        assert_eq!(range.end.to_string(), "2024-01-31 23:59:59.999");
    }

    #[test]
    fn range_serializes_with_millisecond_precision() {
        let range = DateRange::full_days(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );

        let json = serde_json::to_value(FilterValue::Range(range)).unwrap();
        assert_eq!(json["start"], "2024-01-01T00:00:00.000");
        assert_eq!(json["end"], "2024-01-02T23:59:59.999");
    }

    #[test]
    fn value_serializes_untagged() {
        let single = serde_json::to_value(FilterValue::Single("3".into())).unwrap();
        assert_eq!(single, serde_json::json!("3"));

        let multiple =
            serde_json::to_value(FilterValue::Multiple(vec!["2".into(), "5".into()])).unwrap();
        assert_eq!(multiple, serde_json::json!(["2", "5"]));
    }
}
