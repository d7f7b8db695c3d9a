use super::*;

use ::time::format_description::well_known::Rfc3339;
use ::time::macros::format_description;
use ::time::{Date as TimeDate, OffsetDateTime};

/// Calendar date, accepting `1999-12-31` and `December 31, 1999`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Date;

impl Type for Date {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Date(_) => Some(value.clone()),
            Value::DateTime(value) => Some(Value::Date(value.date())),
            Value::Text(value) => parse_date(value.trim()).map(Value::Date),
            _ => None,
        }
    }
}

fn parse_date(value: &str) -> Option<TimeDate> {
    TimeDate::parse(value, format_description!("[year]-[month]-[day]"))
        .or_else(|_| {
            TimeDate::parse(
                value,
                format_description!(
                    "[month repr:long case_sensitive:false] [day padding:none], [year]"
                ),
            )
        })
        .or_else(|_| OffsetDateTime::parse(value, &Rfc3339).map(|value| value.date()))
        .ok()
}

/// Timestamp in RFC 3339 format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DateTime;

impl Type for DateTime {
    fn cast(&self, value: &Value) -> Option<Value> {
        match value {
            Value::DateTime(_) => Some(value.clone()),
            Value::Date(value) => Some(Value::DateTime(value.midnight().assume_utc())),
            Value::Text(value) => OffsetDateTime::parse(value.trim(), &Rfc3339)
                .ok()
                .map(Value::DateTime),
            _ => None,
        }
    }
}
