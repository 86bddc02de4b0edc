// smartstore-core/src/domain/cleaning/dates.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::dataset::Value;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y", "%d %b %Y", "%b %d %Y", "%B %d, %Y",
];

pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Date reading of a cell: `Null` stays `Null`, unreadable becomes `Invalid`.
pub fn coerce(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::DateTime(_) => value.clone(),
        Value::Text(s) => parse_datetime(s).map_or(Value::Invalid, Value::DateTime),
        _ => Value::Invalid,
    }
}
