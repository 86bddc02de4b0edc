// smartstore-core/src/domain/cleaning/numeric.rs

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::dataset::Value;

fn re_noise() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Percent signs, currency symbols and whitespace around numbers.
        Regex::new(r"[%$€£\s]").unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Numeric reading of a cell, tolerant to `%`, currency symbols and blanks.
pub fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => f.is_finite().then_some(*f),
        Value::Text(s) => {
            let cleaned = re_noise().replace_all(s, "");
            cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Integer reading of a cell. Non-integral numbers are rejected.
///
/// Integer literals are read exactly, without a detour through `f64`.
pub fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Text(s) => re_noise()
            .replace_all(s, "")
            .parse::<i64>()
            .ok()
            .or_else(|| to_f64(value).and_then(integral)),
        other => to_f64(other).and_then(integral),
    }
}

pub fn integral(x: f64) -> Option<i64> {
    // 2^63 is exactly representable, i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if x.fract() == 0.0 && x >= -LIMIT && x < LIMIT {
        Some(x as i64)
    } else {
        None
    }
}

/// Coerces a cell to `Int` / `Float`, anything unreadable becomes `Null`.
///
/// Numbers already typed are returned unchanged; text is re-read and becomes
/// `Int` when it holds an integer literal.
pub fn coerce(value: &Value) -> Value {
    match value {
        Value::Int(_) => value.clone(),
        Value::Float(f) if f.is_finite() => value.clone(),
        Value::Text(s) => {
            let cleaned = re_noise().replace_all(s, "");
            if let Ok(i) = cleaned.parse::<i64>() {
                Value::Int(i)
            } else {
                match cleaned.parse::<f64>() {
                    Ok(f) if f.is_finite() => Value::Float(f),
                    _ => Value::Null,
                }
            }
        }
        _ => Value::Null,
    }
}
