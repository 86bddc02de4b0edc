// smartstore-core/src/domain/cleaning/rules.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::dataset::Value;

/// Canonical type a cleaned column is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Natural key, stored as text.
    Key,
    Text,
    Integer,
    Float,
    Date,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultFill {
    /// No default: a cell still missing after coercion drops the row.
    None,
    Value(Value),
    /// The run date carried by the cleaning context.
    Today,
}

impl DefaultFill {
    pub fn resolve(&self, today: NaiveDate) -> Option<Value> {
        match self {
            DefaultFill::None => None,
            DefaultFill::Value(v) => Some(v.clone()),
            DefaultFill::Today => Some(Value::date(today)),
        }
    }
}

/// Hard predicate on a numeric column. Failing rows are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validity {
    AtLeast(f64),
    Within { min: f64, max: f64 },
}

impl Validity {
    pub fn accepts(&self, x: f64) -> bool {
        match *self {
            Validity::AtLeast(min) => x >= min,
            Validity::Within { min, max } => x >= min && x <= max,
        }
    }
}

/// Declarative cleaning of one column.
#[derive(Debug, Clone)]
pub struct ColumnRule {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: ColumnKind,
    pub default: DefaultFill,
    pub validity: Option<Validity>,
    pub allowed: Option<&'static [&'static str]>,
}

impl ColumnRule {
    pub fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            aliases: &[],
            kind,
            default: DefaultFill::None,
            validity: None,
            allowed: None,
        }
    }

    pub fn key(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Key)
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultFill::Value(value.into());
        self
    }

    pub fn default_today(mut self) -> Self {
        self.default = DefaultFill::Today;
        self
    }

    pub fn validity(mut self, validity: Validity) -> Self {
        self.validity = Some(validity);
        self
    }

    pub fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    /// A column whose missing cells cannot be repaired.
    pub fn is_required(&self) -> bool {
        matches!(self.default, DefaultFill::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_bounds_are_inclusive() {
        let pct = Validity::Within {
            min: 0.0,
            max: 100.0,
        };
        assert!(pct.accepts(0.0));
        assert!(pct.accepts(100.0));
        assert!(!pct.accepts(100.5));
        assert!(!Validity::AtLeast(0.0).accepts(-0.01));
    }

    #[test]
    fn test_rule_without_default_is_required() {
        assert!(ColumnRule::key("CustomerID").is_required());
        assert!(
            !ColumnRule::new("Region", ColumnKind::Text)
                .default_value("Unknown")
                .is_required()
        );
    }
}
