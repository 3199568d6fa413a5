//! Scalar cell values shared by tables, selections and view specs.

use polars::prelude::*;
use serde::Serialize;
use std::fmt;

/// A single cell value read out of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// Convert a polars cell. Nulls map to `None`.
    pub fn from_any_value(value: &AnyValue<'_>) -> Option<Self> {
        match value {
            AnyValue::Null => None,
            AnyValue::String(s) => Some(Scalar::Str((*s).to_string())),
            AnyValue::StringOwned(s) => Some(Scalar::Str(s.to_string())),
            AnyValue::Int8(v) => Some(Scalar::Int(i64::from(*v))),
            AnyValue::Int16(v) => Some(Scalar::Int(i64::from(*v))),
            AnyValue::Int32(v) => Some(Scalar::Int(i64::from(*v))),
            AnyValue::Int64(v) => Some(Scalar::Int(*v)),
            AnyValue::UInt8(v) => Some(Scalar::Int(i64::from(*v))),
            AnyValue::UInt16(v) => Some(Scalar::Int(i64::from(*v))),
            AnyValue::UInt32(v) => Some(Scalar::Int(i64::from(*v))),
            AnyValue::Float32(v) => Some(Scalar::Float(f64::from(*v))),
            AnyValue::Float64(v) => Some(Scalar::Float(*v)),
            other => Some(Scalar::Str(other.to_string().trim_matches('"').to_string())),
        }
    }

    /// Literal expression used when filtering on this value.
    pub fn to_lit(&self) -> Expr {
        match self {
            Scalar::Str(s) => lit(s.as_str()),
            Scalar::Int(v) => lit(*v),
            Scalar::Float(v) => lit(*v),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            Scalar::Str(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_polars_cells() {
        assert_eq!(
            Scalar::from_any_value(&AnyValue::String("FIRE")),
            Some(Scalar::from("FIRE"))
        );
        assert_eq!(Scalar::from_any_value(&AnyValue::Int32(2020)), Some(Scalar::Int(2020)));
        assert_eq!(Scalar::from_any_value(&AnyValue::Null), None);
    }

    #[test]
    fn displays_without_quotes() {
        assert_eq!(Scalar::from("Tokyo").to_string(), "Tokyo");
        assert_eq!(Scalar::Int(1952).to_string(), "1952");
    }
}
