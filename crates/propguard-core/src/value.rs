//! Candidate values: what a validator receives from the host template model.
//!
//! # Design
//!
//! [`Value`] is a small closed union over the shapes a template property can
//! take before it is written out. Validators never mutate it; on success they
//! hand back a clone (cheap: the only heap-shared variant is the `Arc` behind
//! [`Value::Deferred`]).
//!
//! Deferred references are the one shape the core cannot inspect. The host
//! model decides what counts as "resolved later" by implementing
//! [`DeferredReference`]; the core only ever asks the capability question.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// ── DeferredReference ────────────────────────────────────────────────────────

/// Capability marker for values resolved at template-evaluation time.
///
/// Implemented by the host model (e.g. intrinsic functions such as
/// `{"Ref": "PortParam"}`). Validators that support deferral return such
/// values untouched instead of inspecting them.
pub trait DeferredReference: fmt::Debug + Send + Sync {
    /// Short human-readable label used in diagnostics and reports.
    fn describe(&self) -> String;
}

// ── Value ────────────────────────────────────────────────────────────────────

/// An untyped candidate value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    /// An integer literal outside the `i64` range, kept as its exact decimal
    /// digits (optional leading `-`).
    BigInteger(String),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// A value the host will resolve later; opaque to the core.
    Deferred(Arc<dyn DeferredReference>),
}

impl Value {
    /// Wrap a host-side deferred reference.
    pub fn deferred(reference: impl DeferredReference + 'static) -> Self {
        Self::Deferred(Arc::new(reference))
    }

    /// Shape name used in type-mismatch diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::BigInteger(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Deferred(_) => "deferred reference",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::BigInteger(a), Self::BigInteger(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            // Identity, not structure: two references are "equal" only when
            // they are the same host object.
            (Self::Deferred(a), Self::Deferred(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::BigInteger(digits) => f.write_str(digits),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Deferred(reference) => f.write_str(&reference.describe()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            // Numeric while it fits 128 bits, otherwise the exact digits as text.
            Self::BigInteger(digits) => match (digits.parse::<i128>(), digits.parse::<u128>()) {
                (Ok(n), _) => serializer.serialize_i128(n),
                (_, Ok(n)) => serializer.serialize_u128(n),
                _ => serializer.serialize_str(digits),
            },
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Deferred(reference) => serializer.serialize_str(&reference.describe()),
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}
