//! Template intrinsic functions as deferred references.
//!
//! An intrinsic is a single-key JSON object whose key is `Ref` or starts with
//! `Fn::`, e.g. `{"Ref": "PortParam"}` or `{"Fn::GetAtt": ["Db", "Port"]}`.
//! Its value is only known when the template is evaluated, so validators that
//! support deferral must leave it alone.

use propguard_core::DeferredReference;
use serde_json::{Map, Value as JsonValue};

/// One intrinsic function call.
#[derive(Debug, Clone, PartialEq)]
pub struct Intrinsic {
    function: String,
    argument: JsonValue,
}

impl Intrinsic {
    pub fn new(function: impl Into<String>, argument: JsonValue) -> Self {
        Self {
            function: function.into(),
            argument,
        }
    }

    /// Shorthand for `{"Ref": name}`.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::new("Ref", JsonValue::String(name.into()))
    }

    /// Recognize an intrinsic in a JSON object.
    ///
    /// Returns `None` for anything that is not exactly one `Ref`/`Fn::*` key.
    pub fn from_object(object: &Map<String, JsonValue>) -> Option<Self> {
        if object.len() != 1 {
            return None;
        }
        let (key, argument) = object.iter().next()?;
        is_intrinsic_key(key).then(|| Self::new(key.clone(), argument.clone()))
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn argument(&self) -> &JsonValue {
        &self.argument
    }
}

fn is_intrinsic_key(key: &str) -> bool {
    key == "Ref" || key.strip_prefix("Fn::").is_some_and(|name| !name.is_empty())
}

impl DeferredReference for Intrinsic {
    fn describe(&self) -> String {
        match &self.argument {
            JsonValue::String(name) => format!("{}({name})", self.function),
            other => format!("{}({other})", self.function),
        }
    }
}
