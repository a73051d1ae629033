use std::fmt;

use serde_json::{Map, Number, Value};

use crate::spy::Spy;

/// Runtime kind of a wrapped actual value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubjectKind {
    Str,
    Int,
    Float,
    Bool,
    Json,
    Calls,
    Missing,
}

impl SubjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            SubjectKind::Str => "string",
            SubjectKind::Int => "int",
            SubjectKind::Float => "float",
            SubjectKind::Bool => "bool",
            SubjectKind::Json => "json",
            SubjectKind::Calls => "calls",
            SubjectKind::Missing => "missing",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tagged actual value handed to `expect`.
#[derive(Clone, Debug, PartialEq)]
pub enum Subject {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Json(Value),
    /// A spy's recorded calls, one JSON value of arguments per call.
    Calls(Vec<Value>),
    Missing,
}

impl Subject {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::Str(_) => SubjectKind::Str,
            Subject::Int(_) => SubjectKind::Int,
            Subject::Float(_) => SubjectKind::Float,
            Subject::Bool(_) => SubjectKind::Bool,
            Subject::Json(_) => SubjectKind::Json,
            Subject::Calls(_) => SubjectKind::Calls,
            Subject::Missing => SubjectKind::Missing,
        }
    }

    /// Rendering used inside failure messages.
    pub(crate) fn render(&self) -> String {
        match self {
            Subject::Str(s) => format!("\"{s}\""),
            Subject::Int(i) => i.to_string(),
            Subject::Float(f) => f.to_string(),
            Subject::Bool(b) => b.to_string(),
            Subject::Json(v) => v.to_string(),
            Subject::Calls(calls) => format!("spy with {} calls", calls.len()),
            Subject::Missing => "undefined".to_string(),
        }
    }

    /// JSON view of the subject; `None` for a missing value.
    pub(crate) fn to_json(&self) -> Option<Value> {
        match self {
            Subject::Str(s) => Some(Value::String(s.clone())),
            Subject::Int(i) => Some(Value::Number((*i).into())),
            Subject::Float(f) => Number::from_f64(*f).map(Value::Number),
            Subject::Bool(b) => Some(Value::Bool(*b)),
            Subject::Json(v) => Some(v.clone()),
            Subject::Calls(calls) => Some(Value::Array(calls.clone())),
            Subject::Missing => None,
        }
    }

    /// Canonical JSON view, used by `to_equal` and the snapshot store.
    pub(crate) fn canonical_json(&self) -> Option<Value> {
        self.to_json().map(|v| canonical(&v))
    }
}

/// Canonical form for structural comparison: numbers coalesce to their
/// f64 value and object entries set to `null` drop out (equal to
/// absent). Array elements keep their nulls.
pub(crate) fn canonical(value: &Value) -> Value {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| value.clone()),
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, entry) in map {
                if entry.is_null() {
                    continue;
                }
                out.insert(key.clone(), canonical(entry));
            }
            Value::Object(out)
        }
        _ => value.clone(),
    }
}

impl From<&str> for Subject {
    fn from(value: &str) -> Self {
        Subject::Str(value.to_string())
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Subject::Str(value)
    }
}

impl From<i32> for Subject {
    fn from(value: i32) -> Self {
        Subject::Int(value.into())
    }
}

impl From<i64> for Subject {
    fn from(value: i64) -> Self {
        Subject::Int(value)
    }
}

impl From<u32> for Subject {
    fn from(value: u32) -> Self {
        Subject::Int(value.into())
    }
}

impl From<f32> for Subject {
    fn from(value: f32) -> Self {
        Subject::Float(value.into())
    }
}

impl From<f64> for Subject {
    fn from(value: f64) -> Self {
        Subject::Float(value)
    }
}

impl From<bool> for Subject {
    fn from(value: bool) -> Self {
        Subject::Bool(value)
    }
}

impl From<Value> for Subject {
    fn from(value: Value) -> Self {
        Subject::Json(value)
    }
}

impl From<&Spy> for Subject {
    fn from(spy: &Spy) -> Self {
        Subject::Calls(spy.calls())
    }
}

impl<T: Into<Subject>> From<Option<T>> for Subject {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Subject::Missing,
        }
    }
}
