use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::errors::ExpectError;
use crate::snapshot::{SnapshotFailure, SnapshotStore};
use crate::subject::{canonical, Subject, SubjectKind};

/// Wraps the actual value and exposes the matcher surface.
pub fn expect(actual: impl Into<Subject>) -> Expectation {
    Expectation {
        subject: actual.into(),
        snapshots: SnapshotStore::default(),
    }
}

/// Outcome of one matcher evaluation.
///
/// `hard()` panics with the enriched message, matching the host test
/// framework's throw-to-fail semantics; `soft()` hands the result back
/// for `?` propagation.
#[must_use = "call hard() or soft() to consume the assertion outcome"]
pub struct Checked(Result<(), ExpectError>);

impl Checked {
    pub fn hard(self) {
        if let Err(err) = self.0 {
            panic!("{err}");
        }
    }

    pub fn soft(self) -> Result<(), ExpectError> {
        self.0
    }

    pub fn passed(&self) -> bool {
        self.0.is_ok()
    }
}

pub struct Expectation {
    subject: Subject,
    snapshots: SnapshotStore,
}

impl Expectation {
    /// Points `to_match_snapshot` at a store other than the default
    /// `snapshots/` root.
    pub fn with_snapshots(mut self, store: SnapshotStore) -> Self {
        self.snapshots = store;
        self
    }

    fn log(&self, matcher: &str, expected: &str) {
        debug!(
            matcher,
            expected,
            actual = %self.subject.render(),
            "evaluating expectation"
        );
    }

    fn pass(&self) -> Checked {
        Checked(Ok(()))
    }

    fn mismatch(&self, matcher: &str, expected: &str, detail: impl Into<String>) -> Checked {
        Checked(Err(ExpectError::mismatch(
            self.subject.render(),
            matcher,
            expected,
            detail,
        )))
    }

    fn precondition(&self, matcher: &str, expected: &str, detail: impl Into<String>) -> Checked {
        Checked(Err(ExpectError::precondition(
            self.subject.render(),
            matcher,
            expected,
            detail,
        )))
    }

    /// Same-kind strict comparison.
    pub fn to_be(&self, expected: impl Into<Subject>) -> Checked {
        let expected = expected.into();
        let label = expected.render();
        self.log("be", &label);
        if self.subject.kind() != expected.kind() {
            return self.mismatch(
                "be",
                &label,
                format!(
                    "kind {} does not match {}",
                    self.subject.kind(),
                    expected.kind()
                ),
            );
        }
        if self.subject == expected {
            self.pass()
        } else {
            self.mismatch("be", &label, "values differ")
        }
    }

    /// Exact text equality; string subjects only.
    pub fn to_have_text(&self, expected: &str) -> Checked {
        let label = format!("\"{expected}\"");
        let actual = match &self.subject {
            Subject::Str(s) => s,
            _ => {
                return self.precondition(
                    "have text",
                    &label,
                    format!(
                        "have text requires a string subject, got {}",
                        self.subject.kind()
                    ),
                )
            }
        };
        self.log("have text", &label);
        if actual == expected {
            self.pass()
        } else {
            self.mismatch("have text", &label, "text differs")
        }
    }

    /// Substring on strings, element membership on JSON arrays.
    pub fn to_contain(&self, expected: impl Into<Subject>) -> Checked {
        let expected = expected.into();
        let label = expected.render();
        match (&self.subject, &expected) {
            (Subject::Str(actual), Subject::Str(needle))
            | (Subject::Json(Value::String(actual)), Subject::Str(needle)) => {
                self.log("contain", &label);
                if actual.contains(needle.as_str()) {
                    self.pass()
                } else {
                    self.mismatch("contain", &label, "substring not found")
                }
            }
            (Subject::Str(_), _) => self.precondition(
                "contain",
                &label,
                format!(
                    "contain on a string requires a string operand, got {}",
                    expected.kind()
                ),
            ),
            (Subject::Json(Value::Array(items)), _) => {
                self.log("contain", &label);
                match expected.canonical_json() {
                    Some(needle) => {
                        if items.iter().any(|item| canonical(item) == needle) {
                            self.pass()
                        } else {
                            self.mismatch("contain", &label, "element not found in array")
                        }
                    }
                    None => {
                        self.precondition("contain", &label, "contain requires a defined operand")
                    }
                }
            }
            _ => self.precondition(
                "contain",
                &label,
                format!(
                    "contain requires a string or array subject, got {}",
                    self.subject.kind()
                ),
            ),
        }
    }

    /// Regex match over a string subject.
    pub fn to_match(&self, pattern: &str) -> Checked {
        let label = format!("/{pattern}/");
        let actual = match &self.subject {
            Subject::Str(s) => s,
            _ => {
                return self.precondition(
                    "match",
                    &label,
                    format!(
                        "match requires a string subject, got {}",
                        self.subject.kind()
                    ),
                )
            }
        };
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(err) => {
                return self.precondition("match", &label, format!("invalid pattern: {err}"))
            }
        };
        self.log("match", &label);
        if regex.is_match(actual) {
            self.pass()
        } else {
            self.mismatch("match", &label, "pattern did not match")
        }
    }

    /// Structural equality after canonicalization: number
    /// representations coalesce and object entries set to null compare
    /// equal to absent entries.
    pub fn to_equal(&self, expected: impl Into<Subject>) -> Checked {
        let expected = expected.into();
        let label = expected.render();
        self.log("equal", &label);
        match (self.subject.canonical_json(), expected.canonical_json()) {
            (None, None) => self.pass(),
            (Some(actual), Some(wanted)) if actual == wanted => self.pass(),
            _ => self.mismatch("equal", &label, "values are not structurally equal"),
        }
    }

    /// Structural equality with exact kinds and no null coalescing.
    pub fn to_strict_equal(&self, expected: impl Into<Subject>) -> Checked {
        let expected = expected.into();
        let label = expected.render();
        self.log("strictly equal", &label);
        if self.subject.kind() != expected.kind() {
            return self.mismatch(
                "strictly equal",
                &label,
                format!(
                    "kind {} does not match {}",
                    self.subject.kind(),
                    expected.kind()
                ),
            );
        }
        match (self.subject.to_json(), expected.to_json()) {
            (None, None) => self.pass(),
            (Some(actual), Some(wanted)) if actual == wanted => self.pass(),
            _ => self.mismatch("strictly equal", &label, "values are not strictly equal"),
        }
    }

    /// Char count for strings, entry count for JSON arrays and objects,
    /// call count for spies.
    pub fn to_have_length(&self, expected: usize) -> Checked {
        let label = expected.to_string();
        let length = match &self.subject {
            Subject::Str(s) => s.chars().count(),
            Subject::Json(Value::String(s)) => s.chars().count(),
            Subject::Json(Value::Array(items)) => items.len(),
            Subject::Json(Value::Object(map)) => map.len(),
            Subject::Calls(calls) => calls.len(),
            _ => {
                return self.precondition(
                    "have length",
                    &label,
                    format!(
                        "have length requires a sized subject, got {}",
                        self.subject.kind()
                    ),
                )
            }
        };
        self.log("have length", &label);
        if length == expected {
            self.pass()
        } else {
            self.mismatch("have length", &label, format!("length is {length}"))
        }
    }

    pub fn to_be_instance_of(&self, expected: SubjectKind) -> Checked {
        let label = expected.to_string();
        self.log("be an instance of", &label);
        if self.subject.kind() == expected {
            self.pass()
        } else {
            self.mismatch(
                "be an instance of",
                &label,
                format!("kind is {}", self.subject.kind()),
            )
        }
    }

    /// Dotted-path presence check in a JSON object subject; numeric
    /// segments index into arrays along the way.
    pub fn to_have_property(&self, path: &str) -> Checked {
        let label = format!("\"{path}\"");
        let value = match &self.subject {
            Subject::Json(value) if value.is_object() => value,
            _ => {
                return self.precondition(
                    "have property",
                    &label,
                    format!(
                        "have property requires a json object subject, got {}",
                        self.subject.kind()
                    ),
                )
            }
        };
        self.log("have property", &label);
        if lookup(value, path).is_some() {
            self.pass()
        } else {
            self.mismatch("have property", &label, format!("no value at path {path}"))
        }
    }

    /// `to_have_property` with an expected value at the path, compared
    /// like `to_equal`.
    pub fn to_have_property_eq(&self, path: &str, expected: impl Into<Subject>) -> Checked {
        let expected = expected.into();
        let label = format!("\"{path}\" = {}", expected.render());
        let value = match &self.subject {
            Subject::Json(value) if value.is_object() => value,
            _ => {
                return self.precondition(
                    "have property",
                    &label,
                    format!(
                        "have property requires a json object subject, got {}",
                        self.subject.kind()
                    ),
                )
            }
        };
        self.log("have property", &label);
        match (lookup(value, path), expected.canonical_json()) {
            (None, _) => self.mismatch("have property", &label, format!("no value at path {path}")),
            (Some(_), None) => {
                self.precondition("have property", &label, "expected value is undefined")
            }
            (Some(found), Some(wanted)) => {
                if canonical(found) == wanted {
                    self.pass()
                } else {
                    self.mismatch(
                        "have property",
                        &label,
                        format!("value at {path} is {found}"),
                    )
                }
            }
        }
    }

    /// At least one recorded call; spy subjects only.
    pub fn to_be_called(&self) -> Checked {
        let calls = match &self.subject {
            Subject::Calls(calls) => calls,
            _ => {
                return self.precondition(
                    "be called",
                    "",
                    format!(
                        "call matchers require a spy subject, got {}",
                        self.subject.kind()
                    ),
                )
            }
        };
        self.log("be called", "");
        if calls.is_empty() {
            self.mismatch("be called", "", "spy was never called")
        } else {
            self.pass()
        }
    }

    /// Some recorded call whose arguments equal the expected JSON.
    pub fn to_be_called_with(&self, expected: Value) -> Checked {
        let label = expected.to_string();
        let calls = match &self.subject {
            Subject::Calls(calls) => calls,
            _ => {
                return self.precondition(
                    "be called with",
                    &label,
                    format!(
                        "call matchers require a spy subject, got {}",
                        self.subject.kind()
                    ),
                )
            }
        };
        self.log("be called with", &label);
        let wanted = canonical(&expected);
        if calls.iter().any(|call| canonical(call) == wanted) {
            self.pass()
        } else {
            self.mismatch(
                "be called with",
                &label,
                format!("none of {} recorded calls matched", calls.len()),
            )
        }
    }

    pub fn to_be_defined(&self) -> Checked {
        self.log("be defined", "");
        match &self.subject {
            Subject::Missing => self.mismatch("be defined", "", "subject is missing"),
            Subject::Json(Value::Null) => self.mismatch("be defined", "", "subject is null"),
            _ => self.pass(),
        }
    }

    pub fn to_be_truthy(&self) -> Checked {
        self.log("be truthy", "");
        if truthy(&self.subject) {
            self.pass()
        } else {
            self.mismatch("be truthy", "", "value is falsy")
        }
    }

    pub fn to_be_falsy(&self) -> Checked {
        self.log("be falsy", "");
        if truthy(&self.subject) {
            self.mismatch("be falsy", "", "value is truthy")
        } else {
            self.pass()
        }
    }

    /// Canonical JSON of the subject against `<root>/<name>.snap` in
    /// the expectation's snapshot store.
    pub fn to_match_snapshot(&self, name: &str) -> Checked {
        let label = format!("\"{name}\"");
        let value = match self.subject.canonical_json() {
            Some(value) => value,
            None => {
                return self.precondition(
                    "match snapshot",
                    &label,
                    "snapshot requires a defined subject",
                )
            }
        };
        self.log("match snapshot", &label);
        let mut rendered =
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        rendered.push('\n');
        match self.snapshots.verify(name, &rendered) {
            Ok(_) => self.pass(),
            Err(SnapshotFailure::Mismatch { name, diff }) => Checked(Err(ExpectError::snapshot(
                self.subject.render(),
                label,
                format!("snapshot '{name}' differs\n{diff}"),
            ))),
            Err(SnapshotFailure::Io(err)) => Checked(Err(ExpectError::snapshot(
                self.subject.render(),
                label,
                format!("snapshot store failed: {err}"),
            ))),
        }
    }
}

fn lookup<'v>(mut value: &'v Value, path: &str) -> Option<&'v Value> {
    for segment in path.split('.') {
        value = match value {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(value)
}

/// JS-style truthiness: empty strings, zero, false, null and missing
/// are falsy; everything else is truthy.
fn truthy(subject: &Subject) -> bool {
    match subject {
        Subject::Str(s) => !s.is_empty(),
        Subject::Int(i) => *i != 0,
        Subject::Float(f) => *f != 0.0 && !f.is_nan(),
        Subject::Bool(b) => *b,
        Subject::Json(value) => json_truthy(value),
        Subject::Calls(_) => true,
        Subject::Missing => false,
    }
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
