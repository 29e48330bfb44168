//! Field-level validation built from ordered, independent rules.
//!
//! Every rule attached to a field is evaluated, and every failure is recorded,
//! so a single response can report all problems with a request at once.

use serde_json::Value;
use validator::{ValidateLength, ValidateRange};

use crate::core::error::AppError;
use crate::shared::types::FieldError;

/// A predicate over a field value paired with the message reported when it fails
pub struct Rule<'a, T: ?Sized> {
    check: Box<dyn Fn(&T) -> bool + 'a>,
    message: String,
}

impl<'a, T: ?Sized> Rule<'a, T> {
    pub fn new(check: impl Fn(&T) -> bool + 'a, message: impl Into<String>) -> Self {
        Self {
            check: Box::new(check),
            message: message.into(),
        }
    }
}

/// Collects failures across all fields of one request
#[derive(Debug, Default)]
pub struct FieldRules {
    errors: Vec<FieldError>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every rule against `value`; returns true when all of them pass
    pub fn evaluate<T: ?Sized>(&mut self, field: &str, value: &T, rules: &[Rule<'_, T>]) -> bool {
        let mut passed = true;
        for rule in rules {
            if !(rule.check)(value) {
                self.errors.push(FieldError::new(field, rule.message.as_str()));
                passed = false;
            }
        }
        passed
    }

    /// Required text, trimmed, at most `max_length` characters
    pub fn text(&mut self, field: &str, raw: Option<&Value>, max_length: u64) -> Option<String> {
        let value = trimmed_text(raw);
        let rules = [
            Rule::new(
                |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty()),
                format!("{} is required", field),
            ),
            Rule::new(
                move |v: &Option<String>| {
                    v.as_ref()
                        .map_or(true, |s| s.validate_length(None, Some(max_length), None))
                },
                format!("{} must be at most {} characters", field, max_length),
            ),
        ];

        if self.evaluate(field, &value, &rules) {
            value
        } else {
            None
        }
    }

    /// Required float (JSON number or numeric string) within `[min, max]`
    pub fn float_in_range(
        &mut self,
        field: &str,
        raw: Option<&Value>,
        (min, max): (f64, f64),
    ) -> Option<f64> {
        let rules = [
            Rule::new(|v: &Option<&Value>| is_present(*v), format!("{} is required", field)),
            Rule::new(
                move |v: &Option<&Value>| {
                    parse_float(*v).is_some_and(|f| f.validate_range(Some(min), Some(max), None, None))
                },
                format!("{} must be between {} and {}", field, min, max),
            ),
        ];

        if self.evaluate(field, &raw, &rules) {
            parse_float(raw)
        } else {
            None
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Turn the collected failures into a single validation error, if any
    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Absent, `null` and `""` all count as missing
fn is_present(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn trimmed_text(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_float(raw: Option<&Value>) -> Option<f64> {
    let parsed = match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}
