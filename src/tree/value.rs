//! Value classification and leaf formatting
//!
//! Every value is classified exactly once into a [`ValueKind`] before the
//! renderer decides between formatting it as a leaf and recursing into it.
//! The strings produced by [`format_display_value`] are a stable output
//! format: `null`, `undefined`, `true`/`false`, `[a, b]` lists and a
//! pretty-printed JSON fallback.

use serde::Serialize;
use serde_json::{Number, Value};

/// Shape of a value as far as the tree renderer is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Explicit JSON `null`
    Null,
    /// No value at all
    Missing,
    /// String, number or boolean
    Scalar,
    /// Non-empty sequence holding only scalars and nulls, shown inline
    ScalarSequence,
    /// Sequence with at least one composite element, or an empty sequence
    CompositeSequence,
    /// Nested object
    Mapping,
}

impl ValueKind {
    pub fn classify(value: Option<&Value>) -> Self {
        match value {
            None => ValueKind::Missing,
            Some(Value::Null) => ValueKind::Null,
            Some(Value::Bool(_) | Value::Number(_) | Value::String(_)) => ValueKind::Scalar,
            Some(Value::Array(items)) => {
                if !items.is_empty() && items.iter().all(is_inline) {
                    ValueKind::ScalarSequence
                } else {
                    ValueKind::CompositeSequence
                }
            }
            Some(Value::Object(_)) => ValueKind::Mapping,
        }
    }

    /// Leaves render as a single label/value pair with no expand control
    pub fn is_leaf(self) -> bool {
        !self.is_branch()
    }

    pub fn is_branch(self) -> bool {
        matches!(self, ValueKind::CompositeSequence | ValueKind::Mapping)
    }
}

fn is_inline(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Format a leaf value for display.
///
/// `None` stands for a value that is absent, which renders differently from
/// an explicit `null`.
pub fn format_display_value(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::from("undefined");
    };

    match value {
        Value::Null => String::from("null"),
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) if items.iter().all(is_inline) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| format_display_value(Some(item)))
                .collect();
            format!("[{}]", parts.join(", "))
        }
        // Fallback for structured values; the renderer recurses into these instead
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Numbers print the way a browser would show them: `10.0` becomes `10`,
/// `-0` becomes `0`, and magnitudes from 1e21 up or below 1e-6 switch to
/// exponent form (`1e+21`, `1.5e-7`)
fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    let Some(f) = n.as_f64() else {
        return n.to_string();
    };

    if f == 0.0 {
        return String::from("0");
    }

    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        // `{:e}` gives the shortest mantissa; only the exponent sign differs
        let formatted = format!("{:e}", f);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }

    if f.fract() == 0.0 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}
