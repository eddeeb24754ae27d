//! Dot-notation access to nested records.
//!
//! Records returned by the service are untyped JSON. This module resolves a
//! dot-separated path such as `"names.name"` against such a record and returns
//! every value found. Arrays met along the way are transparent: the current
//! step is tried against each element and the matches are concatenated, so a
//! path never needs to spell out list indices.
//!
//! # Examples
//!
//! ```
//! use cerl::path::by_dot;
//! use serde_json::json;
//!
//! let record = json!({
//!     "names": [
//!         {"name": "Aldus"},
//!         {"name": "Manutius"},
//!     ]
//! });
//!
//! let names: Vec<_> = by_dot(&record, "names.name");
//! assert_eq!(names, vec![&json!("Aldus"), &json!("Manutius")]);
//! ```

use serde_json::Value;

/// How path resolution treats keys that are present but hold a "falsy" value.
///
/// Falsy values are `null`, `false`, numeric zero, the empty string, the empty
/// array and the empty object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FalsyPolicy {
    /// Falsy values are dropped exactly like missing keys (default).
    ///
    /// A record such as `{"count": 0}` yields nothing for the path `count`.
    #[default]
    TreatAsAbsent,
    /// Only `null` is dropped; every other present value is kept.
    KeepPresent,
}

impl FalsyPolicy {
    fn keeps(self, value: &Value) -> bool {
        match self {
            Self::TreatAsAbsent => is_truthy(value),
            Self::KeepPresent => !value.is_null(),
        }
    }
}

/// Returns `true` unless the value is `null`, `false`, zero, `""`, `[]` or `{}`.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Resolve `path` (dot-separated) against `record` with the default policy.
#[must_use]
pub fn by_dot<'a>(record: &'a Value, path: &str) -> Vec<&'a Value> {
    by_dot_with(record, path, FalsyPolicy::default())
}

/// Resolve `path` (dot-separated) against `record` with an explicit policy.
#[must_use]
pub fn by_dot_with<'a>(record: &'a Value, path: &str, policy: FalsyPolicy) -> Vec<&'a Value> {
    resolve_with(record, path.split('.'), policy)
}

/// Resolve a sequence of steps against `node` with the default policy.
#[must_use]
pub fn resolve<'a, I>(node: &'a Value, steps: I) -> Vec<&'a Value>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    resolve_with(node, steps, FalsyPolicy::default())
}

/// Resolve a sequence of steps against `node`.
///
/// The working set starts as `[node]`. Each step maps every node in the set to
/// its matches and the concatenation becomes the next working set. Unmatched
/// branches drop out silently. The result preserves discovery order.
#[must_use]
pub fn resolve_with<'a, I>(node: &'a Value, steps: I, policy: FalsyPolicy) -> Vec<&'a Value>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut current = vec![node];
    for step in steps {
        let key = step.as_ref();
        let mut next = Vec::new();
        for branch in current {
            step_into(branch, key, policy, &mut next);
        }
        current = next;
    }
    current
}

/// Apply one step to one node, jumping across arrays.
fn step_into<'a>(node: &'a Value, key: &str, policy: FalsyPolicy, out: &mut Vec<&'a Value>) {
    match node {
        Value::Object(map) => {
            if let Some(value) = map.get(key) {
                if policy.keeps(value) {
                    out.push(value);
                }
            }
        },
        Value::Array(items) => {
            for item in items {
                step_into(item, key, policy, out);
            }
        },
        _ => {},
    }
}
