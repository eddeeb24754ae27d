//! Helpers for common record fields.
//!
//! CERL identifiers carry the record type in their first three characters,
//! e.g. `cnp00123` is a person in the CERL Thesaurus.

use std::fmt;

use serde_json::Value;

use crate::error::{CerlError, Result};
use crate::path::by_dot;
use crate::singleton::one;

/// Record type inferred from a CERL Thesaurus identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// `cnl` - place
    Place,
    /// `cnp` - person
    Person,
    /// `cni` - printer
    Printer,
    /// `cnc` - corporate body
    Corporate,
    /// Anything else
    Unspecified,
}

impl RecordType {
    /// Map an identifier prefix to a record type.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "cnl" => Self::Place,
            "cnp" => Self::Person,
            "cni" => Self::Printer,
            "cnc" => Self::Corporate,
            _ => Self::Unspecified,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Person => "person",
            Self::Printer => "printer",
            Self::Corporate => "corporate",
            Self::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The CERL identifier of a record (its `_id` field).
///
/// # Examples
///
/// ```
/// use cerl::fields::identifier_of;
/// use serde_json::json;
///
/// assert_eq!(identifier_of(&json!({"_id": "cnp00123"})).unwrap(), "cnp00123");
/// ```
///
/// # Errors
///
/// Returns [`CerlError::Cardinality`] when `_id` is missing (or empty), and
/// [`CerlError::TypeMismatch`] when it is not a string.
pub fn identifier_of(record: &Value) -> Result<&str> {
    let id = one(by_dot(record, "_id"))?;
    id.as_str().ok_or_else(|| CerlError::TypeMismatch {
        expected: "string",
        found: id.to_string(),
    })
}

/// Infer the record type from the identifier prefix.
///
/// Records without a usable identifier are [`RecordType::Unspecified`].
#[must_use]
pub fn inferred_type_of(record: &Value) -> RecordType {
    identifier_of(record)
        .ok()
        .and_then(|id| id.get(..3))
        .map_or(RecordType::Unspecified, RecordType::from_prefix)
}
