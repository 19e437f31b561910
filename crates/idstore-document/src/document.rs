//! Documents and query filters.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A record that can be persisted as a JSON document.
///
/// Each document type lives in its own collection and is keyed by a string
/// id that the store never rewrites.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection (table) name. Must be a plain lowercase identifier.
    const COLLECTION: &'static str;

    /// Returns the document id.
    fn id(&self) -> &str;
}

/// A single-predicate document filter.
///
/// Field names refer to top-level keys of the serialized document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document in the collection.
    All,
    /// Matches documents whose string field equals `value`.
    Eq {
        /// Top-level field name.
        field: &'static str,
        /// Expected value.
        value: String,
    },
    /// Matches documents whose array field contains the string `value`.
    Contains {
        /// Top-level array field name.
        field: &'static str,
        /// Element to look for.
        value: String,
    },
}

impl Filter {
    /// Creates an equality filter.
    #[must_use]
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    /// Creates an array-membership filter.
    #[must_use]
    pub fn contains(field: &'static str, value: impl Into<String>) -> Self {
        Self::Contains {
            field,
            value: value.into(),
        }
    }

    /// Evaluates the filter against a serialized document.
    #[must_use]
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Self::All => true,
            Self::Eq { field, value } => {
                doc.get(*field).and_then(Value::as_str) == Some(value.as_str())
            }
            Self::Contains { field, value } => doc
                .get(*field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.iter().any(|item| item.as_str() == Some(value))),
        }
    }
}
