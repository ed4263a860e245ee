use serde::{Deserialize, Serialize};

/// One entry of a code registry, as returned by a lookup endpoint.
///
/// `name` is empty (never absent) when no canonical name is known for `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub name: String,
}

impl LookupRecord {
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
        }
    }

    /// Placeholder echoing an unmatched query as both id and code.
    pub fn unresolved(query: &str) -> Self {
        Self::new(query, query, "")
    }

    /// Identifier written to the hidden input; falls back to `code` when empty.
    pub fn effective_id(&self) -> &str {
        if self.id.is_empty() {
            &self.code
        } else {
            &self.id
        }
    }
}
