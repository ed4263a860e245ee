//! Code/name registries behind reference fields.
//!
//! The server side only needs a [`LookupProvider`]; the browser side is the
//! lookup client in [`client`], which queries whatever endpoint a
//! [`ReferenceField`](crate::domain::ReferenceField) names.

pub mod client;
pub mod fragments;
pub mod submission;

use once_cell::sync::Lazy;

use crate::domain::LookupRecord;

/// Process-wide copy of [`PostcodeRegistry::demo`].
pub static DEMO_POSTCODES: Lazy<PostcodeRegistry> = Lazy::new(PostcodeRegistry::demo);

/// Contract implemented by registries that resolve codes to records.
pub trait LookupProvider {
    /// Records matching `query`; never empty for a non-blank query.
    fn find(&self, query: &str) -> Vec<LookupRecord>;
}

/// Applies the registry filter rule.
///
/// A blank query returns every record; otherwise records whose code starts
/// with the trimmed query are kept in registry order. When nothing matches a
/// single [`LookupRecord::unresolved`] placeholder is returned.
pub fn filter_records(records: &[LookupRecord], query: &str) -> Vec<LookupRecord> {
    let query = query.trim();
    if query.is_empty() {
        return records.to_vec();
    }
    let matches: Vec<LookupRecord> = records
        .iter()
        .filter(|record| record.code.starts_with(query))
        .cloned()
        .collect();
    if matches.is_empty() {
        vec![LookupRecord::unresolved(query)]
    } else {
        matches
    }
}

/// Serializes records as the JSON array served by the lookup endpoint.
pub fn to_json(records: &[LookupRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

/// Fixed in-memory postcode registry.
#[derive(Debug, Clone, Default)]
pub struct PostcodeRegistry {
    records: Vec<LookupRecord>,
}

impl PostcodeRegistry {
    pub fn new(records: Vec<LookupRecord>) -> Self {
        Self { records }
    }

    /// Demo registry of Belgian postcodes; the code doubles as the id.
    pub fn demo() -> Self {
        let entries = [
            ("8500", "Kortrijk"),
            ("8501", "Bissegem"),
            ("8510", "Marke"),
            ("8520", "Kuurne"),
            ("8530", "Harelbeke"),
            ("8540", "Deerlijk"),
            ("8550", "Zwevegem"),
            ("1000", "Brussel"),
            ("2000", "Antwerpen"),
            ("9000", "Gent"),
        ];
        Self::new(
            entries
                .iter()
                .map(|(code, name)| LookupRecord::new(*code, *code, *name))
                .collect(),
        )
    }

    pub fn records(&self) -> &[LookupRecord] {
        &self.records
    }
}

impl LookupProvider for PostcodeRegistry {
    fn find(&self, query: &str) -> Vec<LookupRecord> {
        let found = filter_records(&self.records, query);
        tracing::debug!(query, results = found.len(), "postcode lookup");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_registry() -> PostcodeRegistry {
        PostcodeRegistry::new(vec![
            LookupRecord::new("8500", "8500", "Kortrijk"),
            LookupRecord::new("8501", "8501", "Bissegem"),
            LookupRecord::new("1000", "1000", "Brussel"),
        ])
    }

    #[test]
    fn prefix_match_keeps_registry_order() {
        let found = small_registry().find("85");
        assert_eq!(
            found,
            vec![
                LookupRecord::new("8500", "8500", "Kortrijk"),
                LookupRecord::new("8501", "8501", "Bissegem"),
            ]
        );
    }

    #[test]
    fn unmatched_query_synthesizes_placeholder() {
        let found = small_registry().find("  9999 ");
        assert_eq!(found, vec![LookupRecord::new("9999", "9999", "")]);
    }

    #[test]
    fn blank_query_returns_everything() {
        assert_eq!(small_registry().find("").len(), 3);
        assert_eq!(small_registry().find("   ").len(), 3);
    }

    #[test]
    fn json_shape() {
        let json = to_json(&[LookupRecord::unresolved("42")]).unwrap();
        assert_eq!(json, r#"[{"id":"42","code":"42","name":""}]"#);
    }

    #[test]
    fn shared_demo_matches_fresh_demo() {
        assert_eq!(DEMO_POSTCODES.records(), PostcodeRegistry::demo().records());
    }

    #[test]
    fn demo_registry_resolves_kortrijk() {
        let found = PostcodeRegistry::demo().find("8500");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Kortrijk");
    }
}
