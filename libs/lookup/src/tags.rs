//! Tag filters built from `key:value` strings.

use std::collections::BTreeMap;

/// Prefix EC2 expects on tag filter names.
const TAG_FILTER_PREFIX: &str = "tag:";

/// Tag key to value constraints narrowing an image lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilters(BTreeMap<String, String>);

impl TagFilters {
    /// Build filters from `key:value` entries.
    ///
    /// Entries without exactly one colon are dropped without notice.
    pub fn from_specs<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filters = BTreeMap::new();
        for spec in specs {
            let mut parts = spec.as_ref().split(':');
            if let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) {
                filters.insert(key.to_string(), value.to_string());
            }
        }
        Self(filters)
    }

    /// Number of filter entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value required for a tag key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate over (provider filter name, value) pairs, e.g. `("tag:Role", "web")`.
    pub fn filter_pairs(&self) -> impl Iterator<Item = (String, &str)> {
        self.0
            .iter()
            .map(|(k, v)| (format!("{TAG_FILTER_PREFIX}{k}"), v.as_str()))
    }

    /// Returns true if every filter entry is present in `tags`.
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        self.0.iter().all(|(k, v)| tags.get(k) == Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("Role:web", Some(("Role", "web")))]
    #[case("Role:", Some(("Role", "")))]
    #[case(":web", Some(("", "web")))]
    #[case("Role", None)]
    #[case("Role:web:extra", None)]
    #[case("", None)]
    fn test_single_entry(#[case] spec: &str, #[case] expected: Option<(&str, &str)>) {
        let filters = TagFilters::from_specs([spec]);
        match expected {
            Some((key, value)) => {
                assert_eq!(filters.len(), 1);
                assert_eq!(filters.get(key), Some(value));
            }
            None => assert!(filters.is_empty()),
        }
    }

    #[test]
    fn test_filter_pairs_are_prefixed() {
        let filters = TagFilters::from_specs(["Role:web", "Env:prod"]);
        let pairs: Vec<_> = filters.filter_pairs().collect();

        assert_eq!(
            pairs,
            vec![
                ("tag:Env".to_string(), "prod"),
                ("tag:Role".to_string(), "web"),
            ]
        );
    }

    #[test]
    fn test_later_entry_wins_for_same_key() {
        let filters = TagFilters::from_specs(["Role:web", "Role:db"]);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("Role"), Some("db"));
    }

    #[test]
    fn test_matches() {
        let filters = TagFilters::from_specs(["Role:web"]);
        let mut tags = BTreeMap::new();
        assert!(!filters.matches(&tags));

        tags.insert("Role".to_string(), "web".to_string());
        tags.insert("Env".to_string(), "prod".to_string());
        assert!(filters.matches(&tags));
        assert!(TagFilters::default().matches(&BTreeMap::new()));
    }

    proptest! {
        #[test]
        fn prop_only_single_colon_entries_survive(
            specs in proptest::collection::vec("[a-z:]{0,8}", 0..16)
        ) {
            let filters = TagFilters::from_specs(&specs);

            let mut expected = BTreeMap::new();
            for spec in &specs {
                if spec.matches(':').count() == 1 {
                    let (k, v) = spec.split_once(':').unwrap();
                    expected.insert(k.to_string(), v.to_string());
                }
            }

            prop_assert_eq!(filters.len(), expected.len());
            for (k, v) in &expected {
                prop_assert_eq!(filters.get(k), Some(v.as_str()));
            }
        }
    }
}
