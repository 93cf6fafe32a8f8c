pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Team names known to the server, in the order the server sent them.
///
/// Populated once after mount. An empty cache is a valid state: it is what a
/// failed load leaves behind, and it simply yields no suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamsCache {
    names: Vec<String>,
}

impl TeamsCache {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        suggest(query, &self.names, limit)
    }
}

/// Case-insensitive substring filter over `cache`.
///
/// Matches keep the cache's relative order and are cut off after `limit`.
/// An empty query yields nothing.
pub fn suggest<S: AsRef<str>>(query: &str, cache: &[S], limit: usize) -> Vec<String> {
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    cache
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(limit)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively_in_cache_order() {
        let cache = ["Ohio State", "Michigan", "Michigan State"];
        assert_eq!(
            suggest("mich", &cache, DEFAULT_SUGGESTION_LIMIT),
            vec!["Michigan".to_string(), "Michigan State".to_string()]
        );
    }

    #[test]
    fn empty_query_yields_nothing() {
        let cache = ["Ohio State", "Michigan"];
        assert!(suggest("", &cache, DEFAULT_SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn substring_anywhere_in_name() {
        let cache = ["Ohio State", "Michigan", "Michigan State", "Texas"];
        assert_eq!(
            suggest("STATE", &cache, DEFAULT_SUGGESTION_LIMIT),
            vec!["Ohio State".to_string(), "Michigan State".to_string()]
        );
    }

    #[test]
    fn truncates_without_reordering() {
        let cache = [
            "Army", "Arizona", "Arizona State", "Arkansas", "Arkansas State", "Auburn",
            "Marshall",
        ];
        let result = suggest("ar", &cache, DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(
            result,
            vec!["Army", "Arizona", "Arizona State", "Arkansas", "Arkansas State"]
        );
    }

    #[test]
    fn empty_cache_degrades_to_no_suggestions() {
        let cache = TeamsCache::default();
        assert!(cache.is_empty());
        assert!(cache.suggest("ohio", DEFAULT_SUGGESTION_LIMIT).is_empty());
    }
}
