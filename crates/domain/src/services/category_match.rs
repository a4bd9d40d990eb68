//! Category name matching.
//!
//! Provider listings are canonically filtered by category id, but clients
//! driven by display names still query with strings like "kirtankars"
//! against a stored "Kirtankar". Matching is pluralization-insensitive and
//! checks containment in both directions.

/// Normalizes a category name for comparison: lowercase, trimmed, with a
/// single trailing `s` stripped.
pub fn normalize(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    match lowered.strip_suffix('s') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => lowered,
    }
}

/// Whether a queried category name matches a stored one, tolerating
/// plural/singular mismatches on either side.
pub fn category_matches(query: &str, stored: &str) -> bool {
    let q = normalize(query);
    let s = normalize(stored);
    if q.is_empty() || s.is_empty() {
        return false;
    }
    q.contains(&s) || s.contains(&q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_plural_and_case() {
        assert_eq!(normalize("Kirtankars"), "kirtankar");
        assert_eq!(normalize("  Gayak "), "gayak");
        assert_eq!(normalize("s"), "s"); // never strip to empty
    }

    #[test]
    fn test_plural_query_matches_singular_stored() {
        assert!(category_matches("kirtankars", "Kirtankar"));
    }

    #[test]
    fn test_singular_query_matches_plural_stored() {
        assert!(category_matches("Kirtankar", "kirtankars"));
    }

    #[test]
    fn test_substring_match_both_directions() {
        assert!(category_matches("Gayak", "Gayak (Singer)"));
        assert!(category_matches("Gayak (Singer)", "gayak"));
    }

    #[test]
    fn test_unrelated_names_do_not_match() {
        assert!(!category_matches("Kirtankar", "Achari (Pooja)"));
        assert!(!category_matches("", "Kirtankar"));
    }
}
