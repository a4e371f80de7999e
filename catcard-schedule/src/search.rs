//! Token-prefix location search.
//!
//! Both the query and the location's alias set are normalized to lowercase
//! ASCII-ish tokens (diacritics folded, punctuation stripped). A location
//! matches a multi-word query iff every query token is a prefix of at least
//! one alias token.

use crate::location::Location;

/// Folds common Latin diacritics to their base letter.
fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Normalizes text into lowercase tokens with punctuation stripped.
pub fn normalize_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(fold_char)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

/// All normalized alias tokens for a location: its name's words plus its
/// configured synonyms.
fn alias_tokens(location: &Location) -> Vec<String> {
    let mut tokens = normalize_tokens(&location.name);
    for alias in &location.aliases {
        tokens.extend(normalize_tokens(alias));
    }
    tokens
}

/// True when every query token is a prefix of at least one alias token.
///
/// An empty query matches everything.
pub fn location_matches(location: &Location, query: &str) -> bool {
    let query_tokens = normalize_tokens(query);
    let aliases = alias_tokens(location);
    query_tokens
        .iter()
        .all(|q| aliases.iter().any(|alias| alias.starts_with(q.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationClass;

    fn marketplace() -> Location {
        Location {
            id: "marketplace".to_string(),
            name: "Marché Café".to_string(),
            class: LocationClass::Retail,
            aliases: vec!["marketplace".to_string(), "davis center".to_string()],
        }
    }

    #[test]
    fn test_normalize_strips_punctuation_and_diacritics() {
        assert_eq!(normalize_tokens("Marché Café!"), vec!["marche", "cafe"]);
        assert_eq!(normalize_tokens("Brennan's"), vec!["brennan", "s"]);
    }

    #[test]
    fn test_prefix_match() {
        let location = marketplace();
        assert!(location_matches(&location, "march"));
        assert!(location_matches(&location, "cafe"));
        assert!(location_matches(&location, "market"));
        assert!(!location_matches(&location, "harris"));
    }

    #[test]
    fn test_multi_word_query_requires_all_tokens() {
        let location = marketplace();
        assert!(location_matches(&location, "davis cent"));
        assert!(location_matches(&location, "marche cafe"));
        assert!(!location_matches(&location, "davis hall"));
    }

    #[test]
    fn test_empty_query_matches() {
        assert!(location_matches(&marketplace(), ""));
    }

    #[test]
    fn test_query_diacritics_folded() {
        assert!(location_matches(&marketplace(), "marché"));
    }
}
