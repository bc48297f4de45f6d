use serde::{Deserialize, Deserializer};

// `?page=abc`, `?page=` and `?page=0` all fall back to the first page rather
// than failing the request. Numbers too large for u32 stay past the end.
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|page| *page >= 1)
        .map(|page| u32::try_from(page).unwrap_or(u32::MAX)))
}

// Absent, null and whitespace-only terms are all treated as missing
pub fn deserialize_search_term<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|term| !term.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct PageQuery {
        #[serde(default, deserialize_with = "deserialize_lenient_page")]
        page: Option<u32>,
    }

    #[derive(Deserialize)]
    struct SearchBody {
        #[serde(default, rename = "searchTerm", deserialize_with = "deserialize_search_term")]
        search_term: Option<String>,
    }

    fn page(query: &str) -> Option<u32> {
        serde_json::from_str::<PageQuery>(query).unwrap().page
    }

    #[test]
    fn page_parses_numbers_and_ignores_garbage() {
        assert_eq!(page(r#"{"page": "3"}"#), Some(3));
        assert_eq!(page(r#"{"page": "abc"}"#), None);
        assert_eq!(page(r#"{"page": "0"}"#), None);
        assert_eq!(page(r#"{"page": "-2"}"#), None);
        assert_eq!(page(r#"{}"#), None);
    }

    #[test]
    fn oversized_page_saturates() {
        assert_eq!(page(r#"{"page": "4294967296"}"#), Some(u32::MAX));
        assert_eq!(page(r#"{"page": "99999999999999"}"#), Some(u32::MAX));
    }

    #[test]
    fn blank_search_terms_are_missing() {
        let term = |body: &str| serde_json::from_str::<SearchBody>(body).unwrap().search_term;
        assert_eq!(term(r#"{"searchTerm": "boxer"}"#), Some("boxer".to_owned()));
        assert_eq!(term(r#"{"searchTerm": "   "}"#), None);
        assert_eq!(term(r#"{"searchTerm": null}"#), None);
        assert_eq!(term(r#"{}"#), None);
    }
}
