//! Dashboard listing query: the `page`, `genre` and `q` URL parameters.
//!
//! The router decodes the URL; this type only normalises the values it hands
//! over and derives the next query for each dashboard control.

/// Genre value meaning "no filter".
pub const ALL_GENRES: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingQuery {
    pub page: u32,
    pub genre: Option<String>,
    /// Free text matched against title and author.
    pub search: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            genre: None,
            search: None,
        }
    }
}

impl ListingQuery {
    /// Build from raw parameter values. Invalid pages become 1, `all` means no filter.
    pub fn new(page: u32, genre: &str, search: &str) -> Self {
        Self {
            page: page.max(1),
            genre: normalize_genre(genre),
            search: normalize_search(search),
        }
    }

    /// Switch genre; always goes back to the first page.
    pub fn with_genre(&self, genre: &str) -> Self {
        Self {
            page: 1,
            genre: normalize_genre(genre),
            search: self.search.clone(),
        }
    }

    /// New search text; always goes back to the first page.
    pub fn with_search(&self, search: &str) -> Self {
        Self {
            page: 1,
            genre: self.genre.clone(),
            search: normalize_search(search),
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Genre value for the select control.
    pub fn genre_or_all(&self) -> &str {
        self.genre.as_deref().unwrap_or(ALL_GENRES)
    }

    /// Search text for the input, empty when there is none.
    pub fn search_text(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

fn normalize_genre(genre: &str) -> Option<String> {
    let genre = genre.trim();
    if genre.is_empty() || genre == ALL_GENRES {
        None
    } else {
        Some(genre.to_string())
    }
}

fn normalize_search(search: &str) -> Option<String> {
    let search = search.split_whitespace().collect::<Vec<_>>().join(" ");
    if search.is_empty() {
        None
    } else {
        Some(search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_change_resets_page() {
        let query = ListingQuery::new(4, "Poetry", "");
        let next = query.with_genre("History");
        assert_eq!(next.page, 1);
        assert_eq!(next.genre.as_deref(), Some("History"));

        let all = next.with_page(3).with_genre(ALL_GENRES);
        assert_eq!(all, ListingQuery::default());
    }

    #[test]
    fn test_page_change_keeps_filters() {
        let query = ListingQuery::new(1, "Poetry", "keats").with_page(5);
        assert_eq!(query, ListingQuery::new(5, "Poetry", "keats"));
    }

    #[test]
    fn test_search_resets_page_and_keeps_genre() {
        let query = ListingQuery::new(3, "History", "");
        let next = query.with_search("  rome   empire ");
        assert_eq!(next.page, 1);
        assert_eq!(next.genre.as_deref(), Some("History"));
        assert_eq!(next.search_text(), "rome empire");

        assert_eq!(next.with_search("   ").search, None);
    }

    #[test]
    fn test_raw_values_are_normalised() {
        assert_eq!(ListingQuery::new(0, "all", ""), ListingQuery::default());
        assert_eq!(ListingQuery::new(0, "  ", " ").page, 1);
        assert_eq!(ListingQuery::new(2, " Poetry ", "").genre_or_all(), "Poetry");
    }
}
