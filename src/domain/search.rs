use crate::domain::business::BusinessSearchResult;

/// Lower-cases per character so the result does not depend on the
/// surrounding text (e.g. Greek final sigma).
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive substring query over businesses and their categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Builds a query from raw user input.
    ///
    /// Returns `None` for empty or whitespace-only input; such a search
    /// matches nothing and must not reach the store.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: fold_case(trimmed),
        })
    }

    fn contains(&self, haystack: &str) -> bool {
        fold_case(haystack).contains(&self.needle)
    }

    /// Matches business name, description, address, email, phone, category
    /// name and category slug.
    pub fn matches(&self, result: &BusinessSearchResult) -> bool {
        self.contains(&result.name)
            || self.contains(&result.description)
            || self.contains(&result.address)
            || result
                .email
                .as_ref()
                .is_some_and(|email| self.contains(email))
            || self.contains(&result.phone)
            || self.contains(&result.category.name)
            || self.contains(&result.category.slug)
    }
}
