//! Boundary for the external categorization suggester. Suggestions are
//! advisory only: the core never requires one, and a failed or absent
//! suggestion must not block transaction entry.

use crate::domain::Category;

/// A suggested label with the suggester's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySuggestion {
    pub category: Category,
    pub confidence: f64,
}

/// Implemented by whatever service proposes categories from free text.
pub trait CategorySuggester {
    fn suggest(&self, description: &str, vendor: Option<&str>) -> Option<CategorySuggestion>;
}

/// Normalizes a suggestion for display: confidence clamped to [0, 1],
/// `None` passed through untouched.
pub fn advisory_suggestion(
    suggester: &dyn CategorySuggester,
    description: &str,
    vendor: Option<&str>,
) -> Option<CategorySuggestion> {
    let mut suggestion = suggester.suggest(description, vendor)?;
    suggestion.confidence = suggestion.confidence.clamp(0.0, 1.0);
    Some(suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<CategorySuggestion>);

    impl CategorySuggester for Fixed {
        fn suggest(&self, _description: &str, _vendor: Option<&str>) -> Option<CategorySuggestion> {
            self.0
        }
    }

    #[test]
    fn missing_suggestion_degrades_to_none() {
        assert!(advisory_suggestion(&Fixed(None), "Groceries", None).is_none());
    }

    #[test]
    fn confidence_is_clamped_to_unit_interval() {
        let suggester = Fixed(Some(CategorySuggestion {
            category: Category::Food,
            confidence: 1.7,
        }));
        let suggestion =
            advisory_suggestion(&suggester, "Groceries", Some("SuperMart")).expect("suggestion");
        assert_eq!(suggestion.confidence, 1.0);
        assert_eq!(suggestion.category, Category::Food);
    }
}
