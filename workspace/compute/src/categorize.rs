use model::entities::rule;
use tracing::{debug, trace};

/// A substring pattern mapped to a category.
pub trait KeywordRule {
    /// Text that must occur in the description, compared case-insensitively.
    fn pattern(&self) -> &str;
    /// Category assigned when the pattern matches.
    fn category_id(&self) -> i32;
}

impl KeywordRule for rule::Model {
    fn pattern(&self) -> &str {
        &self.contains_text
    }

    fn category_id(&self) -> i32 {
        self.category_id
    }
}

impl KeywordRule for (&str, i32) {
    fn pattern(&self) -> &str {
        self.0
    }

    fn category_id(&self) -> i32 {
        self.1
    }
}

/// Resolves the category of a new expense.
///
/// An explicit category always wins. Otherwise the rules are scanned in the given order
/// and the category of the first rule whose pattern occurs in `description` (both
/// lower-cased) is returned. Returns `None` when nothing matches.
pub fn categorize<R: KeywordRule>(
    description: &str,
    explicit_category_id: Option<i32>,
    rules: &[R],
) -> Option<i32> {
    if let Some(category_id) = explicit_category_id {
        trace!("Explicit category {} overrides rules", category_id);
        return Some(category_id);
    }

    match first_match(description, rules) {
        Some(rule) => {
            debug!(
                "Description '{}' matched rule '{}' -> category {}",
                description,
                rule.pattern(),
                rule.category_id()
            );
            Some(rule.category_id())
        }
        None => {
            debug!("No rule matched description '{}'", description);
            None
        }
    }
}

/// Returns the first rule, in scan order, whose pattern occurs in `description`.
pub fn first_match<'a, R: KeywordRule>(description: &str, rules: &'a [R]) -> Option<&'a R> {
    let haystack = description.to_lowercase();
    rules
        .iter()
        .find(|rule| haystack.contains(&rule.pattern().to_lowercase()))
}
