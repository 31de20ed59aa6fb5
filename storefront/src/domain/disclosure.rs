//! Per-category open/closed flags for the menu accordion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category name → open flag. Absent names are closed.
///
/// # Examples
/// ```
/// use storefront::domain::Disclosure;
///
/// let mut disclosure = Disclosure::default();
/// assert!(!disclosure.is_open("Pasta"));
/// disclosure.toggle("Pasta");
/// assert!(disclosure.is_open("Pasta"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disclosure {
    flags: BTreeMap<String, bool>,
}

impl Disclosure {
    /// Flip the category's flag; the first toggle opens it.
    pub fn toggle(&mut self, category: &str) -> bool {
        let flag = self.flags.entry(category.to_owned()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Whether the category is expanded; unknown names are closed.
    #[must_use]
    pub fn is_open(&self, category: &str) -> bool {
        self.flags.get(category).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Pasta")]
    #[case("")]
    #[case("Deserti i kolači")]
    fn double_toggle_restores_closed_state(#[case] name: &str) {
        let mut disclosure = Disclosure::default();
        assert!(disclosure.toggle(name));
        assert!(!disclosure.toggle(name));
        assert!(!disclosure.is_open(name));
    }

    #[test]
    fn flags_are_independent() {
        let mut disclosure = Disclosure::default();
        disclosure.toggle("Pasta");
        disclosure.toggle("Pizza");
        disclosure.toggle("Salads");
        disclosure.toggle("Pizza");

        assert!(disclosure.is_open("Pasta"));
        assert!(!disclosure.is_open("Pizza"));
        assert!(disclosure.is_open("Salads"));
    }
}
