//! Search box state: the typed text and whether history suggestions are shown.
//!
//! All transitions are pure. Submission is returned to the caller as a
//! [`CityQuery`] rather than performed here.
//!
//! A suggestion pick is committed by [`InputController::on_select`] as soon as
//! it happens, so a blur arriving right after it only hides an already hidden
//! list. No grace delay is needed between the two.

use crate::{CityQuery, SearchHistory};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputController {
    value: String,
    suggestions_visible: bool,
}

impl InputController {
    pub fn new(initial: &str) -> Self {
        Self { value: initial.to_string(), suggestions_visible: false }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn on_change(&mut self, text: &str, history: &SearchHistory) {
        self.value = text.to_string();
        self.suggestions_visible = !history.suggestions(text).is_empty();
    }

    pub fn on_focus(&mut self, history: &SearchHistory) {
        self.suggestions_visible = !history.is_empty();
    }

    pub fn on_blur(&mut self) {
        self.suggestions_visible = false;
    }

    /// Picking a suggestion fills the box and submits it straight away.
    pub fn on_select(&mut self, entry: &str) -> Option<CityQuery> {
        self.value = entry.to_string();
        self.suggestions_visible = false;
        CityQuery::new(entry)
    }

    /// Blank input is ignored; anything else is submitted trimmed.
    pub fn on_submit(&mut self) -> Option<CityQuery> {
        let city = CityQuery::new(&self.value)?;
        self.suggestions_visible = false;
        Some(city)
    }

    /// Suggestions to display right now; empty while hidden.
    pub fn visible_suggestions<'h>(&self, history: &'h SearchHistory) -> Vec<&'h str> {
        if !self.suggestions_visible {
            return Vec::new();
        }
        history.suggestions(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> SearchHistory {
        SearchHistory::from_entries(["Kandy", "Colombo", "Kalutara"])
    }

    #[test]
    fn starts_with_initial_value_and_hidden_list() {
        let input = InputController::new("Colombo");
        assert_eq!(input.value(), "Colombo");
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn change_shows_list_only_when_something_matches() {
        let h = history();
        let mut input = InputController::new("");

        input.on_change("ka", &h);
        assert!(input.suggestions_visible());
        assert_eq!(input.visible_suggestions(&h), ["Kandy", "Kalutara"]);

        input.on_change("zz", &h);
        assert!(!input.suggestions_visible());
        assert!(input.visible_suggestions(&h).is_empty());
    }

    #[test]
    fn focus_shows_list_iff_history_non_empty() {
        let mut input = InputController::new("");

        input.on_focus(&SearchHistory::new());
        assert!(!input.suggestions_visible());

        input.on_focus(&history());
        assert!(input.suggestions_visible());
    }

    #[test]
    fn empty_value_suggests_full_history() {
        let h = history();
        let mut input = InputController::new("");
        input.on_focus(&h);

        assert_eq!(input.visible_suggestions(&h), ["Kandy", "Colombo", "Kalutara"]);
    }

    #[test]
    fn blur_hides_list() {
        let h = history();
        let mut input = InputController::new("");
        input.on_focus(&h);

        input.on_blur();
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn select_fills_value_hides_and_submits() {
        let h = history();
        let mut input = InputController::new("");
        input.on_change("co", &h);

        let submitted = input.on_select("Colombo");
        input.on_blur();

        assert_eq!(submitted, CityQuery::new("Colombo"));
        assert_eq!(input.value(), "Colombo");
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn submit_trims_and_hides() {
        let h = history();
        let mut input = InputController::new("");
        input.on_change("  Kandy  ", &h);
        input.on_focus(&h);

        assert_eq!(input.on_submit().map(|c| c.to_string()), Some("Kandy".into()));
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let h = history();
        let mut input = InputController::new("");
        input.on_change("   ", &h);
        input.on_focus(&h);

        assert_eq!(input.on_submit(), None);
        assert!(input.suggestions_visible());
        assert_eq!(input.value(), "   ");
    }
}
