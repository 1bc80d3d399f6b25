use cityweather_core::{InputController, SearchHistory};
use inquire::{
    CustomUserError,
    autocompletion::{Autocomplete, Replacement},
};

/// Offers recently searched cities while the user types.
///
/// Keystrokes drive an [`InputController`], so the list shown by the prompt
/// is exactly what the view would show.
#[derive(Debug, Clone)]
pub struct HistoryCompleter {
    history: SearchHistory,
    input: InputController,
}

impl HistoryCompleter {
    pub fn new(history: SearchHistory) -> Self {
        let mut input = InputController::new("");
        input.on_focus(&history);
        Self { history, input }
    }
}

impl Autocomplete for HistoryCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        if input != self.input.value() {
            self.input.on_change(input, &self.history);
        }
        Ok(self.input.visible_suggestions(&self.history).into_iter().map(String::from).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer() -> HistoryCompleter {
        HistoryCompleter::new(SearchHistory::from_entries(["Kandy", "Colombo", "kalutara"]))
    }

    #[test]
    fn empty_input_offers_whole_history() {
        let mut c = completer();
        assert_eq!(c.get_suggestions("").unwrap(), ["Kandy", "Colombo", "kalutara"]);
    }

    #[test]
    fn typing_filters_by_prefix() {
        let mut c = completer();
        assert_eq!(c.get_suggestions("KA").unwrap(), ["Kandy", "kalutara"]);
        assert!(c.get_suggestions("x").unwrap().is_empty());
    }

    #[test]
    fn completion_takes_highlighted_entry() {
        let mut c = completer();
        assert_eq!(c.get_completion("ka", Some("Kandy".into())).unwrap(), Some("Kandy".into()));
        assert_eq!(c.get_completion("ka", None).unwrap(), None);
    }
}
