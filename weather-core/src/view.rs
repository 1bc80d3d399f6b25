//! Orchestration of fetching, history and input for one weather view.
//!
//! Every fetch is stamped with a sequence number when it is started. Only the
//! outcome carrying the most recent number is applied; anything older arrives
//! after it has been superseded and is dropped. Fetch futures own everything
//! they need, so a caller may run several at once and feed their outcomes back
//! through [`WeatherView::apply`] in whatever order they complete.

use std::{future::Future, sync::Arc};

use crate::{
    CityQuery, FetchError, InputController, SearchHistory, SearchHistoryStore, ViewState,
    WeatherFetcher, WeatherSnapshot,
};

/// Handle for one started fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    city: CityQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn city(&self) -> &CityQuery {
        &self.city
    }
}

/// A finished fetch, ready to be applied.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<WeatherSnapshot, FetchError>,
}

#[derive(Debug)]
pub struct WeatherView {
    fetcher: Arc<dyn WeatherFetcher>,
    store: SearchHistoryStore,
    default_city: CityQuery,
    input: InputController,
    history: SearchHistory,
    state: ViewState,
    latest_seq: u64,
    location: Option<CityQuery>,
}

impl WeatherView {
    /// The view starts out `Loading`; call [`mount`](Self::mount) to settle it.
    pub fn new(
        fetcher: Arc<dyn WeatherFetcher>,
        store: SearchHistoryStore,
        default_city: CityQuery,
    ) -> Self {
        Self {
            fetcher,
            store,
            input: InputController::new(default_city.as_str()),
            default_city,
            history: SearchHistory::new(),
            state: ViewState::Loading,
            latest_seq: 0,
            location: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    /// City of the last successful fetch.
    pub fn location(&self) -> Option<&CityQuery> {
        self.location.as_ref()
    }

    /// Fetches the default city while loading persisted history.
    ///
    /// Both run as separate tasks joined here; the fetch outcome is applied
    /// only once the history is in place, so its success is recorded on top of
    /// what was persisted.
    pub async fn mount(&mut self) {
        let ticket = self.begin_fetch(self.default_city.clone());
        let fetch = self.fetch_future(ticket);
        let store = &self.store;

        let (outcome, history) = tokio::join!(fetch, async { store.load() });

        self.history = history;
        self.apply(outcome);
    }

    /// Enters `Loading` for `city` and supersedes any fetch still in flight.
    pub fn begin_fetch(&mut self, city: CityQuery) -> FetchTicket {
        self.latest_seq += 1;
        self.state = ViewState::Loading;
        FetchTicket { seq: self.latest_seq, city }
    }

    /// The network half of a fetch. Holds no borrow of the view.
    pub fn fetch_future(
        &self,
        ticket: FetchTicket,
    ) -> impl Future<Output = FetchOutcome> + Send + use<> {
        let fetcher = Arc::clone(&self.fetcher);
        async move {
            let result = fetcher.fetch(&ticket.city).await;
            FetchOutcome { ticket, result }
        }
    }

    /// Applies a finished fetch unless a newer one has been started since.
    /// Returns whether the outcome was applied.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let FetchOutcome { ticket, result } = outcome;

        if ticket.seq != self.latest_seq {
            tracing::debug!(
                city = %ticket.city,
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding superseded fetch result"
            );
            return false;
        }

        match result {
            Ok(snapshot) => {
                self.state = ViewState::Ready(snapshot);
                self.history = self.store.record(&ticket.city, &self.history);
                self.location = Some(ticket.city);
            }
            Err(err) => {
                tracing::debug!(city = %ticket.city, error = %err, "fetch failed");
                self.state = ViewState::Error(err.user_message());
            }
        }
        true
    }

    /// Starts, awaits and applies one fetch.
    pub async fn search(&mut self, city: CityQuery) -> &ViewState {
        let ticket = self.begin_fetch(city);
        let outcome = self.fetch_future(ticket).await;
        self.apply(outcome);
        &self.state
    }

    pub fn change_input(&mut self, text: &str) {
        self.input.on_change(text, &self.history);
    }

    pub fn focus_input(&mut self) {
        self.input.on_focus(&self.history);
    }

    pub fn blur_input(&mut self) {
        self.input.on_blur();
    }

    pub fn suggestions(&self) -> Vec<&str> {
        self.input.visible_suggestions(&self.history)
    }

    /// Submits the search box. `None` when it holds only whitespace.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        let city = self.input.on_submit()?;
        Some(self.begin_fetch(city))
    }

    /// Picks a history entry; this submits it as well.
    pub fn select_suggestion(&mut self, entry: &str) -> Option<FetchTicket> {
        let city = self.input.on_select(entry)?;
        Some(self.begin_fetch(city))
    }

    /// Text committed in one go by a line-oriented front end. Text naming a
    /// history entry counts as picking that entry; anything else is typed and
    /// submitted.
    pub fn enter(&mut self, text: &str) -> Option<FetchTicket> {
        self.change_input(text);
        let picked = self
            .history
            .suggestions(text.trim())
            .into_iter()
            .find(|entry| *entry == text.trim())
            .map(str::to_owned);

        match picked {
            Some(entry) => self.select_suggestion(&entry),
            None => self.submit(),
        }
    }
}
