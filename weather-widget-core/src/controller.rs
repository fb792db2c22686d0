use crate::{
    ErrorKind, FetchError, HistoryStore, StringStore, TemperatureUnit, WeatherClient,
    WeatherReading,
};

/// Current display state. When `Loaded`, the held reading always comes
/// from the most recent successful fetch, never a failed one.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading { city: String },
    Loaded(WeatherReading),
    Failed { kind: ErrorKind, message: String },
}

/// Snapshot handed to a render sink. The controller never depends on
/// what the renderer does with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub state: ViewState,
    pub unit: TemperatureUnit,
    pub history: Vec<String>,
    /// Input retained after a failed search so the user can correct it.
    /// Cleared on success.
    pub retained_input: Option<String>,
}

/// Presentation seam. Implementations turn a [`ViewModel`] into visible
/// output; the core never inspects the result.
pub trait RenderSink {
    fn render(&mut self, view: &ViewModel);
}

/// Tag for one issued fetch. A completion whose ticket is no longer the
/// latest issued is discarded on arrival, so a stale response can never
/// overwrite the state of a newer search.
#[derive(Debug)]
pub struct SearchTicket {
    city: String,
    seq: u64,
}

impl SearchTicket {
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Orchestrates validation, fetching, history updates and rendering.
///
/// Owns the session's unit preference and view state; all transitions
/// go through methods here, and every transition that changes what the
/// user should see ends in a render.
pub struct WeatherController<S: StringStore> {
    client: Box<dyn WeatherClient>,
    history: HistoryStore<S>,
    renderer: Box<dyn RenderSink>,
    unit: TemperatureUnit,
    state: ViewState,
    retained_input: Option<String>,
    issued: u64,
}

impl<S: StringStore> WeatherController<S> {
    pub fn new(
        client: Box<dyn WeatherClient>,
        history: HistoryStore<S>,
        renderer: Box<dyn RenderSink>,
    ) -> Self {
        Self {
            client,
            history,
            renderer,
            unit: TemperatureUnit::default(),
            state: ViewState::Idle,
            retained_input: None,
            issued: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    pub fn view(&self) -> ViewModel {
        ViewModel {
            state: self.state.clone(),
            unit: self.unit,
            history: self.history.entries().to_vec(),
            retained_input: self.retained_input.clone(),
        }
    }

    /// Repaints the current state, e.g. at session start.
    pub fn render_now(&mut self) {
        self.render();
    }

    fn render(&mut self) {
        let view = self.view();
        self.renderer.render(&view);
    }

    /// Full search cycle: validate, fetch, apply. Clicking a history
    /// entry is the same operation with the entry as input.
    pub async fn search(&mut self, raw: &str) {
        let Some(ticket) = self.begin_search(raw) else {
            return;
        };
        let result = self.client.fetch_weather(ticket.city()).await;
        self.complete_search(ticket, result);
    }

    /// Validates the input and moves to `Loading`, issuing a tagged
    /// ticket for the fetch. Blank input produces a validation failure
    /// and no ticket; no network call may be made in that case.
    pub fn begin_search(&mut self, raw: &str) -> Option<SearchTicket> {
        let city = raw.trim();
        if city.is_empty() {
            self.state = ViewState::Failed {
                kind: ErrorKind::Validation,
                message: "Please enter a city name".to_string(),
            };
            self.render();
            return None;
        }

        self.issued += 1;
        self.retained_input = Some(city.to_string());
        self.state = ViewState::Loading {
            city: city.to_string(),
        };
        tracing::debug!(city, seq = self.issued, "search issued");
        self.render();

        Some(SearchTicket {
            city: city.to_string(),
            seq: self.issued,
        })
    }

    /// Applies a fetch result, unless a newer search was issued while
    /// this one was in flight — then the result is dropped unseen.
    ///
    /// Success records the canonical provider name in history and clears
    /// the retained input. Failure leaves history and input untouched.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<WeatherReading, FetchError>,
    ) {
        if ticket.seq != self.issued {
            tracing::debug!(
                city = %ticket.city,
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale completion"
            );
            return;
        }

        match result {
            Ok(reading) => {
                self.history.add(&reading.city_name);
                self.retained_input = None;
                self.state = ViewState::Loaded(reading);
            }
            Err(err) => {
                self.state = ViewState::Failed {
                    kind: err.kind(),
                    message: err.to_string(),
                };
            }
        }
        self.render();
    }

    /// Flips the display unit. When a reading is on screen it is
    /// re-rendered in the new unit from the held Celsius values; this
    /// never refetches.
    pub fn toggle_unit(&mut self) {
        self.set_unit(self.unit.toggled());
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        if self.unit == unit {
            return;
        }
        self.unit = unit;
        if matches!(self.state, ViewState::Loaded(_)) {
            self.render();
        }
    }

    /// Removes one history entry. The current view state is untouched;
    /// only the history list changes.
    pub fn remove_history_entry(&mut self, city: &str) {
        self.history.remove(city);
        self.render();
    }

    /// Empties the history. The current view state is untouched.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.render();
    }
}
