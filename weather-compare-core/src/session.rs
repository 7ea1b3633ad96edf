//! Session state and the user actions that drive it.
//!
//! A lookup is split into `begin_*` (issue a ticket), the adapter call, and
//! [`SessionController::apply`]. Only the most recently issued ticket may
//! write state, so a slow response can never overwrite a newer one. The
//! async [`SessionController::search`] and [`SessionController::compare`]
//! helpers run all three steps in order.

use tracing::{debug, info, warn};

use crate::{
    favorites::FavoritesStore,
    lookup::WeatherLookup,
    model::{Slot, ViewMode, WeatherRecord},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Search,
    Compare,
}

/// An issued lookup waiting for its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub id: u64,
    pub kind: LookupKind,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub input: String,
    pub view: ViewMode,
    pub next_slot: Slot,
    pub favorites: Vec<String>,
}

#[derive(Debug)]
pub struct SessionController<L, S> {
    lookup: L,
    store: S,
    state: SessionState,
    last_issued: u64,
}

impl<L: WeatherLookup, S: FavoritesStore> SessionController<L, S> {
    /// Start a session, loading favorites once from `store`.
    pub fn new(lookup: L, store: S) -> Self {
        let favorites = store.load();
        Self {
            lookup,
            store,
            state: SessionState { favorites, ..SessionState::default() },
            last_issued: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> &ViewMode {
        &self.state.view
    }

    pub fn favorites(&self) -> &[String] {
        &self.state.favorites
    }

    pub fn next_slot(&self) -> Slot {
        self.state.next_slot
    }

    pub fn input(&self) -> &str {
        &self.state.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    /// Copy a favorite into the input text.
    pub fn select_favorite(&mut self, name: &str) {
        self.state.input = name.to_string();
    }

    pub fn begin_search(&mut self, city: &str) -> Option<LookupTicket> {
        self.issue(LookupKind::Search, city)
    }

    pub fn begin_compare(&mut self, city: &str) -> Option<LookupTicket> {
        self.issue(LookupKind::Compare, city)
    }

    fn issue(&mut self, kind: LookupKind, city: &str) -> Option<LookupTicket> {
        if is_blank(city) {
            return None;
        }
        self.last_issued += 1;
        Some(LookupTicket { id: self.last_issued, kind, city: city.to_string() })
    }

    /// Write a lookup result into state. Returns `false` when the ticket is
    /// stale and the record was discarded.
    pub fn apply(&mut self, ticket: &LookupTicket, record: WeatherRecord) -> bool {
        if ticket.id != self.last_issued {
            debug!(
                ticket = ticket.id,
                latest = self.last_issued,
                city = %ticket.city,
                "Discarding stale lookup result"
            );
            return false;
        }

        match ticket.kind {
            LookupKind::Search => {
                self.state.view = ViewMode::Single(record);
                self.state.next_slot = Slot::Left;
            }
            LookupKind::Compare => {
                let slot = self.state.next_slot;
                let (mut left, mut right) = match std::mem::take(&mut self.state.view) {
                    ViewMode::Comparing { left, right } => (left, right),
                    ViewMode::Idle | ViewMode::Single(_) => (None, None),
                };
                match slot {
                    Slot::Left => left = Some(record),
                    Slot::Right => right = Some(record),
                }
                self.state.view = ViewMode::Comparing { left, right };
                self.state.next_slot = slot.flip();
            }
        }
        true
    }

    /// Look up `city` and show it as the single result, clearing any comparison.
    pub async fn search(&mut self, city: &str) {
        let Some(ticket) = self.begin_search(city) else {
            return;
        };
        let record = self.lookup.resolve_weather(&ticket.city).await;
        self.apply(&ticket, record);
    }

    /// Look up `city` into the next comparison slot, then flip the slot.
    pub async fn compare(&mut self, city: &str) {
        let Some(ticket) = self.begin_compare(city) else {
            return;
        };
        let record = self.lookup.resolve_weather(&ticket.city).await;
        self.apply(&ticket, record);
    }

    pub async fn search_input(&mut self) {
        let city = self.state.input.clone();
        self.search(&city).await;
    }

    pub async fn compare_input(&mut self) {
        let city = self.state.input.clone();
        self.compare(&city).await;
    }

    pub fn save_input(&mut self) {
        let city = self.state.input.clone();
        self.save_favorite(&city);
    }

    /// Append `city` to favorites unless blank or already present.
    pub fn save_favorite(&mut self, city: &str) {
        if is_blank(city) || self.state.favorites.iter().any(|f| f == city) {
            return;
        }
        self.state.favorites.push(city.to_string());
        info!(city, "Saved favorite");
        self.persist();
    }

    /// Drop every favorite equal to `city`.
    pub fn remove_favorite(&mut self, city: &str) {
        let before = self.state.favorites.len();
        self.state.favorites.retain(|f| f != city);
        if self.state.favorites.len() == before {
            return;
        }
        info!(city, "Removed favorite");
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.state.favorites) {
            warn!(error = %format!("{err:#}"), "Failed to persist favorites");
        }
    }
}

fn is_blank(city: &str) -> bool {
    city.trim().is_empty()
}
