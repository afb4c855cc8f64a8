//! Load-state tracking for views that fetch from a content source.

use std::fmt::Display;

/// Where a fetch stands, from a consumer's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The request finished with a value.
    Loaded(T),
    /// The request failed; holds the error message.
    Errored(String),
}

impl<T> LoadState<T> {
    /// Mark a request as started. Valid from any state.
    pub fn start(&mut self) {
        *self = LoadState::Loading;
    }

    /// Record a finished request. Only applies while loading; returns
    /// whether the state changed.
    pub fn finish<E: Display>(&mut self, result: std::result::Result<T, E>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Errored(e.to_string()),
        };
        true
    }

    /// Start, run `fetch`, and finish with its result.
    pub fn load<E: Display>(&mut self, fetch: impl FnOnce() -> std::result::Result<T, E>) {
        self.start();
        self.finish(fetch());
    }

    pub fn reset(&mut self) {
        *self = LoadState::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Errored(message) => Some(message),
            _ => None,
        }
    }
}
