use crate::query::Query;

use super::engine::SearchEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Pending {
        generation: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Ignored,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    phase: SearchPhase,
    generation: u64,
    last_query: Option<Query>,
    last_url: Option<String>,
    last_body: Option<String>,
    last_error: Option<String>,
    completed: u64,
}

impl SearchState {
    pub fn begin(&mut self, generation: u64, query: Query, url: String) {
        self.phase = SearchPhase::Pending { generation };
        self.generation = generation;
        self.last_query = Some(query);
        self.last_url = Some(url);
    }

    /// Folds a worker event into the state; events from superseded
    /// generations are dropped.
    pub fn apply(&mut self, event: SearchEvent) -> StateChange {
        if event.generation() != self.generation || !self.is_pending() {
            tracing::trace!(
                generation = event.generation(),
                current = self.generation,
                "dropping stale search event"
            );
            return StateChange::Ignored;
        }

        self.phase = SearchPhase::Idle;
        match event {
            SearchEvent::Completed { body, .. } => {
                tracing::info!(generation = self.generation, bytes = body.len(), "search complete");
                self.last_body = Some(body);
                self.last_error = None;
                self.completed += 1;
                StateChange::Completed
            }
            SearchEvent::Failed { message, .. } => {
                tracing::warn!(generation = self.generation, %message, "search failed");
                self.last_error = Some(message);
                StateChange::Failed
            }
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, SearchPhase::Pending { .. })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_query(&self) -> Option<&Query> {
        self.last_query.as_ref()
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    pub fn last_body(&self) -> Option<&str> {
        self.last_body.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchPhase, SearchState, StateChange};
    use crate::query::Query;
    use crate::search::SearchEvent;

    fn completed(generation: u64, body: &str) -> SearchEvent {
        SearchEvent::Completed {
            generation,
            url: format!("/ui_snippets?g={generation}"),
            body: body.to_string(),
        }
    }

    #[test]
    fn begin_then_complete_returns_to_idle() {
        let mut state = SearchState::default();
        state.begin(1, Query::new("a", ""), "/u".to_string());
        assert_eq!(state.phase(), SearchPhase::Pending { generation: 1 });

        assert_eq!(state.apply(completed(1, "first")), StateChange::Completed);
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert_eq!(state.last_body(), Some("first"));
        assert_eq!(state.completed(), 1);
    }

    #[test]
    fn late_response_from_older_search_is_ignored() {
        let mut state = SearchState::default();
        state.begin(1, Query::new("first", ""), "/1".to_string());
        state.begin(2, Query::new("second", ""), "/2".to_string());

        assert_eq!(state.apply(completed(2, "second")), StateChange::Completed);
        assert_eq!(state.apply(completed(1, "first")), StateChange::Ignored);

        assert_eq!(state.last_body(), Some("second"));
        assert_eq!(state.last_query().map(Query::keywords), Some("second"));
    }

    #[test]
    fn older_response_arriving_first_does_not_settle_newer_search() {
        let mut state = SearchState::default();
        state.begin(1, Query::new("first", ""), "/1".to_string());
        state.begin(2, Query::new("second", ""), "/2".to_string());

        assert_eq!(state.apply(completed(1, "first")), StateChange::Ignored);
        assert!(state.is_pending());
        assert_eq!(state.last_body(), None);
    }

    #[test]
    fn failure_records_message_and_keeps_previous_body() {
        let mut state = SearchState::default();
        state.begin(1, Query::default(), "/1".to_string());
        state.apply(completed(1, "ok"));
        state.begin(2, Query::default(), "/2".to_string());

        let change = state.apply(SearchEvent::Failed {
            generation: 2,
            message: "HTTP 502".to_string(),
        });
        assert_eq!(change, StateChange::Failed);
        assert_eq!(state.last_error(), Some("HTTP 502"));
        assert_eq!(state.last_body(), Some("ok"));
        assert!(!state.is_pending());
    }
}
