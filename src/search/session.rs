use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::history::Navigator;
use crate::load::{LoadNotifier, MAP};
use crate::query::{FragmentKind, Query, QueryCodec};

use super::cache::ResultCache;
use super::endpoint::{SearchEndpoint, SearchPage};
use super::engine::{SearchEngine, SearchEvent};
use super::paginate::{PageLinks, paginate};
use super::state::{SearchState, StateChange};
use super::transport::SearchTransport;

type MapHook = Rc<dyn Fn(&str)>;

/// Values read from the search form when the user submits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub keywords: String,
    pub location: String,
    pub distance: String,
    pub sort: String,
    pub time_period_start: String,
    pub time_period_end: String,
    /// Legacy numeric type code from the opportunity-type switch.
    pub type_code: Option<String>,
}

/// Drives searches from the navigation fragment.
///
/// Owns the last query, so UI actions clone it and apply one change instead
/// of reaching for shared global state.
pub struct SearchSession<N: Navigator> {
    navigator: N,
    codec: QueryCodec,
    endpoint: SearchEndpoint,
    engine: SearchEngine,
    state: SearchState,
    cache: ResultCache,
    notifier: Rc<LoadNotifier>,
    map_hook: Option<MapHook>,
    /// Latest location waiting for the map; at most one callback is queued.
    map_center: Rc<RefCell<Option<String>>>,
    referrer: Option<String>,
}

impl<N: Navigator> SearchSession<N> {
    pub fn new(
        config: &Config,
        navigator: N,
        transport: Arc<dyn SearchTransport>,
        notifier: Rc<LoadNotifier>,
    ) -> Self {
        let codec = QueryCodec::new(config.search.page_size)
            .with_default_location(config.search.default_location.as_str());
        Self {
            navigator,
            codec,
            endpoint: SearchEndpoint::from_config(&config.search),
            engine: SearchEngine::new(transport),
            state: SearchState::default(),
            cache: ResultCache::new(config.cache.max_entries),
            notifier,
            map_hook: None,
            map_center: Rc::new(RefCell::new(None)),
            referrer: None,
        }
    }

    pub fn with_page(mut self, page: SearchPage) -> Self {
        self.endpoint = self.endpoint.with_page(page);
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    /// Called with the searched location once the map is ready.
    pub fn set_map_hook(&mut self, hook: impl Fn(&str) + 'static) {
        self.map_hook = Some(Rc::new(hook));
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn codec(&self) -> &QueryCodec {
        &self.codec
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn last_query(&self) -> Option<&Query> {
        self.state.last_query()
    }

    /// Pushes `query` into history and searches for it. Returns false when the
    /// encoded query already is the current fragment.
    pub fn execute(&mut self, query: &Query) -> bool {
        let fragment = self.codec.serialize(query);
        if fragment.is_empty() || fragment == self.navigator.fragment() {
            return false;
        }
        self.navigator.push(&fragment);
        self.on_navigate();
        true
    }

    /// Re-reads the current fragment and starts a search for it. Call after
    /// any navigation the session did not initiate (back, forward, load).
    pub fn on_navigate(&mut self) -> u64 {
        let mut fragment = self.navigator.fragment();
        if FragmentKind::classify(&fragment).is_legacy() {
            let canonical = self.codec.canonicalize(&fragment);
            tracing::debug!(from = %fragment, to = %canonical, "rewriting legacy fragment");
            self.navigator.replace(&canonical);
            fragment = canonical;
        }

        let query = self.codec.deserialize(&fragment);
        let url = self
            .endpoint
            .request_url(&query, &self.codec, self.referrer.as_deref());

        if query.use_cache()
            && let Some(body) = self.cache.get(&url)
        {
            tracing::debug!(%url, "search served from cache");
            let generation = self.engine.cancel();
            self.state.begin(generation, query, url.clone());
            self.settle(SearchEvent::Completed {
                generation,
                url,
                body,
            });
            return generation;
        }

        let generation = self.engine.submit(url.clone());
        self.state.begin(generation, query, url);
        generation
    }

    /// Applies finished requests without blocking. Returns whether the
    /// visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        for event in self.engine.drain_events() {
            changed |= self.settle(event) != StateChange::Ignored;
        }
        changed
    }

    /// Waits until the current search settles.
    pub async fn wait(&mut self) -> AppResult<StateChange> {
        let mut last = StateChange::Ignored;
        while self.state.is_pending() {
            let Some(event) = self.engine.next_event().await else {
                return Err(AppError::unsupported("search engine stopped"));
            };
            let change = self.settle(event);
            if change != StateChange::Ignored {
                last = change;
            }
        }
        Ok(last)
    }

    pub fn submit_form(&mut self, form: FormInput) -> bool {
        let mut query = self.base_query();
        let location = if form.location.trim().is_empty() {
            self.codec.default_location().to_string()
        } else {
            form.location
        };

        query.set_keywords(form.keywords);
        query.set_location(location);
        query.set_distance(form.distance);
        if let Some(code) = form.type_code.as_deref() {
            query.set_type(code);
        }
        query.set_page_num(0);
        query.set_sort(form.sort);
        query.set_time_period_start(form.time_period_start);
        query.set_time_period_end(form.time_period_end);
        self.execute(&query)
    }

    pub fn go_to_page(&mut self, page: u32) -> bool {
        let mut query = self.base_query();
        query.set_page_num(page);
        self.execute(&query)
    }

    pub fn category_search(&mut self, category: &str) -> bool {
        if category.is_empty() {
            return false;
        }
        let mut query = self.base_query();
        query.set_keywords(format!("category:{category}"));
        self.execute(&query)
    }

    pub fn set_type(&mut self, code: &str) -> bool {
        let mut query = self.base_query();
        query.set_type(code);
        query.set_page_num(0);
        self.execute(&query)
    }

    pub fn set_filter(&mut self, name: &str, value: &str) -> bool {
        let mut query = self.base_query();
        if !query.set_filter(name, value) {
            return false;
        }
        self.execute(&query)
    }

    pub fn page_links(&self, total: u64, force_next: bool) -> Option<PageLinks> {
        let query = self.last_query()?;
        paginate(total, query.page_num(), self.codec.page_size(), force_next)
    }

    fn base_query(&self) -> Query {
        match self.state.last_query() {
            Some(query) => query.clone(),
            None => self.codec.deserialize(&self.navigator.fragment()),
        }
    }

    fn settle(&mut self, event: SearchEvent) -> StateChange {
        let cache_entry = match &event {
            SearchEvent::Completed { url, body, .. } => Some((url.clone(), body.clone())),
            SearchEvent::Failed { .. } => None,
        };

        let change = self.state.apply(event);
        if change != StateChange::Completed {
            return change;
        }

        let Some(query) = self.state.last_query() else {
            return change;
        };
        let location = query.location().to_string();
        if query.use_cache()
            && let Some((url, body)) = cache_entry
        {
            self.cache.insert(url, body);
        }

        if let Some(hook) = self.map_hook.clone() {
            self.center_map(hook, location);
        }
        change
    }

    fn center_map(&self, hook: MapHook, location: String) {
        let already_queued = self.map_center.borrow_mut().replace(location).is_some();
        if already_queued {
            return;
        }

        let slot = Rc::clone(&self.map_center);
        self.notifier.add_callback(MAP, move || {
            let location = slot.borrow_mut().take();
            if let Some(location) = location {
                hook(&location);
            }
        });
    }
}
