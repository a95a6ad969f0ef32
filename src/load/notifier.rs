use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use super::queue::WorkQueue;

#[derive(Debug, Default)]
struct LoadSlot {
    fired: bool,
    pending: WorkQueue,
}

enum Registration {
    Unknown,
    RunNow,
}

/// Registry of named one-shot load events.
///
/// Not `Sync`: it is meant to be shared with `Rc` on the thread that drives
/// the UI. Callbacks may re-enter the notifier while it is flushing.
pub struct LoadNotifier {
    events: RefCell<HashMap<String, LoadSlot>>,
}

impl LoadNotifier {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let events = names
            .into_iter()
            .map(|name| (name.into(), LoadSlot::default()))
            .collect();
        Self {
            events: RefCell::new(events),
        }
    }

    pub fn add_callback(&self, name: &str, callback: impl FnOnce() + 'static) {
        let registration = {
            let mut events = self.events.borrow_mut();
            match events.get_mut(name) {
                None => Registration::Unknown,
                Some(slot) if slot.fired => Registration::RunNow,
                Some(slot) => {
                    slot.pending.add_callback(callback);
                    return;
                }
            }
        };

        match registration {
            Registration::Unknown => {
                tracing::trace!(event = name, "ignoring callback for unknown load event");
            }
            Registration::RunNow => callback(),
        }
    }

    pub fn done_loading(&self, name: &str) {
        let callbacks = {
            let mut events = self.events.borrow_mut();
            let Some(slot) = events.get_mut(name) else {
                tracing::trace!(event = name, "ignoring completion of unknown load event");
                return;
            };
            if slot.fired {
                return;
            }
            slot.fired = true;
            slot.pending.take()
        };

        tracing::debug!(
            event = name,
            callbacks = callbacks.len(),
            "load event fired"
        );
        for callback in callbacks {
            callback();
        }
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.events
            .borrow()
            .get(name)
            .is_some_and(|slot| slot.fired)
    }

    pub fn pending_count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .get(name)
            .map_or(0, |slot| slot.pending.len())
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.events.borrow().contains_key(name)
    }
}

impl fmt::Debug for LoadNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events = self.events.borrow();
        let mut names: Vec<_> = events.keys().collect();
        names.sort();
        f.debug_struct("LoadNotifier")
            .field("events", &names)
            .finish()
    }
}
