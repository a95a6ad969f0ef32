//! One-shot load events with late-registration support.
//!
//! A callback registered for an event that already fired runs immediately;
//! otherwise it waits in a [`WorkQueue`] until [`LoadNotifier::done_loading`].

mod notifier;
mod queue;

pub use notifier::LoadNotifier;
pub use queue::{Callback, WorkQueue};

/// Fired once the page body (or host application) finished loading.
pub const BODY_LOAD: &str = "bodyload";
/// Fired once the map widget is ready to be re-centered.
pub const MAP: &str = "map";
