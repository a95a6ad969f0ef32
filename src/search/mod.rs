//! Search flow: request URLs, the single-flight engine, and the session that
//! ties navigation to it.

pub mod cache;
pub mod endpoint;
pub mod engine;
pub mod paginate;
pub mod session;
pub mod state;
pub mod transport;

#[cfg(test)]
mod tests;

pub use cache::ResultCache;
pub use endpoint::{SearchEndpoint, SearchPage};
pub use engine::{SearchEngine, SearchEvent};
pub use paginate::{PageLinks, paginate};
pub use session::{FormInput, SearchSession};
pub use state::{SearchPhase, SearchState, StateChange};
pub use transport::{HttpTransport, SearchTransport};
