pub mod config;
pub mod error;
pub mod history;
pub mod load;
pub mod logging;
pub mod query;
pub mod search;
