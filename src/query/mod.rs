//! Search filter state and its URL-fragment encoding.

mod codec;
mod fragment;
mod model;
mod params;

pub use codec::{DEFAULT_PAGE_SIZE, QueryCodec};
pub use fragment::FragmentKind;
pub use model::{OpportunityType, Query, RESERVED_PARAMS, TIME_PERIOD_ANY};
pub use params::parse_params;
