use super::model::{OpportunityType, Query, RESERVED_PARAMS, TIME_PERIOD_ANY};
use super::params::{QueryString, parse_params};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCodec {
    page_size: u32,
    default_location: String,
}

impl Default for QueryCodec {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryCodec {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            default_location: String::new(),
        }
    }

    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    pub fn serialize(&self, query: &Query) -> String {
        let mut out = QueryString::default();

        if !query.keywords().is_empty() {
            out.push("q", query.keywords());
        }

        let start = u64::from(query.page_num()) * u64::from(self.page_size) + 1;
        out.push("num", &self.page_size.to_string());
        out.push("start", &start.to_string());

        for (name, value) in [
            ("vol_loc", query.location()),
            ("distance", query.distance()),
            ("type", query.opportunity_type().id()),
            ("sort", query.sort()),
            ("timeperiodstart", query.time_period_start()),
            ("timeperiodend", query.time_period_end()),
        ] {
            if !value.is_empty() {
                out.push(name, value);
            }
        }

        for (name, value) in query.filters() {
            if !name.is_empty() && !value.is_empty() && !RESERVED_PARAMS.contains(&name) {
                out.push(name, value);
            }
        }

        if !query.facet_counts() {
            out.push("facet", "false");
        }
        out.push("cache", if query.use_cache() { "1" } else { "0" });

        out.finish()
    }

    /// Never fails: anything that cannot be parsed keeps its default.
    pub fn deserialize(&self, fragment: &str) -> Query {
        let mut query = Query::default();
        query.set_location(self.default_location.as_str());

        let mut start = 1.0_f64;
        let mut per_page = f64::from(self.page_size);

        for (name, value) in parse_params(fragment) {
            match name.as_str() {
                "q" => query.set_keywords(value),
                "vol_loc" => query.set_location(value),
                "distance" => query.set_distance(value),
                "type" => query.set_opportunity_type(
                    OpportunityType::parse(&value)
                        .unwrap_or_else(|| OpportunityType::from_legacy_code(&value)),
                ),
                "sort" => query.set_sort(value),
                "timeperiodstart" => query.set_time_period_start(or_any(value)),
                "timeperiodend" => query.set_time_period_end(or_any(value)),
                "start" => {
                    if let Some(parsed) = parse_number(&value) {
                        start = parsed;
                    }
                }
                "num" => {
                    if let Some(parsed) = parse_number(&value) {
                        per_page = parsed;
                    }
                }
                "cache" => {
                    if let Some(parsed) = parse_number(&value) {
                        query.set_use_cache(parsed != 0.0);
                    }
                }
                "facet" => query.set_facet_counts(!matches!(value.as_str(), "false" | "0")),
                _ => {
                    query.set_filter(name, value);
                }
            }
        }

        query.set_page_num(page_from_start(start, per_page));
        query
    }

    /// Re-encodes `fragment` in canonical field order.
    pub fn canonicalize(&self, fragment: &str) -> String {
        self.serialize(&self.deserialize(fragment))
    }
}

fn or_any(value: String) -> String {
    if value.is_empty() {
        TIME_PERIOD_ANY.to_string()
    } else {
        value
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

fn page_from_start(start: f64, per_page: f64) -> u32 {
    let start = start.max(1.0);
    let per_page = per_page.max(1.0);
    let page = ((start - 1.0) / per_page).floor();
    if page >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        page as u32
    }
}
