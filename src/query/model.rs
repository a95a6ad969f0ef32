use std::collections::BTreeMap;

use serde::Serialize;

/// Sentinel for an open-ended time range endpoint.
pub const TIME_PERIOD_ANY: &str = "everything";

/// Parameter names with a dedicated field; everything else is a filter.
pub const RESERVED_PARAMS: &[&str] = &[
    "q",
    "num",
    "start",
    "vol_loc",
    "distance",
    "type",
    "sort",
    "timeperiodstart",
    "timeperiodend",
    "facet",
    "cache",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    #[default]
    All,
    Virtual,
    SelfDirected,
    Micro,
}

impl OpportunityType {
    pub fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Virtual => "virtual",
            Self::SelfDirected => "self_directed",
            Self::Micro => "micro",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "virtual" => Some(Self::Virtual),
            "self_directed" => Some(Self::SelfDirected),
            "micro" => Some(Self::Micro),
            _ => None,
        }
    }

    /// Numeric codes used by old type links; anything unrecognized is `All`.
    pub fn from_legacy_code(code: &str) -> Self {
        match code {
            "1" => Self::Virtual,
            "2" => Self::SelfDirected,
            "3" => Self::Micro,
            _ => Self::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    keywords: String,
    location: String,
    distance: String,
    #[serde(rename = "type")]
    opportunity_type: OpportunityType,
    sort: String,
    page_num: u32,
    use_cache: bool,
    time_period_start: String,
    time_period_end: String,
    facet_counts: bool,
    filters: BTreeMap<String, String>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            location: String::new(),
            distance: String::new(),
            opportunity_type: OpportunityType::All,
            sort: String::new(),
            page_num: 0,
            use_cache: true,
            time_period_start: TIME_PERIOD_ANY.to_string(),
            time_period_end: TIME_PERIOD_ANY.to_string(),
            facet_counts: true,
            filters: BTreeMap::new(),
        }
    }
}

impl Query {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn distance(&self) -> &str {
        &self.distance
    }

    pub fn set_distance(&mut self, distance: impl Into<String>) {
        self.distance = distance.into();
    }

    pub fn opportunity_type(&self) -> OpportunityType {
        self.opportunity_type
    }

    /// Sets the type from a legacy numeric code (`"1"`, `"2"`, `"3"`).
    pub fn set_type(&mut self, code: &str) {
        self.opportunity_type = OpportunityType::from_legacy_code(code);
    }

    pub fn set_opportunity_type(&mut self, opportunity_type: OpportunityType) {
        self.opportunity_type = opportunity_type;
    }

    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn set_sort(&mut self, sort: impl Into<String>) {
        self.sort = sort.into();
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn set_page_num(&mut self, page_num: u32) {
        self.page_num = page_num;
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    pub fn set_use_cache(&mut self, use_cache: bool) {
        self.use_cache = use_cache;
    }

    pub fn time_period_start(&self) -> &str {
        &self.time_period_start
    }

    pub fn set_time_period_start(&mut self, period: impl Into<String>) {
        self.time_period_start = period.into();
    }

    pub fn time_period_end(&self) -> &str {
        &self.time_period_end
    }

    pub fn set_time_period_end(&mut self, period: impl Into<String>) {
        self.time_period_end = period.into();
    }

    pub fn facet_counts(&self) -> bool {
        self.facet_counts
    }

    pub fn set_facet_counts(&mut self, facet_counts: bool) {
        self.facet_counts = facet_counts;
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// Returns false, leaving the filters untouched, when `name` is empty or
    /// belongs to a dedicated field.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || RESERVED_PARAMS.contains(&name.as_str()) {
            return false;
        }
        self.filters.insert(name, value.into());
        true
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
