use crate::config::SearchConfig;
use crate::query::{Query, QueryCodec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPage {
    #[default]
    Search,
    MyEvents,
}

/// Builds backend snippet URLs for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    base_url: String,
    snippets_path: String,
    my_snippets_path: String,
    campaign_id: Option<String>,
    fallback_location: String,
    fallback_distance: String,
    page: SearchPage,
}

impl SearchEndpoint {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            snippets_path: config.snippets_path.clone(),
            my_snippets_path: config.my_snippets_path.clone(),
            campaign_id: config.campaign_id.clone(),
            fallback_location: config.fallback_location.clone(),
            fallback_distance: config.fallback_distance.clone(),
            page: SearchPage::Search,
        }
    }

    pub fn with_page(mut self, page: SearchPage) -> Self {
        self.page = page;
        self
    }

    pub fn page(&self) -> SearchPage {
        self.page
    }

    pub fn request_url(&self, query: &Query, codec: &QueryCodec, referrer: Option<&str>) -> String {
        let mut url = self.base_url.clone();
        match (self.page, self.campaign_id.as_deref()) {
            (SearchPage::Search, Some(campaign_id)) => {
                url.push_str(&self.snippets_path);
                url.push_str("?campaign_id=");
                url.push_str(&urlencoding::encode(campaign_id));
                url.push('&');
            }
            (SearchPage::Search, None) => {
                url.push_str(&self.snippets_path);
                url.push('?');
            }
            (SearchPage::MyEvents, _) => {
                url.push_str(&self.my_snippets_path);
                url.push('?');
            }
        }

        url.push_str(&codec.serialize(query));

        if query.location().is_empty() {
            url.push_str("&vol_loc=");
            url.push_str(&urlencoding::encode(&self.fallback_location));
            url.push_str("&vol_dist=");
            url.push_str(&urlencoding::encode(&self.fallback_distance));
        }

        if let Some(referrer) = referrer.filter(|referrer| !referrer.is_empty()) {
            url.push_str("&referrer=");
            url.push_str(&urlencoding::encode(referrer));
        }

        url
    }
}
