use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::error::{AppError, AppResult};

/// Fetches a search backend URL and yields the response body.
///
/// Dropping the returned future must abandon the request.
pub trait SearchTransport: Send + Sync {
    fn fetch(&self, url: &str) -> BoxFuture<'static, AppResult<String>>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl SearchTransport for HttpTransport {
    fn fetch(&self, url: &str) -> BoxFuture<'static, AppResult<String>> {
        let client = self.client.clone();
        let url = url.to_string();
        async move {
            let response = client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::http(status.as_u16(), url));
            }
            Ok(response.text().await?)
        }
        .boxed()
    }
}
