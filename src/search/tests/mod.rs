
use std::sync::Mutex;

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use tokio::sync::oneshot;

use crate::error::{AppError, AppResult};
use crate::search::SearchTransport;

/// Answers every request immediately, echoing the URL.
#[derive(Default)]
pub(super) struct EchoTransport {
    requests: Mutex<Vec<String>>,
    fail_status: Option<u16>,
}

impl EchoTransport {
    pub(super) fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub(super) fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl SearchTransport for EchoTransport {
    fn fetch(&self, url: &str) -> BoxFuture<'static, AppResult<String>> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(url.to_string());
        let result = match self.fail_status {
            Some(status) => Err(AppError::http(status, url)),
            None => Ok(format!("results for {url}")),
        };
        future::ready(result).boxed()
    }
}

/// Holds each request open until the test releases it.
#[derive(Default)]
pub(super) struct GatedTransport {
    gates: Mutex<Vec<(String, Option<oneshot::Sender<AppResult<String>>>)>>,
}

impl GatedTransport {
    /// Answers the `index`-th issued request; false if it was abandoned.
    pub(super) fn release(&self, index: usize, body: &str) -> bool {
        let sender = self.gates.lock().expect("gate lock")[index]
            .1
            .take()
            .expect("request released twice");
        sender.send(Ok(body.to_string())).is_ok()
    }

    pub(super) fn urls(&self) -> Vec<String> {
        self.gates
            .lock()
            .expect("gate lock")
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

impl SearchTransport for GatedTransport {
    fn fetch(&self, url: &str) -> BoxFuture<'static, AppResult<String>> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .expect("gate lock")
            .push((url.to_string(), Some(tx)));
        async move {
            rx.await
                .unwrap_or_else(|_| Err(AppError::transport("request abandoned")))
        }
        .boxed()
    }
}
