use std::future::Future;
use std::sync::Arc;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{
    UnboundedReceiver, UnboundedSender, error::TryRecvError, unbounded_channel,
};
use tokio::task::JoinHandle;

use super::transport::SearchTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Completed {
        generation: u64,
        url: String,
        body: String,
    },
    Failed {
        generation: u64,
        message: String,
    },
}

impl SearchEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Completed { generation, .. } | Self::Failed { generation, .. } => *generation,
        }
    }
}

/// Runs at most one backend request at a time.
///
/// Each submit aborts the previous request and bumps the generation; events
/// carry the generation they were issued under so stale ones can be dropped.
pub struct SearchEngine {
    transport: Arc<dyn SearchTransport>,
    event_tx: UnboundedSender<SearchEvent>,
    event_rx: UnboundedReceiver<SearchEvent>,
    next_generation: u64,
    in_flight: Option<JoinHandle<()>>,
    runtime: SearchWorkerRuntime,
}

struct SearchWorkerRuntime {
    _owned: Option<Runtime>,
    handle: Handle,
}

impl SearchWorkerRuntime {
    fn new() -> Self {
        if let Ok(handle) = Handle::try_current() {
            return Self {
                _owned: None,
                handle,
            };
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("afg-search")
            .build()
            .expect("search runtime should initialize");
        let handle = runtime.handle().clone();
        Self {
            _owned: Some(runtime),
            handle,
        }
    }

    fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(task)
    }
}

impl SearchEngine {
    pub fn new(transport: Arc<dyn SearchTransport>) -> Self {
        let (event_tx, event_rx) = unbounded_channel();
        Self {
            transport,
            event_tx,
            event_rx,
            next_generation: 0,
            in_flight: None,
            runtime: SearchWorkerRuntime::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.next_generation
    }

    pub fn submit(&mut self, url: impl Into<String>) -> u64 {
        self.abort_in_flight();
        self.next_generation = self.next_generation.saturating_add(1);

        let generation = self.next_generation;
        let url = url.into();
        let request = self.transport.fetch(&url);
        let event_tx = self.event_tx.clone();

        tracing::debug!(generation, %url, "search submitted");
        self.in_flight = Some(self.runtime.spawn(async move {
            let event = match request.await {
                Ok(body) => SearchEvent::Completed {
                    generation,
                    url,
                    body,
                },
                Err(err) => SearchEvent::Failed {
                    generation,
                    message: err.to_string(),
                },
            };
            let _ = event_tx.send(event);
        }));

        generation
    }

    /// Abandons the in-flight request without starting a new one.
    pub fn cancel(&mut self) -> u64 {
        self.abort_in_flight();
        self.next_generation = self.next_generation.saturating_add(1);
        self.next_generation
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    pub fn drain_events(&mut self) -> Vec<SearchEvent> {
        let mut drained = Vec::new();

        loop {
            match self.event_rx.try_recv() {
                Ok(event) => drained.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        drained
    }

    pub async fn next_event(&mut self) -> Option<SearchEvent> {
        self.event_rx.recv().await
    }

    fn abort_in_flight(&mut self) {
        // Aborting a task that already finished is a no-op.
        if let Some(task) = self.in_flight.take()
            && !task.is_finished()
        {
            tracing::debug!(
                generation = self.next_generation,
                "superseded search aborted"
            );
            task.abort();
        }
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
