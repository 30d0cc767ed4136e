//! Recurring poll of all endpoints.
//!
//! Each cycle spawns one independent task per endpoint. Tasks never touch
//! view state directly: successful results travel as [`Update`]s through an
//! unbounded channel that the UI thread drains. Cycles may overlap when a
//! request outlives the interval; whichever response settles last wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{poll_endpoint, Endpoint, EndpointUrls, JsonFetcher, Update};
use crate::error::FetchError;

/// Shortest accepted polling interval.
const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Polls the three endpoints on a fixed cadence.
pub struct Poller {
    fetcher: Arc<dyn JsonFetcher>,
    urls: EndpointUrls,
    interval: Duration,
}

impl Poller {
    /// Create a poller. Intervals shorter than 10ms are raised to 10ms.
    pub fn new(fetcher: Arc<dyn JsonFetcher>, urls: EndpointUrls, interval: Duration) -> Self {
        Self {
            fetcher,
            urls,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single cycle and wait for all three endpoints to settle.
    pub async fn fetch_once(&self) -> Vec<(Endpoint, Result<Update, FetchError>)> {
        let fetcher = self.fetcher.as_ref();
        let (summary, messages, timeline) = tokio::join!(
            poll_endpoint(fetcher, Endpoint::Summary, &self.urls.summary),
            poll_endpoint(fetcher, Endpoint::Messages, &self.urls.messages),
            poll_endpoint(fetcher, Endpoint::Timeline, &self.urls.timeline),
        );
        vec![
            (Endpoint::Summary, summary),
            (Endpoint::Messages, messages),
            (Endpoint::Timeline, timeline),
        ]
    }

    /// Start polling on the current tokio runtime.
    ///
    /// The first cycle fires immediately.
    pub fn spawn(self) -> PollerHandle {
        self.spawn_on(&Handle::current())
    }

    /// Start polling on the given runtime.
    pub fn spawn_on(self, runtime: &Handle) -> PollerHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let alive = Arc::new(AtomicBool::new(true));
        let refresh = Arc::new(Notify::new());
        let description = self.fetcher.description().to_string();

        let cycle = Arc::new(Cycle {
            fetcher: self.fetcher,
            urls: self.urls,
            tx,
            alive: Arc::clone(&alive),
        });

        info!(interval = ?self.interval, source = %description, "starting poller");
        let task = runtime.spawn(run(cycle, self.interval, Arc::clone(&refresh)));

        PollerHandle {
            updates: rx,
            alive,
            refresh,
            task,
            description,
        }
    }
}

/// State shared by the ticker and every per-endpoint task it spawns.
struct Cycle {
    fetcher: Arc<dyn JsonFetcher>,
    urls: EndpointUrls,
    tx: mpsc::UnboundedSender<Update>,
    alive: Arc<AtomicBool>,
}

impl Cycle {
    fn start(this: &Arc<Self>) {
        for endpoint in Endpoint::ALL {
            let cycle = Arc::clone(this);
            tokio::spawn(async move { cycle.poll(endpoint).await });
        }
    }

    async fn poll(&self, endpoint: Endpoint) {
        let url = self.urls.get(endpoint);
        match poll_endpoint(self.fetcher.as_ref(), endpoint, url).await {
            Ok(update) => {
                if !self.alive.load(Ordering::Acquire) {
                    debug!(%endpoint, "poller stopped, discarding update");
                    return;
                }
                if self.tx.send(update).is_err() {
                    debug!(%endpoint, "update receiver closed");
                }
            }
            Err(error) => {
                warn!(%endpoint, url, %error, "failed to fetch endpoint");
            }
        }
    }
}

async fn run(cycle: Arc<Cycle>, interval: Duration, refresh: Arc<Notify>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = refresh.notified() => {
                debug!("manual refresh");
            }
        }

        if !cycle.alive.load(Ordering::Acquire) {
            break;
        }
        Cycle::start(&cycle);
    }
}

/// Receiving side of a running [`Poller`].
///
/// Dropping the handle shuts the poller down.
pub struct PollerHandle {
    updates: mpsc::UnboundedReceiver<Update>,
    alive: Arc<AtomicBool>,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
    description: String,
}

impl PollerHandle {
    /// Take the next pending update without blocking.
    ///
    /// Always `None` once the poller has been shut down.
    pub fn try_next(&mut self) -> Option<Update> {
        if !self.is_running() {
            return None;
        }
        self.updates.try_recv().ok()
    }

    /// Wait for the next update.
    pub async fn recv(&mut self) -> Option<Update> {
        if !self.is_running() {
            return None;
        }
        self.updates.recv().await
    }

    /// Start an extra cycle now, without resetting the regular cadence.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    /// Whether the poller is still delivering updates.
    pub fn is_running(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Human-readable description of the backend being polled.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cancel the timer and discard anything still in flight.
    pub fn shutdown(&mut self) {
        if self.alive.swap(false, Ordering::AcqRel) {
            info!("stopping poller");
        }
        self.task.abort();
        self.updates.close();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dashboard;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;
    use tokio::time::{sleep, timeout};

    const BASE: &str = "http://backend.test";

    /// In-memory fetcher: each endpoint either answers (after a delay) or
    /// fails with a status code.
    struct MockFetcher {
        summary: (Duration, Result<Value, u16>),
        messages: (Duration, Result<Value, u16>),
        timeline: (Duration, Result<Value, u16>),
        calls: AtomicUsize,
        completed: AtomicUsize,
    }

    impl MockFetcher {
        fn healthy() -> Self {
            Self {
                summary: (Duration::ZERO, Ok(summary_body())),
                messages: (Duration::ZERO, Ok(messages_body())),
                timeline: (Duration::ZERO, Ok(timeline_body())),
                calls: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl JsonFetcher for MockFetcher {
        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, response) = if url.ends_with("/summary") {
                &self.summary
            } else if url.ends_with("/messages/sentiment") {
                &self.messages
            } else {
                &self.timeline
            };
            sleep(*delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            response.clone().map_err(FetchError::Status)
        }

        fn description(&self) -> &str {
            "mock"
        }
    }

    fn summary_body() -> Value {
        json!({ "total_messages": 10, "total_positive": 5, "total_negative": 3, "total_neutral": 2 })
    }

    fn messages_body() -> Value {
        json!({ "messages": [ { "id": 1, "latest_post_time": "2024-01-01T10:00:00Z",
            "message_content": "hi", "thread_url": "https://forum.example/t/1",
            "sentiment": "Positive" } ] })
    }

    fn timeline_body() -> Value {
        json!([ { "check_time": "2024-01-01T00:00:00Z", "total_messages": 4,
            "total_positive_count": 2, "total_negative_count": 1, "total_neutral_count": 1 } ])
    }

    fn poller(fetcher: Arc<MockFetcher>, interval: Duration) -> Poller {
        Poller::new(fetcher, EndpointUrls::from_base(BASE), interval)
    }

    async fn next(handle: &mut PollerHandle) -> Update {
        timeout(Duration::from_secs(2), handle.recv())
            .await
            .expect("timed out waiting for update")
            .expect("poller closed")
    }

    #[tokio::test]
    async fn test_first_cycle_fires_immediately() {
        let fetcher = Arc::new(MockFetcher::healthy());
        let mut handle = poller(fetcher, Duration::from_secs(3600)).spawn();

        let mut seen = HashSet::new();
        for _ in 0..3 {
            seen.insert(next(&mut handle).await.endpoint());
        }
        assert_eq!(seen.len(), 3);
        assert_eq!(handle.description(), "mock");
    }

    #[tokio::test]
    async fn test_failing_endpoint_is_isolated() {
        let mut fetcher = MockFetcher::healthy();
        fetcher.summary = (Duration::ZERO, Err(500));
        let fetcher = Arc::new(fetcher);

        let mut dashboard = Dashboard::new();
        dashboard.apply(
            Update::from_json(Endpoint::Summary, json!({ "total_messages": 7, "total_positive": 7 }))
                .unwrap(),
        );

        let mut handle = poller(fetcher, Duration::from_secs(3600)).spawn();
        for _ in 0..2 {
            let update = next(&mut handle).await;
            assert_ne!(update.endpoint(), Endpoint::Summary);
            dashboard.apply(update);
        }
        assert!(timeout(Duration::from_millis(200), handle.recv()).await.is_err());

        assert_eq!(dashboard.summary.total_messages, 7);
        assert_eq!(dashboard.summary.positive, "100.00");
        assert_eq!(dashboard.messages.len(), 1);
        assert_eq!(dashboard.timeline.len(), 1);
    }

    #[tokio::test]
    async fn test_slow_endpoint_does_not_block_others() {
        let mut fetcher = MockFetcher::healthy();
        fetcher.summary = (Duration::from_secs(30), Ok(summary_body()));
        let fetcher = Arc::new(fetcher);

        let mut handle = poller(fetcher, Duration::from_secs(3600)).spawn();
        let first = next(&mut handle).await.endpoint();
        let second = next(&mut handle).await.endpoint();

        assert_ne!(first, Endpoint::Summary);
        assert_ne!(second, Endpoint::Summary);
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_recurs_on_interval() {
        let fetcher = Arc::new(MockFetcher::healthy());
        let _handle = poller(Arc::clone(&fetcher), Duration::from_millis(20)).spawn();

        timeout(Duration::from_secs(2), async {
            while fetcher.calls.load(Ordering::SeqCst) < 9 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("poller did not recur");
    }

    #[tokio::test]
    async fn test_refresh_now_triggers_extra_cycle() {
        let fetcher = Arc::new(MockFetcher::healthy());
        let mut handle = poller(Arc::clone(&fetcher), Duration::from_secs(3600)).spawn();

        for _ in 0..3 {
            next(&mut handle).await;
        }
        handle.refresh_now();
        for _ in 0..3 {
            next(&mut handle).await;
        }
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_shutdown_discards_in_flight_results() {
        let mut fetcher = MockFetcher::healthy();
        let delay = Duration::from_millis(100);
        fetcher.summary.0 = delay;
        fetcher.messages.0 = delay;
        fetcher.timeline.0 = delay;
        let fetcher = Arc::new(fetcher);

        let mut handle = poller(Arc::clone(&fetcher), Duration::from_secs(3600)).spawn();
        sleep(Duration::from_millis(20)).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);

        handle.shutdown();
        assert!(!handle.is_running());

        timeout(Duration::from_secs(2), async {
            while fetcher.completed.load(Ordering::SeqCst) < 3 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("in-flight requests never completed");

        assert!(handle.updates.try_recv().is_err());
        assert!(handle.try_next().is_none());
        assert!(handle.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_once_reports_each_endpoint() {
        let mut fetcher = MockFetcher::healthy();
        fetcher.timeline = (Duration::ZERO, Err(404));
        let results = poller(Arc::new(fetcher), Duration::from_secs(1)).fetch_once().await;

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_ok());
        assert!(matches!(results[2].1, Err(FetchError::Status(404))));
    }

    #[test]
    fn test_interval_has_floor() {
        let p = poller(Arc::new(MockFetcher::healthy()), Duration::ZERO);
        assert_eq!(p.interval(), MIN_INTERVAL);
    }
}
