use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Tracks request spacing for one host
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Number of requests scheduled against this host
    pub request_count: u32,

    /// Start time of the most recently scheduled request (may be in the future)
    pub last_request_time: Option<Instant>,
}

impl HostState {
    /// Creates a new HostState with no requests recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, delay: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let ready_at = last + delay;
        if ready_at > now {
            Some(ready_at - now)
        } else {
            None
        }
    }

    /// Records a request scheduled to start at `at`
    pub fn record_request(&mut self, at: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(at);
    }
}

/// Per-host minimum-delay throttle shared by all crawl workers
///
/// Each caller reserves the next free slot for its host, so concurrent
/// workers targeting the same host are spaced at least `delay` apart even if
/// they ask at the same instant.
#[derive(Debug)]
pub struct HostThrottle {
    delay: Duration,
    hosts: Mutex<HashMap<String, HostState>>,
}

impl HostThrottle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            hosts: Mutex::new(HashMap::new()),
        }
    }

    /// Reserves the next request slot for `host` and returns how long to wait
    /// before using it
    pub fn reserve(&self, host: &str, now: Instant) -> Duration {
        let mut hosts = self
            .hosts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let state = hosts.entry(host.to_string()).or_insert_with(HostState::new);

        let wait = state
            .time_until_next_request(self.delay, now)
            .unwrap_or(Duration::ZERO);
        state.record_request(now + wait);
        wait
    }

    /// Waits until this caller may issue a request to `host`
    pub async fn wait_turn(&self, host: &str) {
        let wait = self.reserve(host, Instant::now());
        if !wait.is_zero() {
            tracing::trace!("Throttling {} for {:?}", host, wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Number of requests scheduled against `host` so far
    pub fn request_count(&self, host: &str) -> u32 {
        self.hosts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(host)
            .map(|state| state.request_count)
            .unwrap_or(0)
    }
}
