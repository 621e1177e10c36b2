//! Sequential, rate-limited paging over one route.
//!
//! Kana allows roughly 200 requests per 5 minutes, so pages are requested
//! strictly one after another with a fixed pause in between. A fetch stops
//! at whichever comes first: upstream reporting no further pages, or the
//! caller's page budget running out.

use std::{fmt, sync::Arc, time::Duration};

use tracing::debug;

use crate::{
    error::Result,
    query::{MAX_PAGE_SIZE, Query},
    transport::{Route, Transport},
};

/// Records accumulated over consecutive pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedWindow {
    /// Upstream flag from the last fetched page.
    pub more: bool,
    pub page_from: u32,
    /// Last page the budget allowed, which may lie past the last page fetched.
    pub page_to: u32,
    pub items: Vec<serde_json::Value>,
}

/// Pages needed to collect `item_limit` records at the maximum page size.
///
/// Never less than one: a fetch always issues at least one request.
pub fn page_count_for(item_limit: usize) -> u32 {
    let pages = item_limit.div_ceil(usize::from(MAX_PAGE_SIZE)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Clone)]
pub struct Paginator {
    transport: Arc<dyn Transport>,
    delay: Duration,
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl Paginator {
    /// `delay` is the pause between consecutive pages; zero disables pacing.
    pub fn new(transport: Arc<dyn Transport>, delay: Duration) -> Self {
        Self { transport, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Fetch up to `page_count` pages starting at `query.page()`.
    ///
    /// Any failed page aborts the whole fetch; records gathered from earlier
    /// pages are dropped rather than returned as a partial window.
    pub async fn fetch(
        &self,
        route: Route,
        query: &Query,
        page_count: u32,
    ) -> Result<PagedWindow> {
        let page_count = page_count.max(1);
        let page_from = query.page();
        let page_to = page_from.get().saturating_add(page_count - 1);

        let mut page = page_from;
        let mut items = Vec::new();

        let more = loop {
            let page_query = query.with_page(page);
            let result = self.transport.send(route, &page_query).await?;

            debug!(
                %route,
                page = page.get(),
                records = result.results.len(),
                more = result.more,
                "fetched VNDB page"
            );

            items.extend(result.results);

            if !result.more || page.get() >= page_to {
                break result.more;
            }

            page = page.saturating_add(1);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        };

        Ok(PagedWindow {
            more,
            page_from: page_from.get(),
            page_to,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{ProviderError, TransportError},
        query::{Filter, QueryFields},
        transport::PageResult,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::{num::NonZeroU32, sync::Mutex};
    use tokio::time::Instant;

    /// Serves pages of `page_size` records; `last_page` ends the listing.
    struct ScriptedTransport {
        page_size: usize,
        last_page: Option<u32>,
        fail_on: Option<u32>,
        calls: Mutex<Vec<(u32, Instant)>>,
    }

    impl ScriptedTransport {
        fn endless(page_size: usize) -> Self {
            Self {
                page_size,
                last_page: None,
                fail_on: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn ending_at(page_size: usize, last_page: u32) -> Self {
            Self {
                last_page: Some(last_page),
                ..Self::endless(page_size)
            }
        }

        fn pages_requested(&self) -> Vec<u32> {
            self.calls.lock().unwrap().iter().map(|(p, _)| *p).collect()
        }

        fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(
            &self,
            _route: Route,
            query: &Query,
        ) -> std::result::Result<PageResult, TransportError> {
            let page = query.page().get();
            self.calls.lock().unwrap().push((page, Instant::now()));

            if self.fail_on == Some(page) {
                return Err(TransportError::Status {
                    status: 502,
                    message: "bad gateway".into(),
                });
            }

            let results = (0..self.page_size)
                .map(|i| json!({ "id": format!("v{}", page * 1000 + i as u32) }))
                .collect();
            Ok(PageResult {
                results,
                more: self.last_page.is_none_or(|last| page < last),
            })
        }
    }

    fn query_from(page: u32) -> Query {
        Query::new(QueryFields {
            filter: Filter::eq("search", "x"),
            page: NonZeroU32::new(page).unwrap(),
            ..Default::default()
        })
    }

    fn paginator(transport: &Arc<ScriptedTransport>, delay: Duration) -> Paginator {
        Paginator::new(transport.clone(), delay)
    }

    /// Paused clocks still round timer deadlines up to the next millisecond.
    fn assert_paced(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual <= expected + Duration::from_millis(2),
            "expected ~{expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count_for(0), 1);
        assert_eq!(page_count_for(1), 1);
        assert_eq!(page_count_for(7), 1);
        assert_eq!(page_count_for(100), 1);
        assert_eq!(page_count_for(101), 2);
        assert_eq!(page_count_for(250), 3);
    }

    #[tokio::test]
    async fn stops_at_page_budget_while_upstream_has_more() {
        let transport = Arc::new(ScriptedTransport::endless(2));
        let window = paginator(&transport, Duration::ZERO)
            .fetch(Route::VisualNovel, &query_from(1), 3)
            .await
            .unwrap();

        assert_eq!(transport.pages_requested(), vec![1, 2, 3]);
        assert!(window.more);
        assert_eq!((window.page_from, window.page_to), (1, 3));
        assert_eq!(window.items.len(), 6);
    }

    #[tokio::test]
    async fn stops_when_upstream_runs_out() {
        let transport = Arc::new(ScriptedTransport::ending_at(1, 2));
        let window = paginator(&transport, Duration::ZERO)
            .fetch(Route::Release, &query_from(1), 5)
            .await
            .unwrap();

        assert_eq!(transport.pages_requested(), vec![1, 2]);
        assert!(!window.more);
        assert_eq!((window.page_from, window.page_to), (1, 5));
        assert_eq!(window.items, vec![json!({"id": "v1000"}), json!({"id": "v2000"})]);
    }

    #[tokio::test]
    async fn starts_from_the_query_page() {
        let transport = Arc::new(ScriptedTransport::endless(1));
        let window = paginator(&transport, Duration::ZERO)
            .fetch(Route::VisualNovel, &query_from(4), 2)
            .await
            .unwrap();

        assert_eq!(transport.pages_requested(), vec![4, 5]);
        assert_eq!((window.page_from, window.page_to), (4, 5));
    }

    #[tokio::test]
    async fn zero_page_budget_still_fetches_once() {
        let transport = Arc::new(ScriptedTransport::endless(1));
        let window = paginator(&transport, Duration::ZERO)
            .fetch(Route::VisualNovel, &query_from(1), 0)
            .await
            .unwrap();

        assert_eq!(transport.pages_requested(), vec![1]);
        assert!(window.more);
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_only_between_pages() {
        let delay = Duration::from_millis(700);
        let transport = Arc::new(ScriptedTransport::endless(1));
        let started = Instant::now();

        paginator(&transport, delay)
            .fetch(Route::VisualNovel, &query_from(1), 3)
            .await
            .unwrap();

        let times = transport.call_times();
        assert_eq!(times.len(), 3);
        assert_eq!(times[0] - started, Duration::ZERO);
        assert_paced(times[1] - times[0], delay);
        assert_paced(times[2] - times[1], delay);
        // no pause after the final page
        assert_paced(started.elapsed(), delay * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn single_page_never_sleeps() {
        let transport = Arc::new(ScriptedTransport::endless(1));
        let started = Instant::now();

        paginator(&transport, Duration::from_secs(5))
            .fetch(Route::VisualNovel, &query_from(1), 1)
            .await
            .unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn early_stop_skips_remaining_delays() {
        let delay = Duration::from_millis(700);
        let transport = Arc::new(ScriptedTransport::ending_at(1, 2));
        let started = Instant::now();

        paginator(&transport, delay)
            .fetch(Route::VisualNovel, &query_from(1), 5)
            .await
            .unwrap();

        assert_paced(started.elapsed(), delay);
    }

    #[tokio::test]
    async fn failed_page_discards_partial_window() {
        let transport = Arc::new(ScriptedTransport {
            fail_on: Some(2),
            ..ScriptedTransport::endless(3)
        });

        let err = paginator(&transport, Duration::ZERO)
            .fetch(Route::VisualNovel, &query_from(1), 4)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Transport(TransportError::Status { status: 502, .. })
        ));
        assert_eq!(transport.pages_requested(), vec![1, 2]);
    }
}
