use std::{sync::Arc, time::Duration};

use serde::de::DeserializeOwned;
use tracing::debug;
use vndb_model::{
    Release, Tag, VisualNovel, VnId, release_fields, visual_novel_fields,
};

use crate::{
    error::{ProviderError, Result, TransportError},
    paginator::{Paginator, page_count_for},
    query::{Condition, Filter, FilterBuilder, Operator, PageSize, Query, QueryFields},
    transport::{HttpTransport, Route, Transport},
};

/// Human-facing site, used for links only.
pub const HOME: &str = "https://vndb.org/";

/// Sort key ordering search hits by relevance.
pub const SEARCH_SORT: &str = "searchrank";

/// Default pause between paged requests. Kana allows about 200 requests per
/// five minutes.
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(700);

/// Page of the site for an entity id, e.g. `https://vndb.org/v17`.
pub fn browser_url(id: &str) -> String {
    format!("{HOME}{id}")
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Pause between consecutive pages of one fetch.
    pub request_interval: Duration,
    /// Language codes results are restricted to; empty means no restriction.
    pub languages: Vec<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_interval: DEFAULT_REQUEST_INTERVAL,
            languages: Vec::new(),
        }
    }
}

/// Truncated result of a multi-page fetch.
///
/// `more` is the upstream flag of the last fetched page. It is not adjusted
/// for the truncation, so it only approximates whether matches exist beyond
/// `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub more: bool,
}

/// Client for the visual novel and release routes.
#[derive(Debug, Clone)]
pub struct VndbClient {
    paginator: Paginator,
    languages: Vec<String>,
}

impl VndbClient {
    pub fn new(options: ClientOptions) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()), options)
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        options: ClientOptions,
    ) -> Self {
        Self {
            paginator: Paginator::new(transport, options.request_interval),
            languages: options.languages,
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// `(lang = a) or (lang = b) ...` over the configured languages.
    pub fn language_filter(&self) -> Filter {
        FilterBuilder::default()
            .or(self.languages.iter().map(|code| Filter::eq("lang", code.as_str())))
            .build()
    }

    fn restrict(&self, filter: Filter) -> Filter {
        FilterBuilder::new(filter)
            .and([self.language_filter()])
            .build()
    }

    pub fn visual_novel_filter(&self, id: &VnId) -> Filter {
        self.restrict(Filter::eq("id", id.as_str()))
    }

    pub fn search_filter(&self, text: &str) -> Filter {
        self.restrict(Filter::eq("search", text))
    }

    /// Releases of `vn`, optionally limited to official ones.
    pub fn release_filter(&self, vn: &VnId, include_unofficial: bool) -> Filter {
        let join = Filter::eq(
            "vn",
            Condition::predicate("id", Operator::Eq, vn.as_str()),
        );
        let official = if include_unofficial {
            Filter::empty()
        } else {
            Filter::eq("official", true)
        };

        self.restrict(FilterBuilder::new(join).and([official]).build())
    }

    pub async fn get_visual_novel(&self, id: &str) -> Result<VisualNovel> {
        let id = VnId::parse(id)?;
        let query = Query::new(QueryFields {
            filter: self.visual_novel_filter(&id),
            fields: visual_novel_fields(),
            results: PageSize::ONE,
            ..Default::default()
        });

        let window = self.paginator.fetch(Route::VisualNovel, &query, 1).await?;
        let record = window.items.into_iter().next().ok_or_else(|| {
            ProviderError::NotFound(format!(
                "VisualNovel with id {id} not found on VNDB."
            ))
        })?;

        decode(record)
    }

    pub async fn search_visual_novels(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Listing<VisualNovel>> {
        let query = Query::new(QueryFields {
            filter: self.search_filter(text),
            fields: visual_novel_fields(),
            sort: SEARCH_SORT.to_string(),
            results: PageSize::MAX,
            ..Default::default()
        });

        self.fetch_listing(Route::VisualNovel, &query, limit).await
    }

    pub async fn get_visual_novel_releases(
        &self,
        id: &str,
        limit: usize,
        include_unofficial: bool,
    ) -> Result<Listing<Release>> {
        let id = VnId::parse(id)?;
        let query = Query::new(QueryFields {
            filter: self.release_filter(&id, include_unofficial),
            fields: release_fields(),
            results: PageSize::MAX,
            ..Default::default()
        });

        self.fetch_listing(Route::Release, &query, limit).await
    }

    /// The API has no way to list a tag's children.
    pub async fn get_child_tags(&self, id: &str) -> Result<Vec<Tag>> {
        Err(ProviderError::NotImplemented(format!(
            "VNDB does not currently support fetching child tags (requested {id})."
        )))
    }

    async fn fetch_listing<T: DeserializeOwned>(
        &self,
        route: Route,
        query: &Query,
        limit: usize,
    ) -> Result<Listing<T>> {
        let window = self
            .paginator
            .fetch(route, query, page_count_for(limit))
            .await?;

        debug!(
            %route,
            fetched = window.items.len(),
            limit,
            more = window.more,
            "truncating VNDB listing"
        );

        let items = window
            .items
            .into_iter()
            .take(limit)
            .map(decode)
            .collect::<Result<Vec<T>>>()?;

        Ok(Listing {
            items,
            more: window.more,
        })
    }
}

fn decode<T: DeserializeOwned>(record: serde_json::Value) -> Result<T> {
    serde_json::from_value(record)
        .map_err(|err| ProviderError::from(TransportError::Malformed(err)))
}
