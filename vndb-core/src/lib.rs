//! Client for the VNDB Kana API.
//!
//! Requests are described by immutable [`Query`] values whose filters are
//! composed with a persistent [`FilterBuilder`]. A [`Paginator`] drives a
//! [`Transport`] across consecutive pages at a fixed pace, [`VndbClient`]
//! wraps that into entity lookups, and the [`aggregate`] and [`metadata`]
//! modules shape the results for a host application through
//! [`VndbMetadataProvider`].
#![allow(missing_docs)]

pub mod aggregate;
pub mod client;
pub mod error;
pub mod metadata;
pub mod paginator;
pub mod providers;
pub mod query;
pub mod transport;

pub use aggregate::{LanguagePriority, SubEntity, aggregate, release_producers};
pub use client::{
    ClientOptions, DEFAULT_REQUEST_INTERVAL, HOME, Listing, VndbClient,
    browser_url,
};
pub use error::{ProviderError, Result, TransportError};
pub use metadata::{GameMetadata, MinimalGameMetadata, ProvidedItem};
pub use paginator::{PagedWindow, Paginator, page_count_for};
pub use providers::{
    MetadataProvider, ProviderSettings, VndbMetadataProvider, extract_vndb_id,
};
pub use query::{
    Condition, Filter, FilterBuilder, FilterValue, Operator, PageSize, Query,
    QueryFields, Reductor, SortDirection,
};
pub use transport::{API_ENDPOINT, HttpTransport, PageResult, Route, Transport};

pub use vndb_model as model;
