use std::num::NonZeroU32;

use serde::{Serialize, Serializer};

use super::filter::Filter;
use crate::error::{ProviderError, Result};

/// Hard upper bound the API places on results per page.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Number of results per page, always within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(u8);

impl PageSize {
    pub const ONE: PageSize = PageSize(1);
    pub const MAX: PageSize = PageSize(MAX_PAGE_SIZE);

    pub fn new(size: u32) -> Result<Self> {
        match u8::try_from(size) {
            Ok(size @ 1..=MAX_PAGE_SIZE) => Ok(PageSize(size)),
            _ => Err(ProviderError::ContractViolation(format!(
                "page size {size} outside 1..={MAX_PAGE_SIZE}"
            ))),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Everything a [`Query`] is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFields {
    pub filter: Filter,
    /// Dotted field paths to return, e.g. `tags.id`.
    pub fields: Vec<String>,
    pub sort: String,
    pub direction: SortDirection,
    pub results: PageSize,
    pub page: NonZeroU32,
}

impl Default for QueryFields {
    fn default() -> Self {
        Self {
            filter: Filter::empty(),
            fields: Vec::new(),
            sort: "id".to_string(),
            direction: SortDirection::Ascending,
            results: PageSize::default(),
            page: NonZeroU32::MIN,
        }
    }
}

/// Immutable request description for one route.
///
/// Paging never mutates a query: [`Query::with_page`] returns an independent
/// copy pointing at another page.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    filter: Filter,
    fields: Vec<String>,
    sort: String,
    direction: SortDirection,
    results: PageSize,
    page: NonZeroU32,
}

impl Query {
    pub fn new(fields: QueryFields) -> Self {
        Self {
            filter: fields.filter,
            fields: fields.fields,
            sort: fields.sort,
            direction: fields.direction,
            results: fields.results,
            page: fields.page,
        }
    }

    /// Copy of this query targeting `page`.
    pub fn with_page(&self, page: NonZeroU32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn results(&self) -> PageSize {
        self.results
    }

    pub fn page(&self) -> NonZeroU32 {
        self.page
    }

    /// Canonical JSON request body.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<QueryFields> for Query {
    fn from(fields: QueryFields) -> Self {
        Self::new(fields)
    }
}

#[derive(Serialize)]
struct WireQuery<'a> {
    filters: &'a Filter,
    fields: String,
    sort: &'a str,
    reverse: bool,
    results: u8,
    page: u32,
}

impl Serialize for Query {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        WireQuery {
            filters: &self.filter,
            fields: self.fields.join(","),
            sort: &self.sort,
            reverse: self.direction == SortDirection::Descending,
            results: self.results.get(),
            page: self.page.get(),
        }
        .serialize(serializer)
    }
}
