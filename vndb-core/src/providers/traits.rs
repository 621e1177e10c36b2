use async_trait::async_trait;

use crate::{
    error::{ProviderError, Result},
    metadata::{GameMetadata, MinimalGameMetadata},
};

/// A source of game metadata the host can search and match against.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Stable machine name, stored alongside every record this provider produced.
    fn slug(&self) -> &'static str;

    fn name(&self) -> &'static str;

    /// Higher priorities are consulted first.
    fn priority(&self) -> u32;

    fn enabled(&self) -> bool;

    /// Search for games matching the query
    async fn search(&self, query: &str) -> Result<Vec<MinimalGameMetadata>>;

    /// Full metadata for an id previously returned by this provider.
    async fn get_by_provider_data_id(&self, id: &str) -> Result<GameMetadata>;

    /// Best single candidate for a game title; the first search hit unless
    /// a provider knows better.
    async fn get_best_match(&self, title: &str) -> Result<MinimalGameMetadata> {
        self.search(title).await?.into_iter().next().ok_or_else(|| {
            ProviderError::NotFound(format!(
                "No {} results for '{title}'",
                self.name()
            ))
        })
    }
}
