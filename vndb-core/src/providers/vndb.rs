use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use vndb_model::VnId;

use super::traits::MetadataProvider;
use crate::{
    aggregate::LanguagePriority,
    client::VndbClient,
    error::{ProviderError, Result},
    metadata::{
        GameMetadata, MinimalGameMetadata, PROVIDER_NAME, PROVIDER_SLUG,
        game_metadata, minimal_game_metadata,
    },
};

/// Search hits returned to the host per query.
pub const SEARCH_LIMIT: usize = 50;
/// Releases considered when building full metadata.
pub const RELEASE_LIMIT: usize = 100;

static VNDB_ID_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[vndbid-(?<id>\d+)\]").expect("vndbid tag regex should compile")
});

/// Digits of a `[vndbid-<digits>]` tag embedded in a game title.
pub fn extract_vndb_id(title: &str) -> Option<&str> {
    VNDB_ID_TAG
        .captures(title)
        .and_then(|caps| caps.name("id"))
        .map(|id| id.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSettings {
    pub enabled: bool,
    pub priority: u32,
    pub include_unofficial_releases: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: 5,
            include_unofficial_releases: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VndbMetadataProvider {
    client: VndbClient,
    settings: ProviderSettings,
    languages: LanguagePriority,
}

impl VndbMetadataProvider {
    /// Companies are ordered by the client's configured languages.
    pub fn new(client: VndbClient, settings: ProviderSettings) -> Self {
        let languages = LanguagePriority::new(client.languages().iter().cloned());
        Self {
            client,
            settings,
            languages,
        }
    }

    pub fn client(&self) -> &VndbClient {
        &self.client
    }

    pub fn settings(&self) -> ProviderSettings {
        self.settings
    }
}

#[async_trait]
impl MetadataProvider for VndbMetadataProvider {
    fn slug(&self) -> &'static str {
        PROVIDER_SLUG
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn priority(&self) -> u32 {
        self.settings.priority
    }

    fn enabled(&self) -> bool {
        self.settings.enabled
    }

    async fn search(&self, query: &str) -> Result<Vec<MinimalGameMetadata>> {
        let listing = self.client.search_visual_novels(query, SEARCH_LIMIT).await?;
        if listing.more {
            warn!(
                query,
                shown = listing.items.len(),
                "Too many visual novels fit the search criteria, only showing the first entries"
            );
        }

        Ok(listing.items.iter().map(minimal_game_metadata).collect())
    }

    async fn get_by_provider_data_id(&self, id: &str) -> Result<GameMetadata> {
        let vn = self.client.get_visual_novel(id).await?;
        let releases = self
            .client
            .get_visual_novel_releases(
                &vn.id,
                RELEASE_LIMIT,
                self.settings.include_unofficial_releases,
            )
            .await?;
        if releases.more {
            warn!(
                vn = %vn.id,
                considered = releases.items.len(),
                "Too many releases belong to visual novel, only the first entries are considered"
            );
        }

        Ok(game_metadata(&vn, &releases.items, &self.languages))
    }

    async fn get_best_match(&self, title: &str) -> Result<MinimalGameMetadata> {
        // a tag that names no valid id is treated like an unknown one
        match extract_vndb_id(title).map(VnId::parse) {
            Some(Ok(id)) => {
                debug!(%id, title, "Attempting id based lookup from title tag");
                match self.client.get_visual_novel(id.as_str()).await {
                    Ok(vn) => return Ok(minimal_game_metadata(&vn)),
                    Err(err) if err.is_not_found() => {
                        warn!(
                            error = %err,
                            title,
                            "Unable to use id based lookup, falling back to search"
                        );
                    }
                    Err(err) => return Err(err),
                }
            }
            Some(Err(err)) => {
                warn!(
                    error = %err,
                    title,
                    "Ignoring unusable vndbid tag, falling back to search"
                );
            }
            None => {}
        }

        let hits = self.search(title).await?;
        hits.into_iter().next().ok_or_else(|| {
            ProviderError::NotFound(format!(
                "No VNDB results for '{title}'"
            ))
        })
    }
}
