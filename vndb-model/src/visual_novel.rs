use crate::{ID, image::Image, tag::Tag};

/// Link to an external website (Wikipedia, official site, stores, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtLink {
    pub url: String,
    pub label: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualNovel {
    pub id: ID,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
    pub description: Option<String>,
    /// Release date as reported upstream: `YYYY-MM-DD`, a partial date such
    /// as `YYYY-MM`, or `TBA`.
    pub released: Option<String>,
    pub length_minutes: Option<u32>,
    /// Bayesian rating on a 10-100 scale.
    pub rating: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extlinks: Vec<ExtLink>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
    pub image: Option<Image>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub screenshots: Vec<Image>,
}
