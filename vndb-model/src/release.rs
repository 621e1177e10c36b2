use crate::{ID, producer::Producer};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseLanguage {
    pub lang: String,
    pub title: Option<String>,
    pub main: bool,
}

/// A producer as credited on one release.
///
/// The same producer shows up once per release that credits it, so lists
/// collected across releases need deduplication by `producer.id`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseProducer {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub producer: Producer,
    pub developer: bool,
    pub publisher: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Release {
    pub id: ID,
    pub title: String,
    /// Minimum age rating, `None` when unknown.
    pub minage: Option<u8>,
    pub official: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub languages: Vec<ReleaseLanguage>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub producers: Vec<ReleaseProducer>,
}
