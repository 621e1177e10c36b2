use crate::ID;

/// Cover art or screenshot reference.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image {
    pub id: ID,
    pub url: String,
    pub thumbnail: String,
}
