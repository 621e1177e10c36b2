use crate::ID;

/// Company, individual or amateur group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProducerType {
    #[cfg_attr(feature = "serde", serde(rename = "co"))]
    Company,
    #[cfg_attr(feature = "serde", serde(rename = "in"))]
    Individual,
    #[cfg_attr(feature = "serde", serde(rename = "ng"))]
    AmateurGroup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Producer {
    pub id: ID,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
    /// Primary language as an ISO code, e.g. `ja` or `en`.
    pub lang: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ProducerType,
}
