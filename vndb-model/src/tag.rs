use crate::ID;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub id: ID,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
}
