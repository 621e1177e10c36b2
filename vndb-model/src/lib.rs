//! Entity shapes shared across the VNDB crates.
//!
//! Records returned by the Kana API only carry the fields a query asked for,
//! so every entity here comes paired with a field projection in [`fields`]
//! that requests exactly the members the struct declares.
#![allow(missing_docs)]

pub mod error;
pub mod fields;
pub mod ids;
pub mod image;
pub mod producer;
pub mod release;
pub mod tag;
pub mod visual_novel;

pub use error::{ModelError, Result as ModelResult};
pub use fields::{
    EXTLINK_FIELDS, IMAGE_FIELDS, PRODUCER_FIELDS, RELEASE_LANGUAGE_FIELDS,
    TAG_FIELDS, extend_fields, release_fields, visual_novel_fields,
};
pub use ids::VnId;
pub use image::Image;
pub use producer::{Producer, ProducerType};
pub use release::{Release, ReleaseLanguage, ReleaseProducer};
pub use tag::Tag;
pub use visual_novel::{ExtLink, VisualNovel};

/// Database identifiers are opaque, prefixed strings such as `v17` or `p42`.
pub type ID = String;
