//! Field projections sent with each query.
//!
//! Nested members are requested with dotted paths (`tags.name`), so the
//! projections for embedded records are composed with [`extend_fields`].

pub const IMAGE_FIELDS: &[&str] = &["id", "url", "thumbnail"];
pub const TAG_FIELDS: &[&str] = &["id", "name", "aliases"];
pub const EXTLINK_FIELDS: &[&str] = &["url", "label", "name"];
pub const PRODUCER_FIELDS: &[&str] = &["id", "name", "aliases", "lang", "type"];
pub const RELEASE_LANGUAGE_FIELDS: &[&str] = &["lang", "title", "main"];

const VISUAL_NOVEL_SCALARS: &[&str] = &[
    "id",
    "title",
    "aliases",
    "description",
    "released",
    "length_minutes",
    "rating",
];

const RELEASE_SCALARS: &[&str] = &["id", "title", "minage", "official"];

const RELEASE_PRODUCER_FLAGS: &[&str] = &["developer", "publisher"];

/// Prefix every field with `prefix`, e.g. `("tags.", ["id"])` -> `["tags.id"]`.
pub fn extend_fields(prefix: &str, fields: &[&str]) -> Vec<String> {
    fields.iter().map(|field| format!("{prefix}{field}")).collect()
}

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|field| (*field).to_string()).collect()
}

pub fn visual_novel_fields() -> Vec<String> {
    let mut fields = owned(VISUAL_NOVEL_SCALARS);
    fields.extend(extend_fields("extlinks.", EXTLINK_FIELDS));
    fields.extend(extend_fields("tags.", TAG_FIELDS));
    fields.extend(extend_fields("image.", IMAGE_FIELDS));
    fields.extend(extend_fields("screenshots.", IMAGE_FIELDS));
    fields
}

pub fn release_fields() -> Vec<String> {
    let mut fields = owned(RELEASE_SCALARS);
    fields.extend(extend_fields("languages.", RELEASE_LANGUAGE_FIELDS));
    fields.extend(extend_fields("producers.", PRODUCER_FIELDS));
    fields.extend(extend_fields("producers.", RELEASE_PRODUCER_FLAGS));
    fields
}
