//! Configuration for the VNDB provider.
//!
//! Every setting comes from a `VNDB_*` environment variable and falls back
//! to its default when unset or unparseable, so loading never fails. The
//! binary loads `.env` with `dotenvy` before calling
//! [`ProviderConfig::from_env`].
#![allow(missing_docs)]

pub mod models;
pub mod util;

pub use models::{
    ENV_ENABLED, ENV_INCLUDE_UNOFFICIAL_RELEASES, ENV_LANGUAGES, ENV_PRIORITY,
    ENV_REQUEST_INTERVAL_MS, ProviderConfig,
};
