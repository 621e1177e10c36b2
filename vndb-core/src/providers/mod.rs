pub mod traits;
pub mod vndb;

pub use traits::MetadataProvider;
pub use vndb::{ProviderSettings, VndbMetadataProvider, extract_vndb_id};
