pub mod builder;
pub mod filter;
pub mod types;

pub use builder::FilterBuilder;
pub use filter::{Condition, Filter, FilterValue, Operator, Reduction, Reductor};
pub use types::{MAX_PAGE_SIZE, PageSize, Query, QueryFields, SortDirection};
