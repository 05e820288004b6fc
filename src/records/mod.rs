pub mod catalog;
pub mod filter;

pub use catalog::{builtin_filters, RecordFilterCatalog};
pub use filter::{
    matches_filter, Comparator, Condition, FilterValue, FlagField, PositionField, RecordFilter,
};
