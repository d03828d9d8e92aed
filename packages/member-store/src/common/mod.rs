// Common value types shared across the data-access layer

pub mod paging;
pub mod range;

pub use paging::{Direction, Page, PageRequest, Sort, SortOrder};
pub use range::RangeSpec;
