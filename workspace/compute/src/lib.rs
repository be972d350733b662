//! Decision and aggregation logic of the expense tracker.
//!
//! * [`categorize`] picks a category for a new expense from the keyword rules.
//! * [`aggregate`] groups a list of expenses into per-category buckets.
//! * [`balance`] reads income and expense totals from the store.

pub mod aggregate;
pub mod balance;
pub mod categorize;
pub mod error;

pub use aggregate::{
    aggregate, CategoryBucket, CategoryKey, ExpenseSummary, UNCATEGORIZED_COLOR, UNCATEGORIZED_KEY,
    UNCATEGORIZED_NAME,
};
pub use balance::Totals;
pub use categorize::{categorize, KeywordRule};
pub use error::{ComputeError, Result};
