//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the expense tracker here: categories,
//! keyword rules, expenses and income.

pub mod category;
pub mod expense;
pub mod income;
pub mod rule;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::category::Entity as Category;
    pub use super::expense::Entity as Expense;
    pub use super::expense::ExpenseWithCategory;
    pub use super::income::Entity as Income;
    pub use super::rule::Entity as Rule;
}
