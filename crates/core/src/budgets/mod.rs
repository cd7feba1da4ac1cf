//! Budgets module - domain models, aggregation, services, and traits.

mod budgets_aggregation;
mod budgets_model;
mod budgets_service;
mod budgets_traits;

pub use budgets_aggregation::aggregate_budgets;
pub use budgets_model::{Budget, BudgetAggregation, NewBudget};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
