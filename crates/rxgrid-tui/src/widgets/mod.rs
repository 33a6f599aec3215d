//! Reusable view widgets for the catalog screen.

pub mod company_filter;
pub mod pagination;
