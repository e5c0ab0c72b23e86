//! Ordered first-match text classification.

pub mod cmd;
pub mod predicate;
pub mod table;

pub use table::{RouteRules, SubTypeTable};
