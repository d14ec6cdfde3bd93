pub mod activity;
pub mod query;

pub use activity::*;
pub use query::*;
