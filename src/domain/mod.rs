pub mod known_set;
pub mod listing;
pub mod query;

pub use known_set::*;
pub use listing::*;
pub use query::*;
