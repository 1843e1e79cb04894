mod aggregation;
mod list;

pub use aggregation::*;
pub use list::*;
