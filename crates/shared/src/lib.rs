pub mod document;
mod error;
pub mod mealplan;
mod random;
pub mod recipe;
pub mod store;

pub use error::*;
pub use random::*;
