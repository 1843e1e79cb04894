mod note;
mod vault;

pub use note::*;
pub use vault::*;
