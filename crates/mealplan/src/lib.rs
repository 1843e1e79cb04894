mod assemble;
mod constraints;
mod document;
mod editor;
mod kid;
mod score;
mod season;
mod select;
mod strategy;

pub use assemble::*;
pub use constraints::*;
pub use document::*;
pub use editor::*;
pub use kid::*;
pub use score::*;
pub use season::*;
pub use select::*;
pub use strategy::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod service;

        pub use service::*;
    }
}
