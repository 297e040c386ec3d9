//! Visual surface.
//!
//! `card` is the renderer-neutral view model of a node; `dom` draws it into
//! the browser and measures it back.

pub mod card;
#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use card::NodeCard;
