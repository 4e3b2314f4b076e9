#![forbid(unsafe_code)]

mod defaults;
mod model;
mod normalize;
mod ops;
mod resolve;
mod store;

pub use defaults::*;
pub use model::*;
pub use normalize::*;
pub use ops::*;
pub use resolve::*;
pub use store::*;
