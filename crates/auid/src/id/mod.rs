mod auid;
mod error;
mod info;

pub use auid::*;
pub use error::*;
pub use info::*;
