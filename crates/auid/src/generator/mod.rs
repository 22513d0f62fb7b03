mod error;
mod factory;
mod interface;
mod mutex;
mod status;
#[cfg(test)]
mod tests;

pub use error::*;
pub use factory::*;
pub use interface::*;
pub(crate) use mutex::*;
pub use status::*;
