mod constant;
mod interface;
mod network;

pub use constant::*;
pub use interface::*;
pub use network::*;
