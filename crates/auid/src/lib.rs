//! # auid
//!
//! Compact, sortable, 63-bit unique identifiers.
//!
//! An [`Auid`] packs `[timestamp | origin id | sequence]` into the low 63 bits
//! of a 64-bit integer and carries a cached, fixed-width (11 character)
//! Base62 rendering whose lexicographic order matches the numeric order.
//!
//! ```
//! use auid::{AuidFactory, BitLayout, ConstantOriginId, ManualClock};
//!
//! let clock = ManualClock::new(0);
//! let factory = AuidFactory::new(BitLayout::default(), &ConstantOriginId::new(0), clock)?;
//!
//! let a = factory.new_id()?;
//! let b = factory.new_id()?;
//! assert_eq!(a.as_str(), "00000000000");
//! assert_eq!(b.as_str(), "00000000001");
//! assert!(a < b);
//! # Ok::<(), auid::Error>(())
//! ```

mod base62;
mod error;
mod generator;
mod id;
mod layout;
mod origin;
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::base62::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::layout::*;
pub use crate::origin::*;
pub use crate::time::*;
