#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub(crate) mod test_prelude;

pub mod capability;
pub mod cpu_detect;
pub mod element_width;
pub mod error;

pub use capability::{detect, SimdTier};
pub use element_width::ElementWidth;
pub use error::PlaneValidationError;
