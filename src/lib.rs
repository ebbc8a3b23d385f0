#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod commands;
pub mod common;
mod constants;
mod driver;
mod error;
pub mod power;

pub use commands::Operation;
pub use constants::BASE_ADDRESS;
pub use driver::Ad569x;
#[cfg(feature = "async")]
pub use driver::asynch::Ad569xAsync;
pub use error::{Error, InvalidArgument};

/// Codes read back from the device, one per selected channel, channel A first.
pub type Readback = heapless::Vec<u16, 4>;
