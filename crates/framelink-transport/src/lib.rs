//! Byte-channel abstraction for framelink.
//!
//! This is the lowest layer of the workspace. The exchange engine talks
//! to any transport through the [`ByteChannel`] trait; concrete serial
//! or TCP adapters live in host programs. The in-memory
//! [`LoopbackChannel`] ships here so engines can be exercised without
//! real hardware.

pub mod error;
pub mod loopback;
pub mod traits;

pub use error::{ChannelError, Result};
pub use loopback::LoopbackChannel;
pub use traits::ByteChannel;
