//! Distributed, time-ordered unique ID generation.
//!
//! Each generated value packs a relative timestamp, a machine discriminator
//! and a per-millisecond sequence counter into a single non-negative `i64`,
//! so IDs issued later compare numerically larger. Machine identity is
//! assigned externally; generators on different machines never collide.

mod clock;
pub mod error;
mod id;
mod layout;
mod shared;
mod snowflake;

pub use clock::{Clock, SystemClock};
pub use error::Error;
pub use id::DecodedId;
pub use layout::Layout;
pub use shared::shared_generator;
pub use snowflake::{default_epoch, Snowflake, SnowflakeSettings, DEFAULT_EPOCH_MILLIS};
