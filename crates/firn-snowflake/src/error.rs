use jiff::Timestamp;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by generator construction and ID generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid machine id {machine_id}; expected 0..={max_machine_id}")]
    InvalidMachineId { machine_id: i64, max_machine_id: i64 },
    #[error("invalid user id {user_id}; expected 0..={max_user_id}")]
    InvalidUserId { user_id: i64, max_user_id: i64 },
    #[error("bit layout allocates {total_bits} payload bits; at most 63 fit an i64")]
    InvalidLayout { total_bits: u32 },
    #[error("epoch is ahead of current clock time: epoch={epoch}, now={now}")]
    EpochAhead { epoch: Timestamp, now: Timestamp },
    #[error("clock moved backwards: last id issued at {last_millis}ms, clock reads {now_millis}ms")]
    ClockMovedBackwards { last_millis: i64, now_millis: i64 },
    #[error("clock failed to advance past {last_millis}ms after {waited:?}")]
    ClockStalled { last_millis: i64, waited: Duration },
    #[error("elapsed time since epoch no longer fits the {timestamp_bits}-bit timestamp field")]
    TimestampOverflow { timestamp_bits: u32 },
    #[error("generator state lock is poisoned")]
    StatePoisoned,
}
