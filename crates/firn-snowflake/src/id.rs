use jiff::Timestamp;

/// The constituent fields of a generated ID, recovered by
/// [`Snowflake::decode`](crate::Snowflake::decode).
///
/// `timestamp_millis` is the absolute wall-clock millisecond at which the ID
/// was issued (the generator's epoch added back), not the raw field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedId {
    pub timestamp_millis: i64,
    pub user_id: i64,
    pub machine_id: i64,
    pub sequence: i64,
}

impl DecodedId {
    /// The issue instant as a [`Timestamp`], when it fits the supported
    /// time range.
    pub fn timestamp(&self) -> Option<Timestamp> {
        Timestamp::from_millisecond(self.timestamp_millis).ok()
    }
}
