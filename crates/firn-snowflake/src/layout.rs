use crate::error::Error;

/// Payload bits available in an `i64` with the sign bit unused.
const PAYLOAD_BITS: u32 = 63;

/// Bit allocation for the four fields of a generated ID.
///
/// Fields are packed most-significant first: timestamp, user, machine,
/// sequence. The sign bit never carries payload, so the widths must sum to
/// at most 63. A field may be zero bits wide, in which case its only legal
/// value is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    timestamp_bits: u32,
    user_bits: u32,
    machine_bits: u32,
    sequence_bits: u32,
}

impl Default for Layout {
    /// 41-bit timestamp, no user field, 5-bit machine id, 12-bit sequence.
    fn default() -> Self {
        Self::new(41, 0, 5, 12)
    }
}

impl Layout {
    pub const fn new(
        timestamp_bits: u32,
        user_bits: u32,
        machine_bits: u32,
        sequence_bits: u32,
    ) -> Self {
        Self {
            timestamp_bits,
            user_bits,
            machine_bits,
            sequence_bits,
        }
    }

    /// Rejects layouts whose payload would spill into the sign bit.
    pub fn validate(&self) -> Result<(), Error> {
        let total_bits =
            self.timestamp_bits + self.user_bits + self.machine_bits + self.sequence_bits;
        if total_bits > PAYLOAD_BITS {
            return Err(Error::InvalidLayout { total_bits });
        }
        Ok(())
    }

    pub const fn timestamp_bits(&self) -> u32 {
        self.timestamp_bits
    }

    /// Largest elapsed time (in the clock unit, milliseconds) that fits the
    /// timestamp field.
    pub const fn max_elapsed_millis(&self) -> i64 {
        field_mask(self.timestamp_bits)
    }

    pub const fn max_user_id(&self) -> i64 {
        field_mask(self.user_bits)
    }

    pub const fn max_machine_id(&self) -> i64 {
        field_mask(self.machine_bits)
    }

    pub const fn max_sequence(&self) -> i64 {
        field_mask(self.sequence_bits)
    }

    pub const fn machine_shift(&self) -> u32 {
        self.sequence_bits
    }

    pub const fn user_shift(&self) -> u32 {
        self.sequence_bits + self.machine_bits
    }

    pub const fn timestamp_shift(&self) -> u32 {
        self.user_shift() + self.user_bits
    }

    /// Packs the four fields into a single non-negative `i64`.
    ///
    /// Callers are responsible for keeping each value within its field's
    /// range; out-of-range values bleed into neighboring fields.
    pub const fn compose(
        &self,
        elapsed_millis: i64,
        user_id: i64,
        machine_id: i64,
        sequence: i64,
    ) -> i64 {
        elapsed_millis << self.timestamp_shift()
            | user_id << self.user_shift()
            | machine_id << self.machine_shift()
            | sequence
    }

    /// Reverses [`Self::compose`]: `(elapsed_millis, user_id, machine_id,
    /// sequence)`.
    pub const fn split(&self, id: i64) -> (i64, i64, i64, i64) {
        (
            (id >> self.timestamp_shift()) & field_mask(self.timestamp_bits),
            (id >> self.user_shift()) & field_mask(self.user_bits),
            (id >> self.machine_shift()) & field_mask(self.machine_bits),
            id & field_mask(self.sequence_bits),
        )
    }
}

/// All-ones mask covering the low `bits` bits; zero when `bits` is zero.
const fn field_mask(bits: u32) -> i64 {
    !(!0_i64 << bits)
}
