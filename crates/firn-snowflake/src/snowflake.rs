use crate::{
    clock::{Clock, SystemClock},
    error::Error,
    id::DecodedId,
    layout::Layout,
};
use jiff::Timestamp;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use typed_builder::TypedBuilder;

/// Millisecond timestamp of the 2018-01-01 reference instant, the default
/// zero point for the timestamp field.
pub const DEFAULT_EPOCH_MILLIS: i64 = 1_514_736_000_000;

/// How long a sequence-rollover wait may block before the wall clock is
/// declared stalled. A healthy clock resolves the wait within a millisecond.
const MAX_CLOCK_STALL: Duration = Duration::from_millis(100);

/// Returns the default 2018-01-01 epoch as a [`Timestamp`].
pub fn default_epoch() -> Timestamp {
    Timestamp::from_millisecond(DEFAULT_EPOCH_MILLIS).expect("default epoch is a valid timestamp")
}

/// Configures a Snowflake generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct SnowflakeSettings {
    /// A unique machine index in `[0, layout.max_machine_id()]`.
    #[builder]
    pub machine_id: i64,
    /// Optional secondary discriminator; inert under the default layout,
    /// which gives it zero bits.
    #[builder(default = 0)]
    pub user_id: i64,
    /// Custom epoch used as the zero point for the timestamp field.
    #[builder(default = default_epoch())]
    pub epoch: Timestamp,
    /// Bit allocation for the ID fields.
    #[builder(default)]
    pub layout: Layout,
}

#[derive(Debug, Default)]
struct GeneratorState {
    /// Wall-clock millisecond of the most recently issued ID; `None` until
    /// the first ID is issued.
    last_millis: Option<i64>,
    sequence: i64,
}

/// Snowflake ID generator: timestamp, user, machine and sequence fields
/// packed into one non-negative `i64`, millisecond resolution.
pub struct Snowflake<C: Clock> {
    epoch_millis: i64,
    layout: Layout,
    user_id: i64,
    machine_id: i64,
    clock: C,
    state: Mutex<GeneratorState>,
}

impl<C: Clock> fmt::Debug for Snowflake<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snowflake")
            .field("epoch_millis", &self.epoch_millis)
            .field("layout", &self.layout)
            .field("user_id", &self.user_id)
            .field("machine_id", &self.machine_id)
            .finish_non_exhaustive()
    }
}

impl Snowflake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: SnowflakeSettings) -> Result<Self, Error> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Snowflake<C> {
    pub(crate) fn with_clock(settings: SnowflakeSettings, clock: C) -> Result<Self, Error> {
        settings.layout.validate()?;

        if settings.machine_id < 0 || settings.machine_id > settings.layout.max_machine_id() {
            return Err(Error::InvalidMachineId {
                machine_id: settings.machine_id,
                max_machine_id: settings.layout.max_machine_id(),
            });
        }
        if settings.user_id < 0 || settings.user_id > settings.layout.max_user_id() {
            return Err(Error::InvalidUserId {
                user_id: settings.user_id,
                max_user_id: settings.layout.max_user_id(),
            });
        }

        let now = clock.now();
        if settings.epoch > now {
            return Err(Error::EpochAhead {
                epoch: settings.epoch,
                now,
            });
        }

        Ok(Self {
            epoch_millis: settings.epoch.as_millisecond(),
            layout: settings.layout,
            user_id: settings.user_id,
            machine_id: settings.machine_id,
            clock,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    /// Generates the next unique ID.
    ///
    /// Calls are serialized on the internal state lock, and the returned
    /// values are strictly increasing across that order as long as the clock
    /// does not regress. A regressed clock fails the call with
    /// [`Error::ClockMovedBackwards`] without touching any state, so a later
    /// call with a recovered clock succeeds normally.
    ///
    /// Exhausting the per-millisecond sequence is not an error: the call
    /// waits for the clock to tick and issues from the next millisecond.
    pub fn next_id(&self) -> Result<i64, Error> {
        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        let mut now = self.clock.now().as_millisecond();
        // Worked on locally so failed calls leave the state untouched.
        let mut sequence = state.sequence;

        match state.last_millis {
            Some(last) if now < last => {
                return Err(Error::ClockMovedBackwards {
                    last_millis: last,
                    now_millis: now,
                });
            }
            Some(last) if now == last => {
                sequence = (sequence + 1) & self.layout.max_sequence();
                if sequence == 0 {
                    // Sequence space for this millisecond is exhausted; issue
                    // from the next one.
                    now = self.next_millis(last)?;
                }
            }
            _ => {
                // New millisecond (or very first call): the sequence restarts.
                sequence = 0;
            }
        }

        let elapsed = now - self.epoch_millis;
        // The unsigned compare also rejects a negative elapsed time.
        if elapsed as u64 > self.layout.max_elapsed_millis() as u64 {
            return Err(Error::TimestampOverflow {
                timestamp_bits: self.layout.timestamp_bits(),
            });
        }

        state.last_millis = Some(now);
        state.sequence = sequence;

        Ok(self
            .layout
            .compose(elapsed, self.user_id, self.machine_id, sequence))
    }

    /// Waits until the clock reads strictly later than `last`, returning the
    /// new millisecond.
    fn next_millis(&self, last: i64) -> Result<i64, Error> {
        let target =
            Timestamp::from_millisecond(last + 1).expect("next millisecond is a valid timestamp");
        let started = Instant::now();
        loop {
            let now = self.clock.now().as_millisecond();
            if now > last {
                return Ok(now);
            }
            let waited = started.elapsed();
            if waited >= MAX_CLOCK_STALL {
                return Err(Error::ClockStalled {
                    last_millis: last,
                    waited,
                });
            }
            self.clock.wait_until(target);
        }
    }

    /// Recovers the fields of a previously generated ID.
    ///
    /// Pure bit arithmetic: takes no locks and touches no generator state.
    /// Only meaningful for IDs produced with this generator's epoch and
    /// layout.
    pub fn decode(&self, id: i64) -> DecodedId {
        let (elapsed, user_id, machine_id, sequence) = self.layout.split(id);
        DecodedId {
            timestamp_millis: self.epoch_millis + elapsed,
            user_id,
            machine_id,
            sequence,
        }
    }

    pub fn machine_id(&self) -> i64 {
        self.machine_id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }
}
