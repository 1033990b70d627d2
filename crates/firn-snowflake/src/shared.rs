use crate::{
    clock::SystemClock,
    error::Error,
    snowflake::{Snowflake, SnowflakeSettings},
};
use std::sync::{Arc, Mutex, OnceLock};

static SHARED: OnceLock<Arc<Snowflake<SystemClock>>> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Returns the process-wide shared generator, constructing it on first use.
///
/// The first caller's `machine_id` configures the instance (default layout
/// and epoch); later calls return the same instance and ignore the argument.
/// Concurrent first use constructs at most one generator: a fast-path check,
/// then the init lock, then a re-check. Construction failures are returned
/// to the caller and nothing is cached, so a later call with a valid machine
/// id can still initialize.
///
/// Prefer owning a [`Snowflake`] constructed at startup and passing it by
/// shared reference; this accessor exists for embedders that cannot thread
/// one through.
pub fn shared_generator(machine_id: i64) -> Result<Arc<Snowflake<SystemClock>>, Error> {
    if let Some(generator) = SHARED.get() {
        return Ok(Arc::clone(generator));
    }

    let _init = INIT.lock().map_err(|_| Error::StatePoisoned)?;
    if let Some(generator) = SHARED.get() {
        return Ok(Arc::clone(generator));
    }

    let settings = SnowflakeSettings::builder().machine_id(machine_id).build();
    let generator = Arc::new(Snowflake::new(settings)?);
    // The init lock is held, so this is the only writer.
    let _ = SHARED.set(Arc::clone(&generator));
    Ok(generator)
}
