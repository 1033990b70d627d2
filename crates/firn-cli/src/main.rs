mod cli;

use crate::cli::CLI;
use clap::Parser;
use firn_snowflake::{Snowflake, SnowflakeSettings};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        machine_id = config.machine_id,
        user_id = config.user_id,
        count = config.count,
        "starting id generator demo"
    );

    let settings = SnowflakeSettings::builder()
        .machine_id(config.machine_id)
        .user_id(config.user_id)
        .build();
    let generator = Snowflake::new(settings)?;

    for _ in 0..config.count {
        let id = generator.next_id()?;
        let decoded = generator.decode(id);
        let issued_at = decoded
            .timestamp()
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| format!("{}ms", decoded.timestamp_millis));
        info!(
            id,
            issued_at = %issued_at,
            user_id = decoded.user_id,
            machine_id = decoded.machine_id,
            sequence = decoded.sequence,
            "generated id"
        );
    }

    Ok(())
}
