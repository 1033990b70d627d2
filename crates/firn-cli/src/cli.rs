use clap::Parser;

pub const MACHINE_ID_ENV: &str = "FIRN_MACHINE_ID";
pub const USER_ID_ENV: &str = "FIRN_USER_ID";
pub const COUNT_ENV: &str = "FIRN_COUNT";

#[derive(Debug, Parser)]
#[command(name = "firn")]
pub struct CLI {
    /// Machine index embedded in every generated id.
    #[arg(long, env = MACHINE_ID_ENV, default_value_t = 0)]
    pub machine_id: i64,

    /// Secondary discriminator; inert under the default bit layout.
    #[arg(long, env = USER_ID_ENV, default_value_t = 0)]
    pub user_id: i64,

    /// How many ids to generate.
    #[arg(long, env = COUNT_ENV, default_value_t = 4)]
    pub count: u32,
}
