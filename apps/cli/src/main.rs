mod commands;
mod config;
mod main_lib;

use commands::Command;
use config::CliConfig;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let command = Command::parse(std::env::args().skip(1))?;
    let config = CliConfig::from_env()?;
    let state = build_state(&config).await?;

    let output = command.run(&state).await?;
    println!("{}", output);
    Ok(())
}
