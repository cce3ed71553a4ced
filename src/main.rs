use anyhow::Context;
use env_logger::Env;
use mapscout::{configuration::get_configuration, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let summary = run(configuration).await?;
    log::info!("Run finished with {} new rows in Google Sheets", summary.appended);

    Ok(())
}
