use anyhow::{Context, Result};

use crate::{
    configuration::Settings,
    dal::GoogleSheet,
    services::{listing_scraper_handler, load_known_set, Droid, RunSummary, ScrapePlan},
};

pub async fn run(configuration: Settings) -> Result<RunSummary> {
    let sheet = GoogleSheet::connect(&configuration.sheet)
        .await
        .context("Failed to connect to Google Sheets")?;
    let mut known = load_known_set(&sheet).await?;

    let droid = Droid::new(&configuration.application)
        .await
        .context("Failed to launch browser")?;
    let plan = ScrapePlan::from_settings(&configuration);

    let summary = listing_scraper_handler(&droid, &sheet, &mut known, &plan).await;

    if let Err(e) = droid.quit().await {
        log::warn!("Browser session did not close cleanly: {:?}", e);
    }

    Ok(summary)
}
