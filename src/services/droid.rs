use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::json;
use thirtyfour::{
    extensions::cdp::ChromeDevTools, prelude::*, ChromiumLikeCapabilities, DesiredCapabilities,
};
use tokio::time::Instant;
use url::Url;

use crate::{
    configuration::ApplicationSettings,
    domain::{EntryCard, Query},
};

use super::SearchSurface;

const FEED_SELECTOR: &str = r#"div[role="feed"]"#;
const CARD_SELECTOR: &str = r#"div[role="article"]"#;
const WEBSITE_SELECTOR: &str = r#"a[data-value="Website"]"#;
const NAME_SELECTOR: &str = "div.fontHeadlineSmall";

const SCROLL_FEED_SCRIPT: &str = "arguments[0].scrollBy(0, arguments[0].scrollHeight);";
const FEED_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct Droid {
    pub driver: WebDriver,
    search_base_url: Url,
    navigation_timeout: Duration,
}

impl Droid {
    pub async fn new(settings: &ApplicationSettings) -> Result<Self> {
        let search_base_url = Url::parse(&settings.search_base_url)
            .with_context(|| format!("Invalid search url: {}", settings.search_base_url))?;

        let mut caps = DesiredCapabilities::chrome();
        if settings.headless {
            caps.set_headless()?;
        }
        caps.add_arg("--disable-blink-features=AutomationControlled")?;
        caps.add_arg(&format!("--user-agent={}", settings.user_agent))?;
        caps.add_arg(&format!("--lang={}", settings.locale))?;
        caps.add_arg("--window-size=1920,1080")?;

        let driver = WebDriver::new(settings.webdriver_url.as_str(), caps)
            .await
            .with_context(|| format!("Failed to start browser via {}", settings.webdriver_url))?;
        driver
            .set_page_load_timeout(settings.navigation_timeout())
            .await?;

        let dev_tools = ChromeDevTools::new(driver.handle.clone());
        if let Err(e) = dev_tools
            .execute_cdp_with_params(
                "Emulation.setTimezoneOverride",
                json!({ "timezoneId": settings.timezone }),
            )
            .await
        {
            log::warn!("Could not set browser timezone to {}: {:?}", settings.timezone, e);
        }

        log::info!("Browser session started (headless: {})", settings.headless);

        Ok(Droid {
            driver,
            search_base_url,
            navigation_timeout: settings.navigation_timeout(),
        })
    }

    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }

    async fn wait_for_feed(&self) -> WebDriverResult<bool> {
        let deadline = Instant::now() + self.navigation_timeout;

        loop {
            if !self.driver.find_all(By::Css(FEED_SELECTOR)).await?.is_empty() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(FEED_POLL_INTERVAL).await;
        }
    }

    async fn read_card(card: &WebElement) -> WebDriverResult<EntryCard> {
        let website = match card.find_all(By::Css(WEBSITE_SELECTOR)).await?.first() {
            Some(link) => link.attr("href").await?,
            None => None,
        };

        let Some(website) = website.filter(|w| !w.trim().is_empty()) else {
            return Ok(EntryCard::default());
        };

        let name = match card.find_all(By::Css(NAME_SELECTOR)).await?.first() {
            Some(label) => Some(label.text().await?.trim().to_string()),
            None => None,
        };

        Ok(EntryCard {
            name,
            website: Some(website.trim().to_string()),
        })
    }
}

/// `{base}{query}` with spaces turned into `+`.
pub fn build_search_url(base: &Url, query: &Query) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("Search url cannot be a base: {}", base))?
        .pop_if_empty()
        .push(&query.text().replace(' ', "+"));

    Ok(url)
}

#[async_trait]
impl SearchSurface for Droid {
    async fn navigate(&self, query: &Query) -> Result<bool> {
        let url = build_search_url(&self.search_base_url, query)?;

        self.driver
            .goto(url.as_str())
            .await
            .with_context(|| format!("Failed to load {}", url))?;

        Ok(self.wait_for_feed().await?)
    }

    async fn scroll_step(&self) -> Result<()> {
        let feed = self.driver.find(By::Css(FEED_SELECTOR)).await?;
        self.driver
            .execute(SCROLL_FEED_SCRIPT, vec![feed.to_json()?])
            .await?;

        Ok(())
    }

    async fn entry_count(&self) -> Result<usize> {
        Ok(self.driver.find_all(By::Css(CARD_SELECTOR)).await?.len())
    }

    async fn extract_entries(&self) -> Result<Vec<Result<EntryCard>>> {
        let cards = self.driver.find_all(By::Css(CARD_SELECTOR)).await?;
        let mut entries = Vec::with_capacity(cards.len());

        for card in cards.iter() {
            entries.push(Droid::read_card(card).await.map_err(anyhow::Error::from));
        }

        Ok(entries)
    }
}
