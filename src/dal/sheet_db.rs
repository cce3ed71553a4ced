use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::configuration::SheetSettings;

use super::{CredentialSource, RecordStore, ServiceAccountAuth};

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

pub struct GoogleSheet {
    client: Client,
    auth: ServiceAccountAuth,
    api_base_url: Url,
    sheet_id: String,
    worksheet_name: String,
}

impl GoogleSheet {
    /// Loads credentials and fetches a first token, so that bad credentials
    /// fail the run before the browser is started.
    pub async fn connect(settings: &SheetSettings) -> Result<Self> {
        let key = CredentialSource::from_settings(settings).load()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        let auth = ServiceAccountAuth::new(client.clone(), key)?;

        let sheet = GoogleSheet::new(
            client,
            auth,
            &settings.api_base_url,
            &settings.sheet_id,
            &settings.worksheet_name,
        )?;
        sheet.auth.access_token().await?;

        log::info!(
            "Connected to worksheet '{}' as {}",
            sheet.worksheet_name,
            sheet.auth.client_email()
        );

        Ok(sheet)
    }

    pub fn new(
        client: Client,
        auth: ServiceAccountAuth,
        api_base_url: &str,
        sheet_id: &str,
        worksheet_name: &str,
    ) -> Result<Self> {
        let api_base_url = Url::parse(api_base_url)
            .with_context(|| format!("Invalid Sheets API url: {}", api_base_url))?;

        Ok(GoogleSheet {
            client,
            auth,
            api_base_url,
            sheet_id: sheet_id.to_string(),
            worksheet_name: worksheet_name.to_string(),
        })
    }

    fn whole_range(&self) -> String {
        format!("'{}'", self.worksheet_name.replace('\'', "''"))
    }

    fn header_range(&self) -> String {
        format!("{}!1:1", self.whole_range())
    }

    fn values_url(&self, range_segment: &str) -> Result<Url> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets API url cannot be a base: {}", self.api_base_url))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.sheet_id.as_str(), "values"])
            .push(range_segment);

        Ok(url)
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .get(self.values_url(range)?)
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("Failed to read range {}", range))?;

        let values: ValueRange = check(response, "read")
            .await?
            .json()
            .await
            .context("Sheets API returned an unexpected value range")?;

        Ok(values.values)
    }

    async fn clear(&self) -> Result<()> {
        let token = self.auth.access_token().await?;
        let range = format!("{}:clear", self.whole_range());
        let response = self
            .client
            .post(self.values_url(&range)?)
            .bearer_auth(token)
            .json(&json!({}))
            .send()
            .await
            .context("Failed to clear worksheet")?;

        check(response, "clear").await?;
        Ok(())
    }
}

async fn check(response: Response, operation: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(anyhow!(
        "Sheets {} request failed with status {}: {}",
        operation,
        status,
        body
    ))
}

#[async_trait]
impl RecordStore for GoogleSheet {
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        self.get_values(&self.whole_range()).await
    }

    async fn ensure_header(&self, header: &[&str]) -> Result<()> {
        let first_row = self
            .get_values(&self.header_range())
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        if first_row.iter().map(String::as_str).eq(header.iter().copied()) {
            return Ok(());
        }

        log::warn!(
            "Worksheet '{}' header is {:?}, clearing it and writing {:?}",
            self.worksheet_name,
            first_row,
            header
        );

        self.clear().await?;
        self.append_rows(vec![header.iter().map(|h| h.to_string()).collect()])
            .await
    }

    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<()> {
        let token = self.auth.access_token().await?;
        let range = format!("{}:append", self.whole_range());
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let row_count = rows.len();
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "majorDimension": "ROWS", "values": rows }))
            .send()
            .await
            .context("Failed to append rows")?;

        check(response, "append").await?;
        log::debug!("Appended {} rows to '{}'", row_count, self.worksheet_name);

        Ok(())
    }
}
