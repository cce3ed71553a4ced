use anyhow::Result;

use crate::{
    configuration::{DelaySettings, Settings},
    dal::RecordStore,
    domain::{KnownSet, Query, QueryGrid},
};

use super::{collect_listings, persist_new_records, SearchSurface};

#[derive(Debug, Clone)]
pub struct ScrapePlan {
    pub grid: QueryGrid,
    pub max_scrolls: u32,
    pub delays: DelaySettings,
}

impl ScrapePlan {
    pub fn from_settings(settings: &Settings) -> Self {
        ScrapePlan {
            grid: QueryGrid::new(
                settings.enumeration.query_templates.clone(),
                settings.enumeration.cities.clone(),
            ),
            max_scrolls: settings.application.max_scrolls,
            delays: settings.delays.clone(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub queries: usize,
    pub failed: usize,
    pub collected: usize,
    pub appended: usize,
}

/// Walks the whole grid once. A query that fails is logged and skipped;
/// nothing is retried.
pub async fn listing_scraper_handler<S, R>(
    surface: &S,
    store: &R,
    known: &mut KnownSet,
    plan: &ScrapePlan,
) -> RunSummary
where
    S: SearchSurface + ?Sized,
    R: RecordStore + ?Sized,
{
    log::info!(
        "Started listing scraper: {} queries, {} known websites",
        plan.grid.len(),
        known.len()
    );

    let mut summary = RunSummary::default();
    let mut current_template: Option<String> = None;

    for query in plan.grid.queries() {
        if current_template.as_ref() != Some(&query.template) {
            log::info!("Starting: {}", query.template);
            current_template = Some(query.template.clone());
        }

        summary.queries += 1;

        match scrape_query(surface, store, known, &query, plan).await {
            Ok((collected, appended)) => {
                summary.collected += collected;
                summary.appended += appended;
            }
            Err(e) => {
                summary.failed += 1;
                log::error!("Error in {} ({}): {:?}", query.city, query.template, e);
            }
        }

        plan.delays.between_queries.pause("between queries").await;
    }

    log::info!(
        "Scraping completed: {} queries ({} failed), {} businesses seen, {} new rows saved",
        summary.queries,
        summary.failed,
        summary.collected,
        summary.appended
    );

    summary
}

async fn scrape_query<S, R>(
    surface: &S,
    store: &R,
    known: &mut KnownSet,
    query: &Query,
    plan: &ScrapePlan,
) -> Result<(usize, usize)>
where
    S: SearchSurface + ?Sized,
    R: RecordStore + ?Sized,
{
    let records = collect_listings(surface, query, plan.max_scrolls, &plan.delays.scroll).await?;
    let collected = records.len();
    let appended = persist_new_records(store, known, records).await?;

    Ok((collected, appended))
}
