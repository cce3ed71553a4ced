use anyhow::Result;

use crate::domain::{Query, Record};

use super::{JitterRange, SearchSurface};

/// Loads the results for `query`, keeps scrolling the feed until it stops
/// growing, and returns every card carrying both a name and a website, in
/// the order they are rendered.
///
/// A feed that never shows up yields an empty batch rather than an error.
pub async fn collect_listings<S>(
    surface: &S,
    query: &Query,
    max_scrolls: u32,
    settle: &JitterRange,
) -> Result<Vec<Record>>
where
    S: SearchSurface + ?Sized,
{
    log::info!("Searching {}", query);

    if !surface.navigate(query).await? {
        log::warn!("Result feed never appeared for '{}'", query.text());
        return Ok(vec![]);
    }

    let rounds = scroll_until_stable(surface, max_scrolls, settle).await?;

    let records: Vec<Record> = surface
        .extract_entries()
        .await?
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Ok(card) => card.into_record(),
            Err(e) => {
                log::debug!("Skipping card {} for '{}': {:?}", index, query.text(), e);
                None
            }
        })
        .collect();

    log::info!(
        "Found {} businesses after {} scroll rounds",
        records.len(),
        rounds
    );

    Ok(records)
}

/// Returns the number of rounds performed. Stops at the first round whose
/// card count is not larger than the previous one, or after `max_scrolls`.
pub async fn scroll_until_stable<S>(
    surface: &S,
    max_scrolls: u32,
    settle: &JitterRange,
) -> Result<u32>
where
    S: SearchSurface + ?Sized,
{
    let mut previous_count = 0;

    for round in 1..=max_scrolls {
        surface.scroll_step().await?;
        settle.pause("feed settle").await;

        let current_count = surface.entry_count().await?;
        if current_count <= previous_count {
            return Ok(round);
        }
        previous_count = current_count;
    }

    Ok(max_scrolls)
}
