use anyhow::{Context, Result};

use crate::{
    dal::{RecordStore, SHEET_HEADER},
    domain::{KnownSet, Record},
};

pub async fn load_known_set<R>(store: &R) -> Result<KnownSet>
where
    R: RecordStore + ?Sized,
{
    store
        .ensure_header(&SHEET_HEADER)
        .await
        .context("Failed to prepare the worksheet header")?;

    let rows = store
        .read_all_rows()
        .await
        .context("Failed to read existing rows")?;
    let known = KnownSet::from_rows(&rows);

    log::info!("Loaded {} known websites", known.len());

    Ok(known)
}

/// Appends the records whose website is not known yet, in one call, and
/// remembers them. Returns how many rows were appended.
pub async fn persist_new_records<R>(
    store: &R,
    known: &mut KnownSet,
    records: Vec<Record>,
) -> Result<usize>
where
    R: RecordStore + ?Sized,
{
    let mut new_rows = vec![];

    for record in records {
        if known.insert(record.identity_key()) {
            new_rows.push(record.into_row());
        }
    }

    if new_rows.is_empty() {
        return Ok(0);
    }

    let saved = new_rows.len();
    store.append_rows(new_rows).await?;
    log::info!("Saved {} new rows", saved);

    Ok(saved)
}
