#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use mapscout::{
    dal::RecordStore,
    domain::{EntryCard, Query},
    services::SearchSurface,
};

/// What one search shows.
#[derive(Clone)]
pub enum Page {
    Results(Vec<EntryCard>),
    NoFeed,
    Broken,
}

/// Map search stand-in keyed by query text. Unknown queries show an empty feed.
#[derive(Default)]
pub struct ScriptedMaps {
    pages: HashMap<String, Page>,
    current: Mutex<Option<Page>>,
    pub visited: Mutex<Vec<String>>,
}

impl ScriptedMaps {
    pub fn new() -> Self {
        ScriptedMaps::default()
    }

    pub fn page(mut self, query_text: &str, page: Page) -> Self {
        self.pages.insert(query_text.to_string(), page);
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    fn cards(&self) -> Vec<EntryCard> {
        match *self.current.lock().unwrap() {
            Some(Page::Results(ref cards)) => cards.clone(),
            _ => vec![],
        }
    }
}

#[async_trait]
impl SearchSurface for ScriptedMaps {
    async fn navigate(&self, query: &Query) -> Result<bool> {
        let text = query.text();
        self.visited.lock().unwrap().push(text.clone());

        let page = self
            .pages
            .get(&text)
            .cloned()
            .unwrap_or(Page::Results(vec![]));
        let feed = !matches!(page, Page::NoFeed);
        *self.current.lock().unwrap() = Some(page);

        Ok(feed)
    }

    async fn scroll_step(&self) -> Result<()> {
        match *self.current.lock().unwrap() {
            Some(Page::Broken) => Err(anyhow!("feed detached while scrolling")),
            _ => Ok(()),
        }
    }

    async fn entry_count(&self) -> Result<usize> {
        Ok(self.cards().len())
    }

    async fn extract_entries(&self) -> Result<Vec<Result<EntryCard>>> {
        Ok(self.cards().into_iter().map(Ok).collect())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub rows: Mutex<Vec<Vec<String>>>,
    pub append_calls: Mutex<usize>,
}

impl MemoryStore {
    pub fn with_header() -> Self {
        let store = MemoryStore::default();
        store.push(&["business_name", "website"]);
        store
    }

    pub fn push(&self, row: &[&str]) {
        self.rows
            .lock()
            .unwrap()
            .push(row.iter().map(|c| c.to_string()).collect());
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn append_calls(&self) -> usize {
        *self.append_calls.lock().unwrap()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows())
    }

    async fn ensure_header(&self, header: &[&str]) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let matches = rows
            .first()
            .is_some_and(|first| first.iter().map(String::as_str).eq(header.iter().copied()));
        if !matches {
            *rows = vec![header.iter().map(|h| h.to_string()).collect()];
        }
        Ok(())
    }

    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<()> {
        *self.append_calls.lock().unwrap() += 1;
        self.rows.lock().unwrap().extend(rows);
        Ok(())
    }
}

/// Accepts reads but rejects every append.
#[derive(Default)]
pub struct RejectingStore {
    pub append_calls: Mutex<usize>,
}

impl RejectingStore {
    pub fn append_calls(&self) -> usize {
        *self.append_calls.lock().unwrap()
    }
}

#[async_trait]
impl RecordStore for RejectingStore {
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(vec![vec!["business_name".to_string(), "website".to_string()]])
    }

    async fn ensure_header(&self, _header: &[&str]) -> Result<()> {
        Ok(())
    }

    async fn append_rows(&self, _rows: Vec<Vec<String>>) -> Result<()> {
        *self.append_calls.lock().unwrap() += 1;
        Err(anyhow!("quota exceeded"))
    }
}
