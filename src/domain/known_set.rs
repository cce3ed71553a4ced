use std::collections::HashSet;

use super::listing::identity_key;

#[derive(Debug, Default, Clone)]
pub struct KnownSet {
    keys: HashSet<String>,
}

impl KnownSet {
    /// Builds the set from raw worksheet rows. The first row is the header;
    /// rows with no second column or an empty one are ignored.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let keys = rows
            .iter()
            .skip(1)
            .filter_map(|row| row.get(1))
            .filter(|website| !website.is_empty())
            .map(|website| identity_key(website))
            .filter(|key| !key.is_empty())
            .collect();

        KnownSet { keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn insert(&mut self, key: String) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
