#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub business_name: String,
    pub website: String,
}

impl Record {
    pub fn identity_key(&self) -> String {
        identity_key(&self.website)
    }

    pub fn into_row(self) -> Vec<String> {
        vec![self.business_name, self.website]
    }
}

pub fn identity_key(website: &str) -> String {
    website.trim().to_lowercase()
}

/// Raw fields read off one rendered result card.
///
/// `name` is only read once a website link has been found, so a card
/// without a website always comes back with both fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCard {
    pub name: Option<String>,
    pub website: Option<String>,
}

impl EntryCard {
    pub fn new(name: &str, website: &str) -> Self {
        EntryCard {
            name: Some(name.to_string()),
            website: Some(website.to_string()),
        }
    }

    pub fn website_only(website: &str) -> Self {
        EntryCard {
            name: None,
            website: Some(website.to_string()),
        }
    }

    pub fn into_record(self) -> Option<Record> {
        let website = match self.website.as_deref().map(str::trim) {
            Some(w) if !w.is_empty() => w.to_string(),
            _ => return None,
        };

        match self.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => Some(Record {
                business_name: n.to_string(),
                website,
            }),
            _ => None,
        }
    }
}
