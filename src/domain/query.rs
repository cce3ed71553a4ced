use std::fmt;

use itertools::iproduct;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub template: String,
    pub city: String,
}

impl Query {
    pub fn new(template: &str, city: &str) -> Self {
        Query {
            template: template.to_string(),
            city: city.to_string(),
        }
    }

    pub fn text(&self) -> String {
        format!("{} {}", self.template, self.city)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.template, self.city)
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryGrid {
    pub templates: Vec<String>,
    pub cities: Vec<String>,
}

impl QueryGrid {
    pub fn new(templates: Vec<String>, cities: Vec<String>) -> Self {
        QueryGrid { templates, cities }
    }

    pub fn len(&self) -> usize {
        self.templates.len() * self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn queries(&self) -> impl Iterator<Item = Query> + '_ {
        iproduct!(self.templates.iter(), self.cities.iter())
            .map(|(template, city)| Query::new(template, city))
    }
}
