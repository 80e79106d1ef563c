//! Parsing of the `link` pagination header.
//!
//! GitHub sends neighbouring pages as
//! `<https://api.github.com/user/1/repos?page=2>; rel="next", <...?page=5>; rel="last"`.

use std::collections::HashMap;

use lazy_regex::regex_captures;
use reqwest::Url;

/// Relation name (`first`, `prev`, `next`, `last`) to URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRelations(HashMap<String, String>);

impl LinkRelations {
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.0.get(rel).map(String::as_str)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }

    /// The `page` query parameter of the given relation's URL.
    pub fn page_of(&self, rel: &str) -> Option<u32> {
        let url = Url::parse(self.get(rel)?).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
            .filter(|page| *page >= 1)
    }
}

/// Parse a `link` header. Entries without a `rel` attribute are skipped.
pub fn parse_link_header(header: &str) -> LinkRelations {
    let mut relations = HashMap::new();

    for entry in header.split(',') {
        let Some((url, params)) = entry.split_once(';') else {
            continue;
        };
        let Some((_, rel)) = regex_captures!(r#"rel="([^"]*)""#, params) else {
            continue;
        };
        let url = url.trim().trim_start_matches('<').trim_end_matches('>');
        relations.insert(rel.to_string(), url.to_string());
    }

    LinkRelations(relations)
}
