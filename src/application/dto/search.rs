//! Global search DTOs
//!
//! The backend has answered both with a flat list of hits and with hits grouped
//! by entity kind; both shapes normalize into `SearchResult`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Flat(Vec<SearchHit>),
    Grouped(BTreeMap<String, Vec<SearchHit>>),
}

impl SearchResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            Self::Flat(hits) => hits.into_iter().map(SearchResult::from).collect(),
            Self::Grouped(groups) => groups
                .into_values()
                .flatten()
                .map(SearchResult::from)
                .collect(),
        }
    }
}

/// One normalized search result, ready to display and navigate to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub kind: String,
    pub title: String,
    pub subtitle: String,
    pub id: i64,
    pub url: String,
    pub score: f64,
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> Self {
        let kind = hit
            .model
            .or(hit.kind)
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let url = format!("/{}/{}", kind.to_lowercase(), hit.id);
        Self {
            title: hit
                .name
                .or(hit.title)
                .unwrap_or_else(|| "Untitled".to_string()),
            subtitle: hit.description.or(hit.subtitle).unwrap_or_default(),
            id: hit.id,
            url,
            score: hit.score.unwrap_or(0.0),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_hits_normalize() {
        let json = r#"[{"id": 4, "model": "Character", "name": "Metal Fingers", "description": "Cyborg", "score": 0.9}]"#;
        let results = serde_json::from_str::<SearchResponse>(json)
            .unwrap()
            .into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, "Character");
        assert_eq!(results[0].title, "Metal Fingers");
        assert_eq!(results[0].subtitle, "Cyborg");
        assert_eq!(results[0].url, "/character/4");
    }

    #[test]
    fn test_grouped_hits_normalize() {
        let json = r#"{"vices": [{"id": 2, "name": "Violence", "type": "vice"}], "crews": []}"#;
        let results = serde_json::from_str::<SearchResponse>(json)
            .unwrap()
            .into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, "vice");
        assert_eq!(results[0].url, "/vice/2");
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let hit: SearchHit = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        let result = SearchResult::from(hit);
        assert_eq!(result.kind, "Unknown");
        assert_eq!(result.title, "Untitled");
        assert_eq!(result.url, "/unknown/9");
    }
}
