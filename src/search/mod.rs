use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::content::catalog::ContentCatalog;
use crate::content::record::{ArticleSummary, CatalogRecord};
use crate::preference::model::ParseEnumError;

/// A normalized search query: lowercased, whitespace-tokenized.
/// An empty term list means the query was blank and scoring is skipped.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub raw: String,
    pub normalized: String,
    pub terms: Vec<String>,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().to_lowercase();
        let terms = normalized.split_whitespace().map(|s| s.to_string()).collect();

        Self {
            raw,
            normalized,
            terms,
        }
    }
}

/// Per-field relevance weights. The defaults are the portal's fixed
/// weighting; they are serializable so the search surface can echo them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWeights {
    pub title: f64,
    pub subtitle: f64,
    pub description: f64,
    pub summary: f64,
    #[serde(rename = "type")]
    pub kind: f64,
    pub category: f64,
    pub tag: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        FieldWeights {
            title: 3.0,
            subtitle: 2.0,
            description: 2.0,
            summary: 2.0,
            kind: 1.0,
            category: 1.0,
            tag: 1.5,
        }
    }
}

/// Language selector applied after scoring: `all` keeps everything, `en`/`fr`
/// keep records whose language tags name that language (or carry no
/// language constraint at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageFilter {
    #[default]
    All,
    En,
    Fr,
}

impl LanguageFilter {
    fn matches(&self, record: &CatalogRecord) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::En => record.audience.languages.allows("en"),
            LanguageFilter::Fr => record.audience.languages.allows("fr"),
        }
    }
}

impl std::str::FromStr for LanguageFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(LanguageFilter::All),
            "en" => Ok(LanguageFilter::En),
            "fr" => Ok(LanguageFilter::Fr),
            other => Err(ParseEnumError {
                field: "LanguageFilter",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCounts {
    pub en: usize,
    pub fr: usize,
}

/// Static description of the search behaviour, returned with every result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInfo {
    pub engine: &'static str,
    pub description: &'static str,
    pub weights: FieldWeights,
}

impl SearchInfo {
    fn new(weights: FieldWeights) -> Self {
        SearchInfo {
            engine: "field-weighted",
            description: "Keyword relevance over title, subtitle, description, \
                          summary, type, category, and tags; exact field matches \
                          outrank all-term matches, which outrank any-term matches.",
            weights,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub results: Vec<ArticleSummary>,
    pub total: usize,
    pub query: String,
    pub languages: LanguageCounts,
    pub search_info: SearchInfo,
}

impl SearchResults {
    fn empty(query: String, weights: &FieldWeights) -> Self {
        SearchResults {
            results: Vec::new(),
            total: 0,
            query,
            languages: LanguageCounts::default(),
            search_info: SearchInfo::new(weights.clone()),
        }
    }
}

/// Score one record against a query.
///
/// Per candidate field: an exact full-query match earns double weight, a
/// field containing every term earns 1.5x, a field containing any term
/// earns 1x. The total is the sum over all fields; 0.0 means no match.
pub fn score_record(record: &CatalogRecord, query: &SearchQuery, weights: &FieldWeights) -> f64 {
    let raw = record.raw();
    let mut score = 0.0;
    score += field_score(Some(raw.title.as_str()), weights.title, query);
    score += field_score(raw.subtitle.as_deref(), weights.subtitle, query);
    score += field_score(raw.description.as_deref(), weights.description, query);
    score += field_score(raw.summary.as_deref(), weights.summary, query);
    score += field_score(raw.kind.as_deref(), weights.kind, query);
    score += field_score(raw.category.as_deref(), weights.category, query);
    for tag in &raw.tags {
        score += field_score(Some(tag.as_str()), weights.tag, query);
    }
    score
}

fn field_score(field: Option<&str>, weight: f64, query: &SearchQuery) -> f64 {
    let Some(field) = field else {
        return 0.0;
    };
    let lower = field.to_lowercase();
    if lower == query.normalized {
        weight * 2.0
    } else if query.terms.iter().all(|term| lower.contains(term)) {
        weight * 1.5
    } else if query.terms.iter().any(|term| lower.contains(term)) {
        weight
    } else {
        0.0
    }
}

/// Run a search over the catalog.
///
/// A blank query short-circuits to an empty result set. Zero-score records
/// are excluded; survivors are sorted by descending score (stable, so ties
/// keep catalog order), then narrowed by the language selector. The
/// transient scores never leave this function.
pub fn search(
    catalog: &ContentCatalog,
    raw_query: &str,
    language: LanguageFilter,
    weights: &FieldWeights,
) -> SearchResults {
    let query = SearchQuery::new(raw_query);
    if query.terms.is_empty() {
        return SearchResults::empty(query.raw, weights);
    }

    let mut scored: Vec<(f64, &CatalogRecord)> = catalog
        .records()
        .iter()
        .filter_map(|record| {
            let score = score_record(record, &query, weights);
            (score > 0.0).then_some((score, record))
        })
        .filter(|(_, record)| language.matches(record))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let languages = LanguageCounts {
        en: scored
            .iter()
            .filter(|(_, record)| record.audience.languages.allows("en"))
            .count(),
        fr: scored
            .iter()
            .filter(|(_, record)| record.audience.languages.allows("fr"))
            .count(),
    };

    let results: Vec<ArticleSummary> = scored
        .into_iter()
        .map(|(_, record)| record.summary())
        .collect();

    SearchResults {
        total: results.len(),
        query: query.raw,
        languages,
        search_info: SearchInfo::new(weights.clone()),
        results,
    }
}
