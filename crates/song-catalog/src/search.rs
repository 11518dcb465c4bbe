use models::{Catalog, SongRef};
use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::debug;

use crate::links::song_ref;
use crate::matcher::{JaroWinklerMatcher, TokenMatcher, DEFAULT_MAX_COST};
use crate::normalize::normalize_artist;

pub const DEFAULT_MIN_TOKEN_COVERAGE: f64 = 0.8;

/// One searchable (artist, title) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    /// Position of the authored artist key in the catalog.
    pub artist_index: usize,
    /// Normalized artist name.
    pub artist: String,
    pub title: String,
    /// Lowercased `"<artist> <title>"`, the text queries are matched against.
    pub combined: String,
}

impl SearchRecord {
    pub fn song_ref(&self) -> SongRef {
        song_ref(&self.artist, &self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Highest per-token cost the default matcher accepts.
    pub max_cost: f64,
    /// Fraction of distinct query tokens a record has to match.
    pub min_token_coverage: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_cost: DEFAULT_MAX_COST,
            min_token_coverage: DEFAULT_MIN_TOKEN_COVERAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub record: usize,
    pub artist: String,
    pub title: String,
    /// Mean cost over the tokens that matched; lower ranks first.
    pub score: f64,
    pub matched_tokens: usize,
}

/// Something that turns a free-text query into ranked hits.
pub trait SongSearch {
    fn search(&self, query: &str) -> Vec<SearchHit>;
}

/// Flattened catalog plus the matcher used to query it.
#[derive(Debug, Clone)]
pub struct SearchIndex<M = JaroWinklerMatcher> {
    records: Vec<SearchRecord>,
    matcher: M,
    min_token_coverage: f64,
}

impl SearchIndex<JaroWinklerMatcher> {
    pub fn new(catalog: &Catalog, options: SearchOptions) -> Self {
        Self::with_matcher(
            catalog,
            JaroWinklerMatcher::new(options.max_cost),
            options.min_token_coverage,
        )
    }
}

impl<M: TokenMatcher> SearchIndex<M> {
    pub fn with_matcher(catalog: &Catalog, matcher: M, min_token_coverage: f64) -> Self {
        let records = flatten(catalog);
        debug!(records = records.len(), "built search index");
        Self {
            records,
            matcher,
            min_token_coverage: min_token_coverage.clamp(0.0, 1.0),
        }
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    fn required_matches(&self, token_count: usize) -> usize {
        let required = (token_count as f64 * self.min_token_coverage).ceil() as usize;
        required.clamp(1, token_count)
    }
}

impl<M: TokenMatcher> SongSearch for SearchIndex<M> {
    fn search(&self, query: &str) -> Vec<SearchHit> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        // (cost sum, matched token count) per record
        let mut totals = vec![(0.0_f64, 0_usize); self.records.len()];
        for token in &tokens {
            for (record, total) in self.records.iter().zip(totals.iter_mut()) {
                if let Some(cost) = self.matcher.cost(token, &record.combined) {
                    total.0 += cost;
                    total.1 += 1;
                }
            }
        }

        let required = self.required_matches(tokens.len());
        let mut hits = totals
            .into_iter()
            .enumerate()
            .filter(|(_, (_, count))| *count >= required)
            .map(|(idx, (sum, count))| {
                let record = &self.records[idx];
                SearchHit {
                    record: idx,
                    artist: record.artist.clone(),
                    title: record.title.clone(),
                    score: sum / count as f64,
                    matched_tokens: count,
                }
            })
            .collect::<Vec<_>>();

        // stable: equal scores keep catalog order
        hits.sort_by_key(|hit| OrderedFloat(hit.score));

        debug!(
            query,
            tokens = tokens.len(),
            required,
            hits = hits.len(),
            "search finished"
        );
        hits
    }
}

/// Ranked hits trimmed to what the presentation shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub shown: Vec<SearchHit>,
    /// Matches found beyond the display cap.
    pub remaining: usize,
}

impl SearchResults {
    pub fn capped(mut hits: Vec<SearchHit>, cap: usize) -> Self {
        let remaining = hits.len().saturating_sub(cap);
        hits.truncate(cap);
        Self {
            shown: hits,
            remaining,
        }
    }

    pub fn total(&self) -> usize {
        self.shown.len() + self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn flatten(catalog: &Catalog) -> Vec<SearchRecord> {
    let mut records = Vec::with_capacity(catalog.song_count());
    for (artist_index, entry) in catalog.entries().iter().enumerate() {
        let artist = normalize_artist(&entry.name);
        for title in &entry.titles {
            records.push(SearchRecord {
                artist_index,
                artist: artist.clone(),
                title: title.clone(),
                combined: format!("{artist} {title}").to_lowercase(),
            });
        }
    }
    records
}

/// Lowercased, whitespace-split, deduplicated query tokens in first-seen order.
fn tokenize(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in query.trim().to_lowercase().split_whitespace() {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}
