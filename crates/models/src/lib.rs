use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

/// One artist key of the catalog file with its song titles, as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistEntry {
    pub name: String,
    pub titles: Vec<String>,
}

/// Static artist -> titles lookup table.
///
/// Entries keep the order of the JSON object they were read from, which is
/// also the tie-break order for ranked search results and the listing order
/// inside a browse bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<ArtistEntry>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ArtistEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ArtistEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ArtistEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn song_count(&self) -> usize {
        self.entries.iter().map(|e| e.titles.len()).sum()
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object mapping artist names to arrays of song titles")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let capacity = map.size_hint().unwrap_or(0);
                let mut entries: Vec<ArtistEntry> = Vec::with_capacity(capacity);
                let mut positions: HashMap<String, usize> = HashMap::with_capacity(capacity);
                while let Some((name, titles)) = map.next_entry::<String, Vec<String>>()? {
                    // Later duplicate keys win but keep the first key's position.
                    if let Some(&idx) = positions.get(&name) {
                        entries[idx].titles = titles;
                    } else {
                        positions.insert(name.clone(), entries.len());
                        entries.push(ArtistEntry { name, titles });
                    }
                }
                Ok(Catalog { entries })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// A single (artist, title) pair as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongRef {
    /// Normalized artist display name.
    pub artist: String,
    pub title: String,
    pub url: String,
}

/// Alphabet navigation group an artist is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    /// Anything whose normalized name does not start with an ASCII letter.
    Symbol,
    Letter(char),
}

impl Bucket {
    pub const SYMBOL_LABEL: &'static str = "#";

    pub fn letter(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self::Letter(upper))
    }

    /// Navigation order: symbol bucket first, then A-Z.
    pub fn all() -> Vec<Self> {
        std::iter::once(Self::Symbol)
            .chain(('A'..='Z').map(Self::Letter))
            .collect()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol => f.write_str(Self::SYMBOL_LABEL),
            Self::Letter(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBucketError(String);

impl fmt::Display for ParseBucketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid bucket {:?} (expected A-Z, #, +, 0-9 or a single digit)",
            self.0
        )
    }
}

impl std::error::Error for ParseBucketError {}

impl FromStr for Bucket {
    type Err = ParseBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "#" | "+" | "0-9" | "+0-9" => return Ok(Self::Symbol),
            _ => {}
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => Ok(Self::Symbol),
            (Some(c), None) => Self::letter(c).ok_or_else(|| ParseBucketError(s.to_string())),
            _ => Err(ParseBucketError(s.to_string())),
        }
    }
}

impl Serialize for Bucket {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Pagination control that was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[serde(rename = "prev")]
    #[strum(to_string = "prev", serialize = "previous", serialize = "p")]
    Prev,
    #[serde(rename = "next")]
    #[strum(to_string = "next", serialize = "n")]
    Next,
}
