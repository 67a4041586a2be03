mod load;

use serde::Deserialize;

pub use load::{load_papers, parse_papers};

/// One paper as delivered by the data source. Never mutated after loading.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cited_by_count: u64,
    #[serde(default)]
    pub references: Option<String>,
    #[serde(default)]
    pub cited_by: Option<String>,
    #[serde(default)]
    pub concepts: Option<String>,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub primary_url: Option<String>,
    #[serde(default)]
    pub open_access_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl PaperRecord {
    pub fn reference_ids(&self) -> Vec<&str> {
        split_segments(self.references.as_deref(), ';')
    }

    /// Concept tags as written in the record (case preserved).
    pub fn concept_tags(&self) -> Vec<&str> {
        split_segments(self.concepts.as_deref(), ',')
    }

    pub fn url(&self) -> Option<&str> {
        [&self.primary_url, &self.open_access_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .map(str::trim)
            .find(|url| !url.is_empty())
    }
}

/// Splits a delimited field, trimming segments and dropping empty ones.
pub fn split_segments(raw: Option<&str>, delimiter: char) -> Vec<&str> {
    raw.map(|value| {
        value
            .split(delimiter)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
