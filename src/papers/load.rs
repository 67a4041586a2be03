use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{info, warn};

use super::PaperRecord;

pub fn load_papers(path: &Path) -> Result<Vec<PaperRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read paper file {}", path.display()))?;
    let papers = parse_papers(&raw)
        .with_context(|| format!("failed to parse paper file {}", path.display()))?;

    info!(count = papers.len(), path = %path.display(), "loaded paper records");
    Ok(papers)
}

/// Accepts a bare array of records or an object with a `papers` array.
pub fn parse_papers(raw: &str) -> Result<Vec<PaperRecord>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in paper file")?;

    let entries = match parsed {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("papers") {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) | None => {
                warn!("paper file has no `papers` field; treating corpus as empty");
                return Ok(Vec::new());
            }
            Some(_) => return Err(anyhow!("`papers` field is not an array")),
        },
        _ => return Err(anyhow!("unexpected JSON type in paper file")),
    };

    let mut papers = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<PaperRecord>(entry) {
            Ok(paper) if !paper.id.trim().is_empty() => papers.push(paper),
            Ok(_) => skipped += 1,
            Err(error) => {
                warn!(index, %error, "skipping malformed paper record");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "some paper records were skipped");
    }

    Ok(papers)
}
