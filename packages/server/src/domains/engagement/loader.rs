//! CSV loader for the engagement dataset.
//!
//! Accepts both the export header (`Post Type, Likes, Comments, Shares, Total Engagement`)
//! and its snake_case form. Headers are matched after trimming.

use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use super::models::EngagementRecord;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Column positions resolved from the header row.
struct Columns {
    post_type: usize,
    likes: usize,
    comments: usize,
    shares: usize,
    total_engagement: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |names: [&'static str; 2]| {
            headers
                .iter()
                .position(|h| names.iter().any(|name| *name == h.trim()))
                .ok_or(LoadError::MissingColumn(names[0]))
        };

        Ok(Self {
            post_type: find(["Post Type", "post_type"])?,
            likes: find(["Likes", "likes"])?,
            comments: find(["Comments", "comments"])?,
            shares: find(["Shares", "shares"])?,
            total_engagement: find(["Total Engagement", "total_engagement"])?,
        })
    }
}

/// Load every row of the CSV at `path`, in file order.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<EngagementRecord>, LoadError> {
    let path = path.as_ref();
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let records = parse(reader)?;
    tracing::info!(path = %path.display(), count = records.len(), "Loaded engagement CSV");
    Ok(records)
}

/// Parse engagement rows from any reader (used for in-memory fixtures).
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<EngagementRecord>, LoadError> {
    parse(ReaderBuilder::new().has_headers(true).from_reader(reader))
}

fn parse<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<EngagementRecord>, LoadError> {
    let columns = Columns::resolve(reader.headers()?)?;

    let mut out = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        let record = result?;

        let post_type = field(&record, columns.post_type, row, "post_type")?.to_string();
        if post_type.is_empty() {
            return Err(LoadError::InvalidRow {
                row,
                reason: "empty post_type".to_string(),
            });
        }

        out.push(EngagementRecord::new(
            post_type,
            count(&record, columns.likes, row, "likes")?,
            count(&record, columns.comments, row, "comments")?,
            count(&record, columns.shares, row, "shares")?,
            count(&record, columns.total_engagement, row, "total_engagement")?,
        ));
    }

    Ok(out)
}

fn field<'r>(
    record: &'r StringRecord,
    idx: usize,
    row: usize,
    name: &str,
) -> Result<&'r str, LoadError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| LoadError::InvalidRow {
            row,
            reason: format!("missing {} value", name),
        })
}

fn count(record: &StringRecord, idx: usize, row: usize, name: &str) -> Result<i32, LoadError> {
    let raw = field(record, idx, row, name)?;
    let value: i32 = raw.parse().map_err(|_| LoadError::InvalidRow {
        row,
        reason: format!("{} is not an integer: '{}'", name, raw),
    })?;

    if value < 0 {
        return Err(LoadError::InvalidRow {
            row,
            reason: format!("{} must be non-negative, got {}", name, value),
        });
    }

    Ok(value)
}
