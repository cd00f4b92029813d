//! Snapshot naming.
//!
//! Every snapshot this tool creates is named
//!
//! ```text
//! <dataset>@<tag>-<timestamp>
//! ```
//!
//! where `<timestamp>` is UTC with second precision and a literal `Z`, e.g.
//! `pool/data@daily-2024-01-05T00:00:00Z`.  The timestamp is fixed-width and
//! zero-padded, so for a fixed dataset and tag, sorting names sorts by time.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::UsageError;

/// `strftime` pattern for the timestamp suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ─── Tag ──────────────────────────────────────────────────────────────────────

/// A validated snapshot series label such as `daily` or `hourly`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag(String);

impl Tag {
    /// Validate `raw` as a tag.
    ///
    /// Empty input is [`UsageError::MissingTag`]; characters that would break
    /// the `<dataset>@<tag>-<timestamp>` scheme are [`UsageError::InvalidTag`].
    pub fn parse(raw: &str) -> Result<Self, UsageError> {
        if raw.is_empty() {
            return Err(UsageError::MissingTag);
        }
        if raw
            .chars()
            .any(|c| matches!(c, '@' | '/' | '#') || c.is_whitespace())
        {
            return Err(UsageError::InvalidTag(raw.into()));
        }
        Ok(Self(raw.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `@<tag>-` marker used for loose matching in listings.
    pub fn marker(&self) -> String {
        format!("@{}-", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Names ────────────────────────────────────────────────────────────────────

/// Format `at` as a snapshot timestamp suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Build `<dataset>@<tag>-<timestamp>`.
pub fn snapshot_name(dataset: &str, tag: &Tag, at: DateTime<Utc>) -> String {
    format!("{dataset}@{tag}-{}", format_timestamp(at))
}

/// Split a full snapshot name into `(dataset, short name)`.
pub fn split(name: &str) -> Option<(&str, &str)> {
    name.split_once('@')
}

/// Whether `candidate` is a dataset strictly below `ancestor`.
///
/// `pool/data/x` is below `pool/data`; `pool/database` is not.
pub fn is_descendant(candidate: &str, ancestor: &str) -> bool {
    candidate
        .strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// `true` if `name` is exactly `<anything>@<tag>-<timestamp>`.
///
/// Stricter than [`Tag::marker`] containment: the part after `<tag>-` must
/// parse as a timestamp, so tag `daily` matches neither `daily2-…` nor
/// `daily-backup-…`.  The timestamp must also be in canonical zero-padded
/// form, or name order would stop being time order.
pub fn matches_tag(name: &str, tag: &Tag) -> bool {
    let Some((_, short)) = split(name) else {
        return false;
    };
    short
        .strip_prefix(tag.as_str())
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|stamp| {
            NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
                .is_ok_and(|t| t.format(TIMESTAMP_FORMAT).to_string() == stamp)
        })
}

// ─── Clock ────────────────────────────────────────────────────────────────────

/// Source of "now" for the creator.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
