//! Toolbox file dates.

use std::fmt::Write as _;
use std::path::Path;
use std::time::SystemTime;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{MetadataError, Result};

/// Default date format of metadata date fields.
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d";

/// Default time format of metadata time fields: hours, minutes, seconds and
/// two digits of hundredths (always `00`).
pub const DEFAULT_TIME_FORMAT: &str = "%H%M%S00";

/// Creation, modification and access times of a file, plus the time they
/// were probed, all in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDates {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

impl FileDates {
    /// Read the dates of `path`.
    ///
    /// Platforms that do not record creation or access time report the
    /// modification time for them.
    pub fn probe(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;
        let modified = meta.modified()?;
        let created = meta.created().unwrap_or(modified);
        let accessed = meta.accessed().unwrap_or(modified);
        debug!(path = %path.display(), "probed file dates");
        Ok(Self {
            created: utc(created),
            modified: utc(modified),
            accessed: utc(accessed),
            now: Utc::now(),
        })
    }

    /// All four dates set to the current time.
    pub fn now() -> Self {
        Self::fixed(Utc::now())
    }

    /// All four dates set to `at`.
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self {
            created: at,
            modified: at,
            accessed: at,
            now: at,
        }
    }
}

fn utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

/// A validated strftime pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    /// Check `pattern` for unknown or malformed specifiers.
    pub fn parse(pattern: &str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(MetadataError::InvalidDateFormat {
                format: pattern.to_string(),
            });
        }
        Ok(Self(pattern.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn format(&self, at: &DateTime<Utc>) -> String {
        let mut out = String::new();
        // Patterns are checked in `parse`, so formatting cannot fail.
        let _ = write!(out, "{}", at.format(&self.0));
        out
    }
}
