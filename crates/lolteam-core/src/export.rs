// Team export: validates a finished roster and writes it as JSON or CSV.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::team::member::Role;
use crate::team::roster::Roster;
use crate::team::TeamError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0} already exists, not overwriting it")]
    AlreadyExists(PathBuf),

    #[error("failed to encode team as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode team as CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// On-disk format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// One member line of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportMember {
    pub name: String,
    pub champion: String,
    pub role: Role,
    pub order: u32,
}

/// A finished team, ready to be written.
#[derive(Debug, Clone, Serialize)]
pub struct TeamExport {
    pub date: String,
    pub members: Vec<ExportMember>,
    #[serde(skip)]
    created_at: DateTime<Local>,
}

/// Column order for CSV rows.
#[derive(Serialize)]
struct CsvRow<'a> {
    order: u32,
    name: &'a str,
    role: Role,
    champion: &'a str,
}

impl TeamExport {
    /// Build an export from a complete roster, sorted by pick order.
    ///
    /// Rejects an empty roster and any member without a champion.
    pub fn build(
        roster: &Roster,
        now: DateTime<Local>,
        date_format: &str,
    ) -> Result<Self, TeamError> {
        if roster.is_empty() {
            return Err(TeamError::EmptyRoster);
        }
        let members = roster
            .by_order()
            .into_iter()
            .map(|idx| {
                let member = &roster.members()[idx];
                match (&member.champion, member.role) {
                    (Some(champion), Some(role)) => Ok(ExportMember {
                        name: member.name.clone(),
                        champion: champion.clone(),
                        role,
                        order: member.order,
                    }),
                    _ => Err(TeamError::IncompleteAssignments),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TeamExport {
            date: format_timestamp(now, date_format),
            members,
            created_at: now,
        })
    }
}

/// Format `now` with a strftime pattern, falling back to RFC 3339 when the
/// pattern is malformed.
pub fn format_timestamp(now: DateTime<Local>, pattern: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", now.format(pattern)) {
        Ok(()) => out,
        Err(_) => now.to_rfc3339(),
    }
}

/// `time-lol-<epoch-millis>.<ext>`
pub fn export_file_name(format: ExportFormat, now: DateTime<Local>) -> String {
    format!("time-lol-{}.{}", now.timestamp_millis(), format.extension())
}

/// Write `doc` into `dir` (created if missing). Returns the written path.
///
/// Never replaces an existing file: a name collision is
/// `ExportError::AlreadyExists`.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    doc: &TeamExport,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(export_file_name(format, doc.created_at));

    let file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::AlreadyExists => ExportError::AlreadyExists(path.clone()),
            _ => ExportError::Io {
                path: path.clone(),
                source,
            },
        })?;

    match format {
        ExportFormat::Json => {
            let mut writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, doc)?;
            writer.flush().map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(file);
            for m in &doc.members {
                writer.serialize(CsvRow {
                    order: m.order,
                    name: &m.name,
                    role: m.role,
                    champion: &m.champion,
                })?;
            }
            writer.flush().map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
        }
    }

    info!(
        "Exported {} members to {}",
        doc.members.len(),
        path.display()
    );
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
