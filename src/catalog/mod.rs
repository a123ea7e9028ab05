//! Filesystem jobs over a base directory of listing folders.
//!
//! Each job is a single sequential pass; the directory tree is the only
//! state shared between them.

pub mod index;
pub mod records;
pub mod titles;

pub use index::build_index;
pub use records::build_records;
pub use titles::{backfill_titles, DEFAULT_CITY};

use crate::error::SkipReason;
use crate::models::to_pretty_json;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Folders written and folders skipped by one job run
#[derive(Debug, Clone, Default)]
pub struct JobReport {
    pub written: Vec<String>,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Entries of `base`, sorted by file name
fn sorted_entries(base: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(base)
        .with_context(|| format!("Failed to read directory {}", base.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path()));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = to_pretty_json(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
