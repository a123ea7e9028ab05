use super::{sorted_entries, write_json, JobReport};
use crate::error::SkipReason;
use crate::models::{ListingRecord, DESCRIPTION_FILE, RECORD_FILE};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const IMAGE_PREFIX: &str = "img_";
const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Regenerate `data.json` in every listing folder under `base`
pub fn build_records(base: &Path) -> Result<JobReport> {
    let mut report = JobReport::default();

    for (folder, path) in sorted_entries(base)? {
        if !path.is_dir() {
            continue;
        }

        match record_for_folder(&path)? {
            Ok(record) => {
                write_json(&path.join(RECORD_FILE), &record)?;
                info!("✔ {}: data.json written", folder);
                report.written.push(folder);
            }
            Err(reason) => {
                warn!("⚠ Skipping {}: {}", folder, reason);
                report.skipped.push((folder, reason));
            }
        }
    }

    info!("Records done: {} written, {} skipped", report.written.len(), report.skipped.len());
    Ok(report)
}

/// Build the record from `description.txt` and the image files in `folder`
/// The outer error is I/O, the inner one a reason to skip the folder
pub fn record_for_folder(folder: &Path) -> Result<Result<ListingRecord, SkipReason>> {
    let desc_path = folder.join(DESCRIPTION_FILE);
    if !desc_path.is_file() {
        return Ok(Err(SkipReason::MissingDescription));
    }

    let text = fs::read_to_string(&desc_path)
        .with_context(|| format!("Failed to read {}", desc_path.display()))?;

    let (title, description) = match split_description(&text) {
        Some(parts) => parts,
        None => return Ok(Err(SkipReason::EmptyDescription)),
    };

    let images = image_files(folder)?;
    if images.is_empty() {
        return Ok(Err(SkipReason::NoImages));
    }

    Ok(Ok(ListingRecord::new(title, description, images)))
}

/// First non-blank line is the title; the remaining non-blank lines, trimmed,
/// form the description
fn split_description(text: &str) -> Option<(String, String)> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let title = lines.next()?.to_string();
    let description = lines.collect::<Vec<_>>().join("\n");
    Some((title, description))
}

fn is_image_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.starts_with(IMAGE_PREFIX) && IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn image_files(folder: &Path) -> Result<Vec<String>> {
    Ok(sorted_entries(folder)?
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| is_image_file(name))
        .collect())
}
