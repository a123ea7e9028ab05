use super::{sorted_entries, write_json, JobReport};
use crate::error::SkipReason;
use crate::models::RECORD_FILE;
use crate::scrapers::types::PLACEHOLDER_TITLE;
use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// City assumed when a record doesn't name one
pub const DEFAULT_CITY: &str = "Ростовская область";

/// Room kinds, checked in order against the lowercased description
const ROOM_KINDS: [(&str, &str); 4] = [
    ("1-комнат", "1-комнатная квартира"),
    ("2-комнат", "2-комнатная квартира"),
    ("3-комнат", "3-комнатная квартира"),
    ("студ", "Студия"),
];

/// Two or three digits followed by `м`, e.g. `54 м2` or `27м`
static AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,3})\s*м").expect("area pattern is valid"));

/// Guess a display title such as `2-комнатная квартира · Азов · 54 м²`
/// from the description text
pub fn make_title(description: &str, city: &str) -> String {
    let desc = description.to_lowercase();

    let rooms = ROOM_KINDS
        .iter()
        .find(|(needle, _)| desc.contains(needle))
        .map(|(_, kind)| *kind)
        .unwrap_or("Квартира");

    let area = AREA
        .captures(&desc)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{} м²", m.as_str()))
        .unwrap_or_default();

    format!("{} · {} · {}", rooms, city, area)
        .trim_matches(|c: char| c == ' ' || c == '·')
        .to_string()
}

fn needs_title(title: &str) -> bool {
    let title = title.trim();
    title.is_empty() || title.to_lowercase() == PLACEHOLDER_TITLE.to_lowercase()
}

/// Replace empty or placeholder titles in every `data.json` under `base`
/// Records that already have a title are not touched
pub fn backfill_titles(base: &Path, default_city: &str) -> Result<JobReport> {
    let mut report = JobReport::default();

    for (folder, path) in sorted_entries(base)? {
        let record_path = path.join(RECORD_FILE);
        if !record_path.is_file() {
            continue;
        }

        let raw = fs::read_to_string(&record_path)
            .with_context(|| format!("Failed to read {}", record_path.display()))?;

        // Edit the JSON object in place so key order and unknown keys survive
        let mut record = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("⚠ Skipping {}: record is not a JSON object", folder);
                let reason = SkipReason::Unreadable("not a JSON object".to_string());
                report.skipped.push((folder, reason));
                continue;
            }
            Err(e) => {
                warn!("⚠ Skipping {}: {}", folder, e);
                report.skipped.push((folder, SkipReason::Unreadable(e.to_string())));
                continue;
            }
        };

        let title = record.get("title").and_then(Value::as_str).unwrap_or("");
        if !needs_title(title) {
            debug!("{} already titled", folder);
            continue;
        }

        let description = record.get("description").and_then(Value::as_str).unwrap_or("");
        let city = record.get("city").and_then(Value::as_str).unwrap_or(default_city);
        let title = make_title(description, city);
        record.insert("title".to_string(), Value::String(title.clone()));
        write_json(&record_path, &record)?;

        info!("✔ {} → {}", folder, title);
        report.written.push(folder);
    }

    info!("Titles done: {} generated", report.written.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_kind_and_area_are_detected() {
        assert_eq!(
            make_title("Продается 2-комнатная квартира, 54 м2", "Азов"),
            "2-комнатная квартира · Азов · 54 м²"
        );
        assert_eq!(
            make_title("Уютная СТУДИЯ 27м в центре", DEFAULT_CITY),
            "Студия · Ростовская область · 27 м²"
        );
    }

    #[test]
    fn first_matching_room_kind_wins() {
        assert_eq!(
            make_title("1-комнатная или 3-комнатная", "Батайск"),
            "1-комнатная квартира · Батайск"
        );
    }

    #[test]
    fn missing_area_trims_trailing_separator() {
        assert_eq!(make_title("Дом у реки", "Аксай"), "Квартира · Аксай");
        assert_eq!(make_title("площадь 5 м", "Аксай"), "Квартира · Аксай");
    }

    #[test]
    fn placeholder_titles_need_replacing() {
        assert!(needs_title(""));
        assert!(needs_title("   "));
        assert!(needs_title("Без названия"));
        assert!(needs_title("БЕЗ НАЗВАНИЯ"));
        assert!(!needs_title("Дом у моря"));
    }

    fn write_record(base: &Path, folder: &str, json: &str) -> std::path::PathBuf {
        let dir = base.join(folder);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(RECORD_FILE);
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn only_untitled_records_are_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let untitled = write_record(
            dir.path(),
            "object_01",
            r#"{"title":"Без названия","description":"3-комнатная, 80 м","images":["img_01.jpg"],"price":"5 млн"}"#,
        );
        let titled_json = r#"{"title":"Дом","description":"студия","images":[]}"#;
        let titled = write_record(dir.path(), "object_02", titled_json);
        let with_city = write_record(
            dir.path(),
            "object_03",
            r#"{"title":"","description":"","images":[],"city":"Таганрог"}"#,
        );
        write_record(dir.path(), "object_04", "{not json");
        write_record(dir.path(), "object_05", r#"["img_01.jpg"]"#);

        let report = backfill_titles(dir.path(), DEFAULT_CITY).unwrap();

        assert_eq!(report.written, vec!["object_01", "object_03"]);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(fs::read_to_string(&titled).unwrap(), titled_json);

        assert_eq!(
            fs::read_to_string(&untitled).unwrap(),
            "{\n  \"title\": \"3-комнатная квартира · Ростовская область · 80 м²\",\n  \"description\": \"3-комнатная, 80 м\",\n  \"images\": [\n    \"img_01.jpg\"\n  ],\n  \"price\": \"5 млн\"\n}"
        );

        let record: Value = serde_json::from_str(&fs::read_to_string(&with_city).unwrap()).unwrap();
        assert_eq!(record["title"], "Квартира · Таганрог");
        assert_eq!(record["city"], "Таганрог");
    }

    #[test]
    fn rewrite_keeps_key_order_and_adds_no_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_record(
            dir.path(),
            "object_01",
            r#"{"city":"Азов","images":["img_01.jpg"],"title":"","description":"студия"}"#,
        );

        backfill_titles(dir.path(), DEFAULT_CITY).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"city\": \"Азов\",\n  \"images\": [\n    \"img_01.jpg\"\n  ],\n  \"title\": \"Студия · Азов\",\n  \"description\": \"студия\"\n}"
        );

        // a record without description or city keys only gains a title
        let sparse = write_record(dir.path(), "object_02", r#"{"images":[]}"#);
        backfill_titles(dir.path(), "Аксай").unwrap();
        assert_eq!(
            fs::read_to_string(&sparse).unwrap(),
            "{\n  \"images\": [],\n  \"title\": \"Квартира · Аксай\"\n}"
        );
    }
}
