use super::records::record_for_folder;
use super::{sorted_entries, write_json};
use crate::models::{ListingRecord, ObjectIndex, FOLDER_PREFIX, INDEX_FILE, RECORD_FILE};
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Rebuild `<base>/index.json` from the listing folders that hold a record,
/// a non-empty `description.txt` and at least one image file
pub fn build_index(base: &Path) -> Result<ObjectIndex> {
    let mut index = ObjectIndex::new();

    for (folder, path) in sorted_entries(base)? {
        if !path.is_dir() || !folder.starts_with(FOLDER_PREFIX) {
            continue;
        }

        match record_for_folder(&path)? {
            Ok(_) if has_record(&path) => index.push(folder),
            Ok(_) => debug!("{} left out of the index: no usable {}", folder, RECORD_FILE),
            Err(reason) => debug!("{} left out of the index: {}", folder, reason),
        }
    }

    write_json(&base.join(INDEX_FILE), &index)?;
    info!("Index written: {} objects", index.len());

    Ok(index)
}

/// The folder's `data.json` exists and parses as a record
fn has_record(folder: &Path) -> bool {
    fs::read_to_string(folder.join(RECORD_FILE))
        .ok()
        .and_then(|raw| serde_json::from_str::<ListingRecord>(&raw).ok())
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_records;

    fn listing(base: &Path, name: &str, description: Option<&str>, images: &[&str]) {
        let dir = base.join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(text) = description {
            fs::write(dir.join("description.txt"), text).unwrap();
        }
        for image in images {
            fs::write(dir.join(image), b"x").unwrap();
        }
    }

    #[test]
    fn index_lists_only_complete_folders() {
        let dir = tempfile::tempdir().unwrap();
        listing(dir.path(), "object_02", Some("Дом\nОписание"), &["img_01.jpg"]);
        listing(dir.path(), "object_01", Some("Квартира"), &["img_01.png"]);
        listing(dir.path(), "object_03", None, &["img_01.jpg"]);
        listing(dir.path(), "object_04", Some("Участок"), &[]);
        listing(dir.path(), "drafts", Some("Черновик"), &["img_01.jpg"]);

        build_records(dir.path()).unwrap();
        let index = build_index(dir.path()).unwrap();

        assert_eq!(index, vec!["object_01", "object_02"]);
        let written: ObjectIndex =
            serde_json::from_str(&fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap())
                .unwrap();
        assert_eq!(written, index);
    }

    #[test]
    fn stale_records_without_files_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let record = r#"{"title":"Дом","description":"","images":["img_01.jpg"]}"#;

        // record only, no description.txt and no image on disk
        let bare = dir.path().join("object_01");
        fs::create_dir_all(&bare).unwrap();
        fs::write(bare.join(RECORD_FILE), record).unwrap();

        // images were deleted after the record was written
        listing(dir.path(), "object_02", Some("Дом"), &[]);
        fs::write(dir.path().join("object_02").join(RECORD_FILE), record).unwrap();

        // description emptied after the record was written
        listing(dir.path(), "object_03", Some("  \n"), &["img_01.jpg"]);
        fs::write(dir.path().join("object_03").join(RECORD_FILE), record).unwrap();

        // complete folder with a matching record
        listing(dir.path(), "object_04", Some("Дом"), &["img_01.jpg"]);
        fs::write(dir.path().join("object_04").join(RECORD_FILE), record).unwrap();

        assert_eq!(build_index(dir.path()).unwrap(), vec!["object_04"]);
    }

    #[test]
    fn folders_without_a_record_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        listing(dir.path(), "object_01", Some("Дом"), &["img_01.jpg"]);

        assert!(build_index(dir.path()).unwrap().is_empty());
        assert_eq!(fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap(), "[]");
    }
}
