//! Import command - load an items JSON file into the store

use crate::{TaggroupError, db::ItemStore, model::TaggedItem};
use std::fs;
use std::path::Path;
use tracing::info;

type Result<T> = std::result::Result<T, TaggroupError>;

/// Parse an items document: a JSON array of `{ "id": ..., "tags": { ... } }`
///
/// # Errors
///
/// Returns `TaggroupError::InvalidInput` naming the position of the first
/// malformed item, or a JSON error if the text is not JSON.
pub fn parse_items(text: &str) -> Result<Vec<TaggedItem>> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    let entries = document
        .as_array()
        .ok_or_else(|| TaggroupError::InvalidInput("items document must be a JSON array".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            TaggedItem::from_json(entry).map_err(|e| TaggroupError::InvalidInput(format!("item #{index}: {e}")))
        })
        .collect()
}

/// Read and parse an items file
///
/// # Errors
///
/// Returns `TaggroupError` if the file cannot be read or parsed.
pub fn load_items_file(path: &Path) -> Result<Vec<TaggedItem>> {
    let text = fs::read_to_string(path)?;
    let items = parse_items(&text)?;
    info!(path = %path.display(), items = items.len(), "loaded items file");
    Ok(items)
}

/// Execute the import command
///
/// # Errors
///
/// Returns `TaggroupError` if the file cannot be loaded or the store fails.
pub fn execute(store: &ItemStore, file: &Path, replace: bool, quiet: bool) -> Result<()> {
    let items = load_items_file(file)?;

    if replace {
        store.clear()?;
    }

    let written = store.insert_all(&items)?;
    store.flush()?;

    if !quiet {
        println!("Imported {written} item(s) from {}", file.display());
        println!("Store now holds {} item(s)", store.count());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scalar, TagValue};
    use crate::testing::TestDb;

    const LAKES: &str = r#"[
        {"id": "Titicaca Lake", "tags": {"country": ["Peru", "Bolivia"], "type": "lake"}},
        {"id": 2, "tags": {"country": "Chile", "depth": null}},
        {"id": 3}
    ]"#;

    #[test]
    fn test_parse_items() {
        let items = parse_items(LAKES).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0].tag_value("country"),
            Some(&TagValue::Many(vec![Scalar::from("Peru"), Scalar::from("Bolivia")]))
        );
        assert_eq!(items[1].id, Scalar::from(2));
        assert!(items[1].tag_value("depth").is_none());
        assert!(items[2].tags.is_empty());
    }

    #[test]
    fn test_parse_items_rejects_non_array() {
        let err = parse_items(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, TaggroupError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_items_names_bad_entry() {
        let err = parse_items(r#"[{"id": 1}, {"tags": {}}]"#).unwrap_err();
        match err {
            TaggroupError::InvalidInput(msg) => assert!(msg.starts_with("item #1")),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_items_invalid_json() {
        assert!(matches!(parse_items("[{"), Err(TaggroupError::JsonError(_))));
    }

    #[test]
    fn test_execute_imports_and_replaces() {
        let test_db = TestDb::new("test_import");
        let file = test_db.path().join("lakes.json");
        fs::write(&file, LAKES).unwrap();

        execute(test_db.store(), &file, false, true).unwrap();
        assert_eq!(test_db.store().count(), 3);

        test_db.store().insert(&TaggedItem::new("extra")).unwrap();
        execute(test_db.store(), &file, true, true).unwrap();
        assert_eq!(test_db.store().count(), 3);
        assert!(!test_db.store().contains(&Scalar::from("extra")).unwrap());
    }
}
